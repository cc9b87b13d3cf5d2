//! Testbed CLI library.
//!
//! This crate provides the commands behind the `testbed` binary, which
//! inspects the settings an integration-test session would run with.

pub mod commands;
pub mod logging;
