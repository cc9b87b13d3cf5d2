//! Testbed Test Infrastructure
//!
//! Shared utilities for the testbed crates' tests, plus cross-crate
//! integration tests under `tests/`:
//!
//! - [`matchers`]: whole-word assertions on error messages
//! - [`fixtures`]: temporary directory trees of settings files
//! - [`harness`]: running the `testbed` binary and inspecting its output
//! - [`log_capture`]: collecting `tracing` output during a test
//! - [`determinism`]: checking that a seed reproduces generated data
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p testbed-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;
pub mod log_capture;
pub mod matchers;

pub use determinism::{assert_seed_deterministic, verify_seed_determinism, SeedDeterminism};
pub use fixtures::SettingsTree;
pub use harness::{CliResult, TestHarness};
pub use log_capture::{capture_logs, LogBuffer};
pub use matchers::{assert_contains_non_abutting, contains_with_non_abutting_text};
