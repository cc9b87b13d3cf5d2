//! CLI command implementations

pub mod backend;
pub mod export;
pub mod json_output;
pub mod resolve;
pub mod seed;

mod sources;
