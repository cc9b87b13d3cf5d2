//! Testbed randomness.
//!
//! Resolves the configured random seed into a deterministic generator, logs
//! the seed of failed tests for replay, and provides the generators the
//! integration tests draw their data from.
//!
//! # Modules
//!
//! - [`seed`]: Seed resolution
//! - [`replay`]: Per-test seed scope with failure logging
//! - [`generators`]: Visually distinct strings and timestamps

pub mod generators;
pub mod replay;
pub mod seed;

pub use generators::{
    visually_distinct_alphanumeric_char, visually_distinct_alphanumeric_string,
    visually_distinct_alphanumeric_string_in_range, GeneratorError, Timestamp, TimestampGenerator,
    VISUALLY_DISTINCT_ALPHABET,
};
pub use replay::{SeedScope, REPLAY_ERROR_CODE, SCOPE_ID_PREFIX};
pub use seed::{create_rng, SeedProvenance, SeedState};
