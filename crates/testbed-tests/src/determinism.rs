//! Checking that a seed reproduces generated data.
//!
//! # Example
//!
//! ```
//! use rand::Rng;
//! use testbed_tests::verify_seed_determinism;
//!
//! let result = verify_seed_determinism(42, 3, |state| state.rng().gen::<u64>());
//! assert!(result.is_deterministic());
//! ```

use std::fmt::Debug;

use testbed_random::SeedState;

/// Result of running a generator several times from the same seed.
#[derive(Debug, Clone)]
pub struct SeedDeterminism<T> {
    /// The seed every run started from.
    pub seed: i64,
    /// Number of runs performed.
    pub runs: usize,
    /// Output of the first run.
    pub first: T,
    /// The first run (0-indexed) whose output differed, with that output.
    pub mismatch: Option<(usize, T)>,
}

impl<T> SeedDeterminism<T> {
    /// Whether every run matched the first.
    pub fn is_deterministic(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Runs `generate` `runs` times, each from a fresh [`SeedState`] configured
/// with `seed`, and compares every output with the first.
pub fn verify_seed_determinism<T, F>(seed: i64, runs: usize, mut generate: F) -> SeedDeterminism<T>
where
    T: PartialEq,
    F: FnMut(&mut SeedState) -> T,
{
    let runs = runs.max(1);
    let first = generate(&mut SeedState::resolve(Some(seed)));
    let mismatch = (1..runs).find_map(|run| {
        let output = generate(&mut SeedState::resolve(Some(seed)));
        (output != first).then_some((run, output))
    });
    SeedDeterminism {
        seed,
        runs,
        first,
        mismatch,
    }
}

/// Panics with both outputs if `generate` is not deterministic for `seed`.
#[track_caller]
pub fn assert_seed_deterministic<T, F>(seed: i64, runs: usize, generate: F)
where
    T: PartialEq + Debug,
    F: FnMut(&mut SeedState) -> T,
{
    let result = verify_seed_determinism(seed, runs, generate);
    if let Some((run, output)) = &result.mismatch {
        panic!(
            "seed {} produced different output on run {}:\n  first: {:?}\n  run {}: {:?}",
            seed, run, result.first, run, output
        );
    }
}
