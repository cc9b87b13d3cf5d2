//! Failure replay for seeded tests.
//!
//! A [`SeedScope`] wraps the [`SeedState`] for one test. If the test panics
//! while the scope is alive, dropping the scope logs the seed the test ran
//! with, so the failure can be reproduced by configuring that seed.

use rand_pcg::Pcg32;
use tracing::{error, info};

use crate::generators::visually_distinct_alphanumeric_string;
use crate::seed::{SeedProvenance, SeedState};

/// Error code attached to the replay line of a failed test.
pub const REPLAY_ERROR_CODE: &str = "gdp3vxstxx";

/// Prefix of every scope id.
pub const SCOPE_ID_PREFIX: &str = "rsr";

const SCOPE_ID_SUFFIX_LEN: usize = 10;

/// Seed state for a single test, with replay logging on failure.
///
/// # Example
/// ```
/// use rand::Rng;
/// use testbed_random::SeedScope;
///
/// let mut scope = SeedScope::begin("test_round_trip", Some(42));
/// let value: u32 = scope.rng().gen();
/// assert_eq!(scope.seed(), 42);
/// # let _ = value;
/// ```
#[derive(Debug)]
pub struct SeedScope {
    id: String,
    test_name: String,
    state: SeedState,
}

impl SeedScope {
    /// Resolves the seed for `test_name` and logs one line with the scope id,
    /// the seed and its provenance.
    pub fn begin(test_name: impl Into<String>, configured_seed: Option<i64>) -> Self {
        let id = format!(
            "{}{}",
            SCOPE_ID_PREFIX,
            visually_distinct_alphanumeric_string(&mut rand::thread_rng(), SCOPE_ID_SUFFIX_LEN)
        );
        let state = SeedState::resolve_unlogged(configured_seed);
        let seed = state.seed();
        let provenance = state.provenance();
        match provenance {
            SeedProvenance::Configured => {
                info!(seed, %provenance, "[{}] Using configured seed: {}", id, seed)
            }
            SeedProvenance::Generated => {
                info!(seed, %provenance, "[{}] Using randomly generated seed: {}", id, seed)
            }
        }
        Self {
            id,
            test_name: test_name.into(),
            state,
        }
    }

    /// The scope id: `rsr` followed by ten visually distinct characters.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the test this scope belongs to.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// The seed the test runs with.
    pub fn seed(&self) -> i64 {
        self.state.seed()
    }

    /// The underlying seed state.
    pub fn state(&self) -> &SeedState {
        &self.state
    }

    /// The test's generator.
    pub fn rng(&mut self) -> &mut Pcg32 {
        self.state.rng()
    }

    /// The line logged when the test fails.
    pub fn replay_message(&self) -> String {
        format!(
            "[{}] Test {} failed using seed={} (error code {})",
            self.id,
            self.test_name,
            self.seed(),
            REPLAY_ERROR_CODE
        )
    }
}

impl Drop for SeedScope {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!("{}", self.replay_message());
        }
    }
}
