//! Deterministic test-data generators.
//!
//! Every generator draws from a caller-supplied RNG, normally the one owned by
//! a [`SeedState`](crate::SeedState), so outputs are reproducible from the
//! seed alone.

use std::ops::RangeInclusive;

use rand::Rng;
use thiserror::Error;

/// Characters that cannot be confused with one another when read by a human.
///
/// Omits `0`/`o`, `1`/`l`/`i`, and `u` (`v`).
pub const VISUALLY_DISTINCT_ALPHABET: &str = "23456789abcdefghjkmnpqrstvwxyz";

/// Picks one character from [`VISUALLY_DISTINCT_ALPHABET`].
pub fn visually_distinct_alphanumeric_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    let alphabet = VISUALLY_DISTINCT_ALPHABET.as_bytes();
    alphabet[rng.gen_range(0..alphabet.len())] as char
}

/// Generates a string of exactly `len` visually distinct characters.
pub fn visually_distinct_alphanumeric_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| visually_distinct_alphanumeric_char(rng))
        .collect()
}

/// Generates a visually distinct string whose length is drawn from `len`.
///
/// An empty range yields an empty string.
pub fn visually_distinct_alphanumeric_string_in_range<R: Rng + ?Sized>(
    rng: &mut R,
    len: RangeInclusive<usize>,
) -> String {
    if len.is_empty() {
        return String::new();
    }
    let len = rng.gen_range(len);
    visually_distinct_alphanumeric_string(rng, len)
}

/// Errors from constructing a generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// A range is empty or extends outside the representable values.
    #[error("invalid {field} range {start}..={end} (valid range is {min}..={max})")]
    InvalidRange {
        field: &'static str,
        start: i64,
        end: i64,
        min: i64,
        max: i64,
    },
}

/// A point in time with nanosecond precision.
///
/// Seconds are relative to the Unix epoch and restricted to the years
/// 0001 through 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Fraction of the second, in nanoseconds.
    pub nanoseconds: i32,
}

impl Timestamp {
    /// 0001-01-01T00:00:00Z.
    pub const MIN_SECONDS: i64 = -62_135_596_800;
    /// 9999-12-31T23:59:59Z.
    pub const MAX_SECONDS: i64 = 253_402_300_799;
    /// Smallest nanosecond component.
    pub const MIN_NANOSECONDS: i32 = 0;
    /// Largest nanosecond component.
    pub const MAX_NANOSECONDS: i32 = 999_999_999;

    /// Creates a timestamp, returning `None` if either component is out of range.
    pub fn new(seconds: i64, nanoseconds: i32) -> Option<Self> {
        let valid = (Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds)
            && (Self::MIN_NANOSECONDS..=Self::MAX_NANOSECONDS).contains(&nanoseconds);
        valid.then_some(Self {
            seconds,
            nanoseconds,
        })
    }
}

/// Generates [`Timestamp`] values within configurable bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampGenerator {
    seconds: RangeInclusive<i64>,
    nanoseconds: RangeInclusive<i32>,
}

impl Default for TimestampGenerator {
    fn default() -> Self {
        Self {
            seconds: Timestamp::MIN_SECONDS..=Timestamp::MAX_SECONDS,
            nanoseconds: Timestamp::MIN_NANOSECONDS..=Timestamp::MAX_NANOSECONDS,
        }
    }
}

impl TimestampGenerator {
    /// Creates a generator restricted to the given bounds.
    pub fn new(
        seconds: RangeInclusive<i64>,
        nanoseconds: RangeInclusive<i32>,
    ) -> Result<Self, GeneratorError> {
        check_range(
            "seconds",
            *seconds.start(),
            *seconds.end(),
            Timestamp::MIN_SECONDS,
            Timestamp::MAX_SECONDS,
        )?;
        check_range(
            "nanoseconds",
            i64::from(*nanoseconds.start()),
            i64::from(*nanoseconds.end()),
            i64::from(Timestamp::MIN_NANOSECONDS),
            i64::from(Timestamp::MAX_NANOSECONDS),
        )?;
        Ok(Self {
            seconds,
            nanoseconds,
        })
    }

    /// Bounds on the seconds component.
    pub fn seconds(&self) -> &RangeInclusive<i64> {
        &self.seconds
    }

    /// Bounds on the nanoseconds component.
    pub fn nanoseconds(&self) -> &RangeInclusive<i32> {
        &self.nanoseconds
    }

    /// Draws a timestamp uniformly from the bounds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Timestamp {
        Timestamp {
            seconds: rng.gen_range(self.seconds.clone()),
            nanoseconds: rng.gen_range(self.nanoseconds.clone()),
        }
    }

    /// Draws a timestamp with the seconds, the nanoseconds, or both pinned to
    /// a boundary value.
    pub fn edge_case<R: Rng + ?Sized>(&self, rng: &mut R) -> Timestamp {
        let seconds_edges = edges(&self.seconds, 0);
        let nanos_edges = edges(&self.nanoseconds, 0);

        let pick_seconds = |rng: &mut R| seconds_edges[rng.gen_range(0..seconds_edges.len())];
        let pick_nanos = |rng: &mut R| nanos_edges[rng.gen_range(0..nanos_edges.len())];

        match rng.gen_range(0..3) {
            0 => Timestamp {
                seconds: pick_seconds(rng),
                nanoseconds: rng.gen_range(self.nanoseconds.clone()),
            },
            1 => Timestamp {
                seconds: rng.gen_range(self.seconds.clone()),
                nanoseconds: pick_nanos(rng),
            },
            _ => Timestamp {
                seconds: pick_seconds(rng),
                nanoseconds: pick_nanos(rng),
            },
        }
    }
}

fn check_range(
    field: &'static str,
    start: i64,
    end: i64,
    min: i64,
    max: i64,
) -> Result<(), GeneratorError> {
    if start > end || start < min || end > max {
        return Err(GeneratorError::InvalidRange {
            field,
            start,
            end,
            min,
            max,
        });
    }
    Ok(())
}

/// Boundary values of a range: both ends, plus `zero` when it lies inside.
fn edges<T: Copy + PartialOrd>(range: &RangeInclusive<T>, zero: T) -> Vec<T> {
    let mut out = vec![*range.start()];
    if range.end() != range.start() {
        out.push(*range.end());
    }
    if range.contains(&zero) && !out.contains(&zero) {
        out.push(zero);
    }
    out
}
