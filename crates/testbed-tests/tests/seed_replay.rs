//! Seed resolution logging and failure replay, observed through the logs.

use std::panic;

use pretty_assertions::assert_eq;
use rand::Rng;
use testbed_random::{
    visually_distinct_alphanumeric_string, SeedScope, TimestampGenerator, REPLAY_ERROR_CODE,
};
use testbed_tests::{assert_seed_deterministic, capture_logs, verify_seed_determinism};

#[test]
fn test_seed_resolution_is_logged() {
    let (seed, logs) = capture_logs(|| SeedScope::begin("logged", Some(99)).seed());
    assert_eq!(seed, 99);
    assert!(logs.contains("seed=99"), "logs: {}", logs);
    assert!(logs.contains("configured"), "logs: {}", logs);
}

#[test]
fn test_generated_seed_is_logged_as_generated() {
    let (seed, logs) = capture_logs(|| SeedScope::begin("logged", None).seed());
    assert!(logs.contains(&format!("seed={}", seed)), "logs: {}", logs);
    assert!(logs.contains("generated"), "logs: {}", logs);
}

#[test]
fn test_scope_resolution_logs_one_line() {
    let ((id, seed), logs) = capture_logs(|| {
        let scope = SeedScope::begin("logged_once", None);
        (scope.id().to_string(), scope.seed())
    });
    let lines: Vec<&str> = logs.lines().filter(|line| line.contains("seed")).collect();
    assert_eq!(lines.len(), 1, "logs: {}", logs);
    assert!(lines[0].contains(&id));
    assert!(lines[0].contains(&format!("seed={}", seed)));
    assert!(lines[0].contains("provenance=generated"));
}

#[test]
fn test_failed_test_logs_replay_line() {
    let (result, logs) = capture_logs(|| {
        panic::catch_unwind(|| {
            let mut scope = SeedScope::begin("test_fails_on_purpose", Some(-8675309));
            let _: u32 = scope.rng().gen();
            panic!("simulated test failure");
        })
    });
    assert!(result.is_err());

    let replay_line = logs
        .lines()
        .find(|line| line.contains(REPLAY_ERROR_CODE))
        .unwrap_or_else(|| panic!("no replay line in logs: {}", logs));
    assert!(replay_line.contains("ERROR"));
    assert!(replay_line.contains("Test test_fails_on_purpose failed using seed=-8675309"));
}

#[test]
fn test_passing_test_logs_no_replay_line() {
    let ((), logs) = capture_logs(|| {
        let mut scope = SeedScope::begin("test_passes", Some(1));
        let _: u32 = scope.rng().gen();
    });
    assert!(!logs.contains(REPLAY_ERROR_CODE), "logs: {}", logs);
}

#[test]
fn test_generators_are_deterministic_per_seed() {
    let generator = TimestampGenerator::default();
    assert_seed_deterministic(20240601, 4, |state| {
        let name = visually_distinct_alphanumeric_string(state.rng(), 16);
        let stamps: Vec<_> = (0..10)
            .map(|_| (generator.sample(state.rng()), generator.edge_case(state.rng())))
            .collect();
        (name, stamps)
    });
}

#[test]
fn test_different_seeds_give_different_data() {
    let a = verify_seed_determinism(1, 1, |state| {
        visually_distinct_alphanumeric_string(state.rng(), 32)
    });
    let b = verify_seed_determinism(2, 1, |state| {
        visually_distinct_alphanumeric_string(state.rng(), 32)
    });
    assert_ne!(a.first, b.first);
}
