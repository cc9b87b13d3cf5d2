//! A failing run's logged seed reproduces the run's data.

use pretty_assertions::assert_eq;
use testbed_random::{
    visually_distinct_alphanumeric_string, SeedScope, Timestamp, TimestampGenerator,
};

fn draw(scope: &mut SeedScope) -> (String, Vec<Timestamp>) {
    let gen = TimestampGenerator::default();
    let name = visually_distinct_alphanumeric_string(scope.rng(), 12);
    let stamps = (0..8)
        .map(|i| {
            if i % 2 == 0 {
                gen.sample(scope.rng())
            } else {
                gen.edge_case(scope.rng())
            }
        })
        .collect();
    (name, stamps)
}

#[test]
fn test_generated_seed_replays_identically() {
    let mut first = SeedScope::begin("first", None);
    let original = draw(&mut first);

    let mut replay = SeedScope::begin("replay", Some(first.seed()));
    assert_eq!(draw(&mut replay), original);
    assert_eq!(replay.state().configured_seed(), Some(first.seed()));
}

#[test]
fn test_panicking_test_still_reports_seed() {
    let seed = std::panic::catch_unwind(|| {
        let mut scope = SeedScope::begin("fails", Some(2024));
        let _ = draw(&mut scope);
        assert!(scope.replay_message().contains("seed=2024"));
        panic!("assertion in test body");
    });
    assert!(seed.is_err());
}
