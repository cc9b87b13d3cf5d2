//! End-to-end tests of the `testbed` binary.

use pretty_assertions::assert_eq;
use serde_json::Value;
use testbed_tests::TestHarness;

fn harness() -> TestHarness {
    TestHarness::new(env!("CARGO_BIN_EXE_testbed"))
}

#[test]
fn test_resolve_json_reports_innermost_values() {
    let h = harness();
    h.tree.write("", "firestore.backend=prod\nrandomSeed=5\n");
    h.tree.write("app", "firestore.backend=nightly\nfirestore.debugLogging=true\n");

    let result = h.resolve_json("app");
    result.assert_success();

    let json: Value = result.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["sources"].as_array().unwrap().len(), 2);
    assert_eq!(json["settings"]["backend"], "nightly");
    assert_eq!(json["debug_logging"], true);
    assert_eq!(json["random_seed"], 5);
    assert_eq!(
        json["connection"]["host_override"],
        "test-firestore.sandbox.googleapis.com"
    );
}

#[test]
fn test_resolve_json_reports_invalid_settings() {
    let h = harness();
    h.tree.write("", "firestore.backend=ftp://abc:123\nrandomSeed=lots\n");

    let result = h.resolve_json("");
    result.assert_failure();

    let json: Value = result.json();
    assert_eq!(json["success"], false);
    let codes: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["byvy24fapz", "czxrnfyzja"]);
}

#[test]
fn test_resolve_env_overrides_files() {
    let h = harness();
    h.tree.write("", "firestore.backend=prod\n");
    let dir = h.path().to_str().unwrap().to_string();

    let result = h.run_cli_with_env(
        &["resolve", "--dir", &dir, "--env", "--json"],
        &[("TESTBED_FIRESTORE_BACKEND", "staging")],
    );
    result.assert_success();
    let json: Value = result.json();
    assert_eq!(json["settings"]["backend"], "staging");
    assert_eq!(json["sources"][0], "environment");

    let ignored = h.run_cli_with_env(
        &["resolve", "--dir", &dir, "--json"],
        &[("TESTBED_FIRESTORE_BACKEND", "staging")],
    );
    assert_eq!(ignored.json::<Value>()["settings"]["backend"], "prod");
}

#[test]
fn test_export_prints_resource_entries() {
    let h = harness();
    h.tree.write("", "randomSeed = 17 \n");
    let dir = h.path().to_str().unwrap().to_string();

    let result = h.run_cli(&["export", "--dir", &dir]);
    result.assert_success();
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["firestoreBackend=", "firestoreDebugLogging=", "randomSeed=17"]
    );
}

#[test]
fn test_backend_command() {
    let h = harness();

    let ok = h.run_cli(&["backend", "emulator:a.b.c:9987", "--json"]);
    ok.assert_success();
    let json: Value = ok.json();
    assert_eq!(json["kind"], "emulator");
    assert_eq!(json["connection"]["emulator_host"], "a.b.c");
    assert_eq!(json["connection"]["emulator_port"], 9987);

    let bad = h.run_cli(&["backend", "http://?a=42", "--json"]);
    bad.assert_failure();
    assert_eq!(bad.json::<Value>()["errors"][0]["code"], "jzh9kbyhaf");
}

#[test]
fn test_backend_human_output_names_code() {
    let h = harness();
    let result = h.run_cli(&["backend", "ftp://abc:123"]);
    result.assert_failure();
    assert!(result.stdout.contains("byvy24fapz"), "stdout: {}", result.stdout);
}

#[test]
fn test_seed_command_is_reproducible() {
    let h = harness();
    let a = h.run_cli(&["seed", "--seed", "-3", "--count", "4", "--json"]);
    let b = h.run_cli(&["seed", "--seed", "-3", "--count", "4", "--json"]);
    a.assert_success();
    b.assert_success();

    let a: Value = a.json();
    let b: Value = b.json();
    assert_eq!(a, b);
    assert_eq!(a["provenance"], "configured");
    assert_eq!(a["draws"].as_array().unwrap().len(), 4);
}

#[test]
fn test_log_level_writes_to_stderr() {
    let h = harness();
    let result = h.run_cli(&["--log-level", "info", "seed", "--seed", "1", "--json"]);
    result.assert_success();
    assert!(result.stderr.contains("resolved random seed"), "stderr: {}", result.stderr);
    let _: Value = result.json();
}

#[test]
fn test_missing_directory_is_not_an_error() {
    let h = harness();
    let missing = h.path().join("does/not/exist");
    let result = h.run_cli(&["resolve", "--dir", missing.to_str().unwrap(), "--json"]);
    result.assert_success();
}
