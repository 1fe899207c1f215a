//! Scenario: API drift gate in CI
//!
//! Journey: A pull request changes a component's API without updating the
//! lockfile. The CI job runs `bp api --test` on GitHub Actions.
//!
//! Success Criteria:
//! - The job fails with exit code 1
//! - A workflow annotation points at the lockfile
//! - NDJSON mode stays machine readable

use crate::common::*;

const GITHUB: &[(&str, &str)] = &[("CI", "true"), ("GITHUB_ACTIONS", "true")];

fn drifted_library() -> TestLibrary {
    let lib = TestLibrary::new();
    assert!(lib.run(&["api", "--update"]).success);
    lib.write(
        "src/alert/element.ts",
        &ALERT_ELEMENT.replace("@slot - alert content", "@slot - alert content\n * @cssprop --alert-color"),
    );
    lib
}

/// SCENARIO: drift on GitHub Actions produces an error annotation
#[test]
fn scenario_drift_annotates_lockfile() {
    let lib = drifted_library();
    let result = run_with_env(lib.root(), &["api", "--test"], GITHUB);

    assert_eq!(result.exit_code, Some(1));
    assert!(
        result
            .stdout
            .contains("::error file=custom-elements.lock.json,title=bp api::"),
        "{}",
        result.stdout
    );
    assert!(result.stderr.contains("--alert-color"), "{}", result.stderr);
}

/// SCENARIO: an up-to-date lockfile passes quietly on CI
#[test]
fn scenario_clean_lockfile_passes() {
    let lib = TestLibrary::new();
    assert!(lib.run(&["api", "--update"]).success);

    let result = run_with_env(lib.root(), &["api", "--test"], GITHUB);
    assert!(result.success, "{}", result.combined_output());
    assert!(!result.stdout.contains("::error"), "{}", result.stdout);
}

/// SCENARIO: NDJSON output carries no annotations
#[test]
fn scenario_json_mode_is_pure_ndjson() {
    let lib = drifted_library();
    let result = run_with_env(lib.root(), &["api", "--test", "--json"], GITHUB);

    assert_eq!(result.exit_code, Some(1));
    let events = json_lines(&result.stdout);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["status"], "drifted");
    assert!(events[0]["additions"].as_u64().unwrap() > 0);
}

/// SCENARIO: a build failure on CI becomes an error annotation
#[test]
fn scenario_build_failure_annotates() {
    let lib = TestLibrary::new();
    lib.write("src/alert/index.ts", "import './missing.js';\n");

    let result = run_with_env(lib.root(), &["build"], GITHUB);
    assert_eq!(result.exit_code, Some(1));
    assert!(result.stdout.contains("::error"), "{}", result.stdout);
}
