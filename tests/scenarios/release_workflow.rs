//! Scenario: From scaffold to release
//!
//! Journey: A developer starts a new library and ships an API change.
//!
//! Steps:
//! 1. `bp new` scaffolds the library
//! 2. `bp api --update` records the initial API
//! 3. `bp build` produces the distributable
//! 4. The developer adds a property; `bp api --test` catches it
//! 5. `bp api --update` accepts it and the next build matches the lockfile
//!
//! Success Criteria:
//! - The scaffold builds without edits beyond the compiler choice
//! - The lockfile always equals the shipped manifest after an update
//! - API changes are never accepted silently

use std::fs;

use crate::common::*;

const LIBRARY: &str = "acme-ui";

/// The scaffold defaults to esbuild; swap in the passthrough so the
/// scenario needs no node toolchain.
fn use_passthrough_compiler(root: &std::path::Path) {
    let path = root.join("blueprint.config.toml");
    let config = fs::read_to_string(&path).unwrap();
    let config: String = config
        .lines()
        .map(|line| {
            if line.starts_with("compiler") {
                "compiler = []"
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&path, config).unwrap();
}

/// SCENARIO: scaffold, lock, build, change, catch, accept
#[test]
fn scenario_scaffold_to_release() {
    let workspace = TestLibrary::empty();

    let result = workspace.run(&["new", LIBRARY]);
    assert!(result.success, "new failed: {}", result.combined_output());
    let root = workspace.path(LIBRARY);
    use_passthrough_compiler(&root);

    let result = run_in(&root, &["api", "--update"]);
    assert!(result.success, "update failed: {}", result.combined_output());

    let result = run_in(&root, &["build"]);
    assert!(result.success, "build failed: {}", result.combined_output());
    assert!(result.stdout.contains("Success in"), "{}", result.stdout);

    let lock = fs::read_to_string(root.join("custom-elements.lock.json")).unwrap();
    let shipped = fs::read_to_string(root.join("dist/custom-elements.json")).unwrap();
    assert_eq!(lock, shipped, "lockfile and shipped manifest diverged");
    assert!(root.join("dist/alert/element.css.js").exists());
    assert!(root.join("dist/package.json").exists());

    // Step 4: an API change
    let element_path = root.join("src/alert/element.ts");
    let element = fs::read_to_string(&element_path).unwrap();
    let changed = element.replace(
        "  /** show a close button */",
        "  /** compact layout */\n  @property({ type: Boolean }) compact = false;\n\n  /** show a close button */",
    );
    assert_ne!(element, changed);
    fs::write(&element_path, changed).unwrap();

    let result = run_in(&root, &["api", "--test"]);
    assert_eq!(result.exit_code, Some(1), "{}", result.combined_output());
    assert!(result.stderr.contains("compact"), "{}", result.stderr);

    // A build alone does not touch the lockfile
    assert!(run_in(&root, &["build"]).success);
    assert_eq!(
        fs::read_to_string(root.join("custom-elements.lock.json")).unwrap(),
        lock
    );

    // Step 5: accept
    assert!(run_in(&root, &["api", "--update"]).success);
    let result = run_in(&root, &["api", "--test"]);
    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        fs::read_to_string(root.join("custom-elements.lock.json")).unwrap(),
        fs::read_to_string(root.join("dist/custom-elements.json")).unwrap()
    );
}

/// SCENARIO: a broken edit fails the build, fixing it recovers
#[test]
fn scenario_broken_edit_then_fix() {
    let lib = TestLibrary::new();
    assert!(lib.run(&["build"]).success);

    lib.write(
        "src/alert/index.ts",
        "export * from './element.js';\nexport * from './missing.js';\n",
    );
    let result = lib.run(&["build"]);
    assert_eq!(result.exit_code, Some(1));
    assert!(result.stderr.contains("missing.js"), "{}", result.stderr);

    lib.write("src/alert/index.ts", ALERT_INDEX);
    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(lib.exists("dist/alert/element.js"));
}
