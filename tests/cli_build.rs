//! `bp build` end to end

mod common;

use std::fs;
use std::path::Path;

use common::{json_lines, TestLibrary};

fn files_under(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

#[test]
fn build_writes_preserved_modules_assets_and_manifest() {
    let lib = TestLibrary::new();
    let result = lib.run(&["build"]);

    assert!(result.success, "build failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("Building..."), "{}", result.stdout);
    assert!(result.stdout.contains("Success in "), "{}", result.stdout);
    assert!(result.stdout.contains(" seconds 🎉"), "{}", result.stdout);

    assert_eq!(
        files_under(&lib.path("dist")),
        vec![
            "README.md",
            "alert/element.css.js",
            "alert/element.js",
            "alert/index.js",
            "custom-elements.json",
            "include/alert.js",
            "package.json",
        ]
    );
}

#[test]
fn typescript_non_null_division_builds() {
    let lib = TestLibrary::new();
    lib.write(
        "src/alert/element.ts",
        &common::ALERT_ELEMENT.replace(
            "  render() {",
            "  get half() {\n    return this.getBoundingClientRect().height! / 2;\n  }\n\n  render() {",
        ),
    );
    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(lib.read("dist/alert/element.js").contains("height!"));
}

#[test]
fn published_package_json_drops_development_keys() {
    let lib = TestLibrary::new();
    lib.write(
        "package.json",
        r#"{
  "name": "@acme/ui",
  "version": "2.3.0",
  "type": "module",
  "scripts": { "build": "bp build" },
  "devDependencies": { "typescript": "^5.4.0" },
  "dependencies": { "lit": "^3.1.0" }
}
"#,
    );
    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());

    let published: serde_json::Value =
        serde_json::from_str(&lib.read("dist/package.json")).unwrap();
    let keys: Vec<&str> = published
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["name", "version", "type", "dependencies"]);
    assert!(lib.read("package.json").contains("devDependencies"));
}

#[test]
fn production_build_rewrites_assertions_and_inlines_version() {
    let lib = TestLibrary::new();
    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());

    let element = lib.read("dist/alert/element.js");
    assert!(element.contains("'./element.css.js'"), "{}", element);
    assert!(!element.contains("with {"), "{}", element);
    assert!(element.contains("'2.3.0'"), "{}", element);
    assert!(!element.contains("PACKAGE_VERSION"), "{}", element);
    assert!(!element.contains("slot for the message"), "{}", element);

    let styles = lib.read("dist/alert/element.css.js");
    assert!(styles.contains("new CSSStyleSheet()"), "{}", styles);
    assert!(styles.contains("export default sheet"), "{}", styles);
    assert!(!styles.contains("  display: block"), "{}", styles);
}

#[test]
fn production_build_cleans_stale_output() {
    let lib = TestLibrary::new();
    lib.write("dist/stale.js", "export {};");

    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(!lib.exists("dist/stale.js"));
}

#[test]
fn manifest_paths_are_relative_to_the_source_root() {
    let lib = TestLibrary::new();
    assert!(lib.run(&["build"]).success);

    let manifest: serde_json::Value =
        serde_json::from_str(&lib.read("dist/custom-elements.json")).unwrap();
    let paths: Vec<&str> = manifest["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["path"].as_str().unwrap())
        .collect();

    assert!(paths.contains(&"alert/element.js"), "{:?}", paths);
    assert!(paths.iter().all(|p| !p.starts_with("src/")), "{:?}", paths);
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn unresolved_import_fails_with_exit_code_one() {
    let lib = TestLibrary::new();
    lib.write("src/alert/index.ts", "export * from './missing.js';\n");

    let result = lib.run(&["build"]);
    assert!(!result.success);
    assert_eq!(result.exit_code, Some(1));
    assert!(result.stderr.contains("Compilation error"), "{}", result.stderr);
    assert!(result.stderr.contains("./missing.js"), "{}", result.stderr);
    assert!(!result.stdout.contains("Success in"), "{}", result.stdout);
}

#[test]
fn explicit_missing_config_is_a_configuration_error() {
    let lib = TestLibrary::new();
    let result = lib.run(&["build", "--config", "nope.toml"]);

    assert_eq!(result.exit_code, Some(1));
    assert!(result.stderr.contains("Configuration error"), "{}", result.stderr);
    assert!(result.stderr.contains("nope.toml"), "{}", result.stderr);
    assert!(!lib.exists("dist"));
}

#[test]
fn explicit_config_path_is_used() {
    let lib = TestLibrary::new();
    let custom = common::CONFIG.replace("[library]\n", "[library]\nout_dir = \"./build\"\n");
    lib.write("config/lib.toml", &custom);

    let result = lib.run(&["build", "--config", "config/lib.toml"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(lib.exists("build/alert/element.js"));
    assert!(!lib.exists("dist"));
}

#[test]
fn unknown_config_key_warns_but_builds() {
    let lib = TestLibrary::new();
    lib.write(
        "blueprint.config.toml",
        &common::CONFIG.replace("[library]\n", "[library]\nout_dri = \"./out\"\n"),
    );

    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("out_dri"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'out_dir'"), "{}", result.stderr);
}

#[test]
fn json_output_is_ndjson_events() {
    let lib = TestLibrary::new();
    let result = lib.run(&["build", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events = json_lines(&result.stdout);
    let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(names.first(), Some(&"start"));
    assert_eq!(names.last(), Some(&"complete"));
    assert!(events.iter().all(|e| e["command"] == "build"));

    let complete = events.last().unwrap();
    assert_eq!(complete["cycle"], 1);
    assert_eq!(complete["modules"], 4);
    assert_eq!(complete["written"], 4);
    assert_eq!(complete["suppressed"], 0);
}

#[test]
fn json_failure_reports_error_event() {
    let lib = TestLibrary::new();
    lib.write("src/alert/index.ts", "import './missing.js';\n");

    let result = lib.run(&["build", "--json"]);
    assert_eq!(result.exit_code, Some(1));
    let events = json_lines(&result.stdout);
    let error = events
        .iter()
        .find(|e| e["event"] == "error")
        .unwrap_or_else(|| panic!("no error event in {}", result.stdout));
    assert!(error["message"].as_str().unwrap().contains("missing.js"));
}

#[test]
fn unlisted_bare_import_is_a_warning() {
    let lib = TestLibrary::new();
    lib.write(
        "src/alert/index.ts",
        "import 'tslib';\nexport * from './element.js';\n",
    );

    let result = lib.run(&["build"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("'tslib'"), "{}", result.stderr);
    assert!(result.stderr.contains("externals"), "{}", result.stderr);
}
