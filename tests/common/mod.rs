//! Shared helpers for `bp` integration tests.
//!
//! `TestLibrary` lays out a small component library in a temp directory and
//! runs the real binary against it. The fixture config sets `compiler = []`
//! so tests never depend on an installed transpiler.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub const PACKAGE_JSON: &str = r#"{
  "name": "@acme/ui",
  "version": "2.3.0",
  "type": "module"
}
"#;

pub const CONFIG: &str = r#"[library]
entry_points = ["./src/**/index.ts", "./src/include/*.ts"]
externals = ["lit", "@acme/ui/"]
assets = ["./README.md"]

[bundler]
compiler = []
"#;

pub const ALERT_INDEX: &str = "export * from './element.js';\n";

pub const ALERT_ELEMENT: &str = r#"import { html, LitElement } from 'lit';
import styles from './element.css' with { type: 'css' };

/**
 * Alert
 *
 * @element ui-alert
 * @since 1.0.0
 * @slot - alert content
 */
export class Alert extends LitElement {
  static styles = [styles];

  static version = 'PACKAGE_VERSION';

  /** visual status of the alert */
  status: 'success' | 'warning' | 'danger' = 'success';

  render() {
    // slot for the message
    return html`
      <div class="alert">
        <slot></slot>
      </div>
    `;
  }
}
"#;

pub const ALERT_CSS: &str = ":host {\n  display: block;\n  color: red;\n}\n";

pub const INCLUDE_ALERT: &str = r#"import { Alert } from '@acme/ui/alert/index.js';

customElements.get('ui-alert') || customElements.define('ui-alert', Alert);
"#;

/// Result of one `bp` invocation
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestLibrary {
    pub dir: TempDir,
}

impl TestLibrary {
    /// Empty directory, nothing written
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The standard fixture library
    pub fn new() -> Self {
        let lib = Self::empty();
        lib.write("package.json", PACKAGE_JSON);
        lib.write("README.md", "# @acme/ui\n");
        lib.write("blueprint.config.toml", CONFIG);
        lib.write("src/alert/index.ts", ALERT_INDEX);
        lib.write("src/alert/element.ts", ALERT_ELEMENT);
        lib.write("src/alert/element.css", ALERT_CSS);
        lib.write("src/include/alert.ts", INCLUDE_ALERT);
        lib
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        run_in(self.root(), args)
    }
}

/// Run `bp` in `cwd` with a clean, colorless environment
pub fn run_in(cwd: &Path, args: &[&str]) -> TestResult {
    run_with_env(cwd, args, &[])
}

/// Like [`run_in`], with extra environment variables set last
pub fn run_with_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> TestResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bp"));
    command
        .current_dir(cwd)
        .args(args)
        .env("NO_COLOR", "1")
        .env("TERM", "dumb")
        .env_remove("RUST_LOG")
        .env_remove("BLUEPRINTUI_CONFIG")
        .env_remove("BLUEPRINTUI_BUILD")
        .env_remove("GITHUB_ACTIONS")
        .env_remove("FORCE_COLOR")
        .env_remove("CI");
    for (key, value) in envs {
        command.env(key, value);
    }
    let output = command.output().expect("failed to run bp");

    TestResult {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Parse NDJSON output into values, one per non-empty line
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l).unwrap_or_else(|e| panic!("bad JSON line {:?}: {}", l, e))
        })
        .collect()
}
