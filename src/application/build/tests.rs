//! Tests for the build controller

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use tempfile::tempdir;

use super::*;
use crate::application::pipeline::{standard_phases, BuildJob, Toolchain};
use crate::config::ProjectContext;
use crate::domain::ports::ChangeSource;
use crate::domain::value_objects::BuildMode;
use crate::error::BuildResult;
use crate::infrastructure::compiler::PassthroughTranspiler;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::minify::{CssMinifier, HtmlLiteralMinifier, WhitespaceJsMinifier};

/// Replays scripted batches, applying each batch's edits first
struct ScriptedChanges {
    batches: VecDeque<Vec<(PathBuf, String)>>,
}

impl ChangeSource for ScriptedChanges {
    fn next_batch(&mut self, _running: &AtomicBool) -> BuildResult<Option<Vec<PathBuf>>> {
        Ok(self.batches.pop_front().map(|batch| {
            batch
                .into_iter()
                .map(|(path, contents)| {
                    fs::write(&path, contents).unwrap();
                    path
                })
                .collect()
        }))
    }
}

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn controller(root: &Path, mode: BuildMode) -> BuildController {
    let project = ProjectContext::with_defaults(root, mode);
    let toolchain = Toolchain {
        transpiler: Box::new(PassthroughTranspiler),
        css_minifier: Box::new(CssMinifier),
        js_minifier: Box::new(WhitespaceJsMinifier),
        html_minifier: Box::new(HtmlLiteralMinifier),
        type_checker: None,
    };
    let phases = standard_phases(&project, toolchain);
    BuildController::new(BuildJob::new(project, Box::new(LocalFs::new()), phases))
}

fn kinds(events: &[BuildEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            BuildEvent::WatchStarted { .. } => "watch_started",
            BuildEvent::FileChanged { .. } => "file_changed",
            BuildEvent::Start { .. } => "start",
            BuildEvent::Warning { .. } => "warning",
            BuildEvent::Error { .. } => "error",
            BuildEvent::Complete { .. } => "complete",
            BuildEvent::Shutdown => "shutdown",
        })
        .collect()
}

#[test]
fn run_once_success_updates_state() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/button/index.ts", "export class Button {}\n");
    let mut controller = controller(dir.path(), BuildMode::Production);

    let outcome = controller.run_once().unwrap();

    assert!(outcome.is_success());
    assert_eq!(controller.state(), BuildState::Success);
    assert_eq!(controller.job().open_handles(), 0);
    assert!(dir.path().join("dist/button/index.js").exists());
}

#[test]
fn run_once_failure_reports_error() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/button/index.ts", "import './gone.js';\n");
    let mut controller = controller(dir.path(), BuildMode::Production);

    let outcome = controller.run_once().unwrap();

    assert!(!outcome.is_success());
    assert_eq!(controller.state(), BuildState::Failed);
    assert!(!dir.path().join("dist/custom-elements.json").exists());
}

#[test]
fn watch_survives_a_failing_cycle() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "src/button/index.ts", "export class Button {}\n");
    let mut controller = controller(dir.path(), BuildMode::Development);
    let mut changes = ScriptedChanges {
        batches: VecDeque::from(vec![
            vec![(index.clone(), "import './gone.js';\n".to_string())],
            vec![(index.clone(), "export class Button { size = 'sm'; }\n".to_string())],
        ]),
    };

    let running = AtomicBool::new(true);
    let mut events = Vec::new();
    controller
        .watch(&running, &mut changes, |e| events.push(e))
        .unwrap();

    assert_eq!(
        kinds(&events),
        vec![
            "watch_started",
            "start",
            "complete",
            "file_changed",
            "start",
            "error",
            "file_changed",
            "start",
            "complete",
            "shutdown",
        ]
    );
    assert_eq!(controller.job().open_handles(), 0);
    assert_eq!(controller.job().cycles(), 3);
    let emitted = fs::read_to_string(dir.path().join("dist/button/index.js")).unwrap();
    assert!(emitted.contains("size"));
}

#[test]
fn unchanged_rebuild_writes_nothing() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "src/button/index.ts", "export class Button {}\n");
    let mut controller = controller(dir.path(), BuildMode::Development);
    let mut changes = ScriptedChanges {
        batches: VecDeque::from(vec![vec![(index, "export class Button {}\n".to_string())]]),
    };

    let running = AtomicBool::new(true);
    let mut events = Vec::new();
    controller
        .watch(&running, &mut changes, |e| events.push(e))
        .unwrap();

    let written: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            BuildEvent::Complete { written, .. } => Some(*written),
            _ => None,
        })
        .collect();
    assert_eq!(written, vec![1, 0]);
}

#[test]
fn state_rejects_overlapping_cycles() {
    let mut state = BuildState::Idle;
    state.begin().unwrap();
    assert!(state.is_building());
    assert!(state.begin().is_err());
    state.finish(false);
    assert_eq!(state, BuildState::Failed);
    assert!(state.begin().is_ok());
}

#[test]
fn event_json_carries_command() {
    let json = BuildEvent::Complete {
        cycle: 2,
        duration_ms: 15,
        modules: 4,
        written: 1,
        suppressed: 3,
    }
    .to_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["event"], "complete");
    assert_eq!(value["command"], "build");
    assert_eq!(value["suppressed"], 3);
}
