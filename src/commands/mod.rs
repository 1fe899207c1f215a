//! Command handlers for the `bp` binary
//!
//! Each handler loads what it needs, runs one use case and renders the
//! result. The returned exit code is the process exit code.

pub mod api;
pub mod build;
pub mod new;

use std::path::Path;

use anyhow::{Context, Result};

use blueprintui::config::{self, ConfigWarning, CONFIG_ENV};
use blueprintui::{BuildMode, ProjectContext};

use crate::ui::blocks::warning::render_warning;
use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;

/// Resolve the config file, export it and the mode, then load the project.
///
/// Config paths are relative to the working directory. The pipeline reads
/// both values back from the environment like any other consumer would.
pub(crate) fn prepare_project(
    config: Option<&Path>,
    mode: BuildMode,
    ui: &UiContext,
) -> Result<ProjectContext> {
    let root = std::env::current_dir().context("failed to read the working directory")?;
    let config_file = config::resolve_config_path(&root, config)?;

    std::env::set_var(
        CONFIG_ENV,
        config_file
            .as_deref()
            .map(|p| p.as_os_str().to_owned())
            .unwrap_or_default(),
    );
    std::env::set_var(BuildMode::ENV_VAR, mode.as_str());

    let (project, warnings) = config::load_from_env(&root)?;
    for warning in &warnings {
        report_config_warning(warning, ui);
    }
    Ok(project)
}

fn config_warning_message(warning: &ConfigWarning) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    match &warning.suggestion {
        Some(suggestion) => format!(
            "unknown config key '{}' in {} (did you mean '{}'?)",
            warning.key, location, suggestion
        ),
        None => format!("unknown config key '{}' in {}", warning.key, location),
    }
}

fn report_config_warning(warning: &ConfigWarning, ui: &UiContext) {
    let message = config_warning_message(warning);
    log::debug!("config warning: {}", message);

    if ui.json {
        let event = serde_json::json!({
            "event": "warning",
            "kind": "config",
            "key": warning.key,
            "file": warning.file.display().to_string(),
            "line": warning.line,
            "message": message,
        });
        if let Err(e) = crate::ui::json::emit(event) {
            log::error!("failed to write JSON warning event: {}", e);
        }
        return;
    }

    if ui.annotate() {
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Warning,
                &message,
                Some(&warning.file.display().to_string()),
                Some("bp config"),
            )
        );
    }
    eprint!("{}", render_warning(&message, ui.color, ui.unicode));
}
