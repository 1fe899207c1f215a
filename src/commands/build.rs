//! `bp build [--watch]`

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use blueprintui::presentation::factory;
use blueprintui::{BuildEvent, BuildMode, BuildOutcome};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::error::print_error;
use crate::ui::views::build::{render_watch_header, BuildEventView};

use super::prepare_project;

pub fn cmd_build(config: Option<&Path>, watch: bool, ui: &UiContext) -> Result<ExitCode> {
    let mode = if watch {
        BuildMode::Development
    } else {
        BuildMode::Production
    };
    let project = prepare_project(config, mode, ui)?;
    let view = BuildEventView {
        watch,
        verbose: ui.verbose > 0,
        supports_color: ui.color,
        supports_unicode: ui.unicode,
    };

    if watch {
        return run_watch(project, &view, ui);
    }

    let mut controller = factory::create_build_controller(project)?;
    let outcome = controller.run_once_reporting(|event| {
        // The failure is rendered in full below.
        if !ui.json && matches!(event, BuildEvent::Error { .. }) {
            return;
        }
        report(&event, None, &view, ui);
    })?;

    match outcome {
        BuildOutcome::Success { .. } => Ok(ExitCode::SUCCESS),
        BuildOutcome::Failed { error, .. } => {
            if !ui.json {
                print_error(&anyhow::Error::new(error), ui);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Rebuild on every change until Ctrl+C. A failing cycle is reported and
/// the session keeps going.
fn run_watch(
    project: blueprintui::ProjectContext,
    view: &BuildEventView,
    ui: &UiContext,
) -> Result<ExitCode> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("failed to install the Ctrl+C handler")?;

    if !ui.json {
        print!("{}", render_watch_header(&project, ui.color, ui.unicode));
    }

    let mut changes = factory::create_change_source(&project)?;
    let mut controller = factory::create_build_controller(project)?;
    controller.watch(&running, &mut changes, |event| {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        report(&event, Some(&timestamp), view, ui);
    })?;

    Ok(ExitCode::SUCCESS)
}

fn report(event: &BuildEvent, timestamp: Option<&str>, view: &BuildEventView, ui: &UiContext) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    if ui.annotate() {
        let annotation = match event {
            BuildEvent::Warning { message } => Some((AnnotationLevel::Warning, message)),
            BuildEvent::Error { message } => Some((AnnotationLevel::Error, message)),
            _ => None,
        };
        if let Some((level, message)) = annotation {
            println!(
                "{}",
                github_actions_annotation(level, message, None, Some("bp build"))
            );
        }
    }

    let rendered = view.render(timestamp, event);
    if BuildEventView::is_diagnostic(event) {
        eprint!("{}", rendered);
    } else {
        print!("{}", rendered);
    }
}
