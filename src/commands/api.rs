//! `bp api [--test] [--update]`

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use blueprintui::presentation::factory;
use blueprintui::{ApiOptions, BuildMode};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::views::api::{
    api_json, render_api_diff, render_api_status, render_api_test, render_api_updated,
};

use super::prepare_project;

pub fn cmd_api(config: Option<&Path>, test: bool, update: bool, ui: &UiContext) -> Result<ExitCode> {
    let project = prepare_project(config, BuildMode::Production, ui)?;
    let options = ApiOptions::new().with_test(test).with_update(update);
    let result = factory::create_api_use_case().execute(&project, options)?;

    let exit = if result.test_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };

    if ui.json {
        crate::ui::json::emit(api_json(&result))?;
        return Ok(exit);
    }

    if result.tested {
        if result.test_failed() {
            if ui.annotate() {
                println!(
                    "{}",
                    github_actions_annotation(
                        AnnotationLevel::Error,
                        "custom element API changes detected; run \"bp api --update\" and commit the lockfile",
                        Some(&result.lockfile_name()),
                        Some("bp api"),
                    )
                );
            }
            eprint!("{}", render_api_test(&result, ui.color));
            if let Some(diff) = render_api_diff(&result, ui.color) {
                eprint!("{}", diff);
            }
        } else {
            print!("{}", render_api_test(&result, ui.color));
        }
    }

    if result.updated {
        print!("{}", render_api_updated(&result, ui.color));
    }

    if !result.tested && !result.updated {
        print!("{}", render_api_status(&result, ui.color));
    }

    Ok(exit)
}
