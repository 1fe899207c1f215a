//! `bp new <name>`

use std::process::ExitCode;

use anyhow::{Context, Result};

use blueprintui::presentation::factory;

use crate::ui::context::UiContext;
use crate::ui::views::new::{new_json, render_new_result};

pub fn cmd_new(name: &str, ui: &UiContext) -> Result<ExitCode> {
    let parent = std::env::current_dir().context("failed to read the working directory")?;
    let result = factory::create_scaffold_use_case().execute(&parent, name)?;

    if ui.json {
        crate::ui::json::emit(new_json(&result))?;
    } else {
        print!(
            "{}",
            render_new_result(name, &result, ui.color, ui.unicode)
        );
    }
    Ok(ExitCode::SUCCESS)
}
