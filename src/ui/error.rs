use std::path::Path;

use blueprintui::{BuildError, ErrorCategory};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;

fn category_title(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Configuration => "Configuration error",
        ErrorCategory::Compilation => "Compilation error",
        ErrorCategory::Manifest => "Manifest error",
        ErrorCategory::Environment => "Error",
    }
}

fn category_name(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Configuration => "configuration",
        ErrorCategory::Compilation => "compilation",
        ErrorCategory::Manifest => "manifest",
        ErrorCategory::Environment => "environment",
    }
}

/// File and line a build error points at, when it has one
fn error_location(err: &BuildError) -> (Option<&Path>, Option<usize>) {
    match err {
        BuildError::Parse { file, line, .. } => (Some(file.as_path()), Some(*line)),
        BuildError::InvalidConfig { file, .. } => (Some(file.as_path()), None),
        BuildError::ConfigNotFound { path } => (Some(path.as_path()), None),
        BuildError::Compile { file, .. } => (Some(file.as_path()), None),
        BuildError::Resolve { importer, .. } => (Some(importer.as_path()), None),
        BuildError::AssertionConflict { path, .. } => (Some(path.as_path()), None),
        _ => (None, None),
    }
}

fn fix_hint(err: &BuildError) -> Option<&'static str> {
    match err {
        BuildError::ConfigNotFound { .. } => {
            Some("pass an existing file to --config, or create blueprint.config.toml")
        }
        BuildError::AssertionConflict { .. } => {
            Some("import the module with the same assertion type everywhere")
        }
        BuildError::Resolve { .. } => {
            Some("check the relative path; '.js' specifiers also match '.ts' sources")
        }
        _ => None,
    }
}

fn format_build_error(err: &BuildError, supports_color: bool, supports_unicode: bool) -> String {
    let mut block = ErrorBlock::new(category_title(err.category()), err.to_string());
    let (file, line) = error_location(err);
    if let Some(file) = file {
        block = block.with_file(file);
    }
    if let Some(line) = line {
        block = block.with_line(line).with_file_context(2, 2);
    }
    if let Some(fix) = fix_hint(err) {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    match err.downcast_ref::<BuildError>() {
        Some(build) => format_build_error(build, supports_color, supports_unicode),
        None => ErrorBlock::new("Error", format!("{:#}", err)).render(supports_color, supports_unicode),
    }
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    let build = err.downcast_ref::<BuildError>();

    if ui.json {
        let output = serde_json::json!({
            "event": "error",
            "category": build.map(|b| category_name(b.category())),
            "message": format!("{:#}", err),
        });
        if let Err(e) = crate::ui::json::emit(output) {
            log::error!("failed to write JSON error event: {}", e);
        }
        return;
    }

    if ui.annotate() {
        let file = build
            .and_then(|b| error_location(b).0)
            .map(|p| p.display().to_string());
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &format!("{:#}", err),
                file.as_deref(),
                Some("bp"),
            )
        );
    }

    eprint!("{}", format_error(err, ui.color, ui.unicode));
}
