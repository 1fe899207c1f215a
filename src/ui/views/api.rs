use crate::ui::components::diff::render_unified_diff_with_line_numbers;
use crate::ui::primitives::text::ColoredText;
use blueprintui::application::ApiResult;
use blueprintui::domain::services::DriftStatus;

/// Lines of unchanged context around each change in the drift diff
const DIFF_CONTEXT: usize = 3;

/// `--test` verdict
pub fn render_api_test(result: &ApiResult, supports_color: bool) -> String {
    let line = if result.status.is_in_sync() {
        ColoredText::success("✅ No custom element API changes detected")
    } else {
        ColoredText::error(format!(
            "🚫 new custom element API changes detected, run \"bp api --update\" to update the {}",
            result.lockfile_name()
        ))
    };
    format!("{}\n", line.render(supports_color))
}

/// Diff of the committed lockfile against the generated manifest
pub fn render_api_diff(result: &ApiResult, supports_color: bool) -> Option<String> {
    let locked = result.locked.as_deref()?;
    if result.status.is_in_sync() {
        return None;
    }
    let mut out = render_unified_diff_with_line_numbers(
        &result.lockfile_name(),
        locked,
        &result.generated,
        Some(DIFF_CONTEXT),
        supports_color,
    );
    if let Some(summary) = &result.summary {
        out.push_str(
            &ColoredText::dim(format!("{} lines changed", summary.summary()))
                .render(supports_color),
        );
        out.push('\n');
    }
    Some(out)
}

pub fn render_api_updated(result: &ApiResult, supports_color: bool) -> String {
    format!(
        "{}\n",
        ColoredText::success(format!(
            "🔏 {} updated to latest API changes",
            result.lockfile_name()
        ))
        .render(supports_color)
    )
}

/// Plain status when neither `--test` nor `--update` was given
pub fn render_api_status(result: &ApiResult, supports_color: bool) -> String {
    let name = result.lockfile_name();
    let line = match result.status {
        DriftStatus::InSync => ColoredText::success(format!("{} is up to date", name)),
        DriftStatus::Drifted => ColoredText::warning(format!(
            "{} differs from the current API ({}), run \"bp api --test\" for details",
            name,
            result
                .summary
                .as_ref()
                .map(|s| s.summary())
                .unwrap_or_default()
        )),
        DriftStatus::Missing => ColoredText::warning(format!(
            "{} does not exist yet, run \"bp api --update\" to create it",
            name
        )),
    };
    format!("{}\n", line.render(supports_color))
}

pub fn api_json(result: &ApiResult) -> serde_json::Value {
    let status = match result.status {
        DriftStatus::InSync => "in_sync",
        DriftStatus::Drifted => "drifted",
        DriftStatus::Missing => "missing",
    };
    serde_json::json!({
        "event": "api",
        "command": "api",
        "lockfile": result.lockfile.display().to_string(),
        "status": status,
        "additions": result.summary.as_ref().map(|s| s.additions),
        "deletions": result.summary.as_ref().map(|s| s.deletions),
        "tested": result.tested,
        "updated": result.updated,
        "passed": !result.test_failed(),
    })
}
