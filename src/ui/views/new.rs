use std::path::Path;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use blueprintui::application::ScaffoldResult;

pub fn render_new_result(
    name: &str,
    result: &ScaffoldResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::New, format!("bp new {}", name));
    header.add("Directory", result.root.display().to_string());
    let mut out = header.render(supports_color, supports_unicode);

    for file in &result.files {
        let relative = file.strip_prefix(&result.root).unwrap_or(file);
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            relative.display()
        ));
    }

    out.push('\n');
    out.push_str(&next_steps(&result.root, supports_color));
    out
}

fn next_steps(root: &Path, supports_color: bool) -> String {
    let dir = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mut out = ColoredText::plain("Next steps:").bold().render(supports_color);
    out.push('\n');
    for step in [format!("cd {}", dir), "npm install".to_string(), "bp build".to_string()] {
        out.push_str(&format!("  {}\n", ColoredText::info(step).render(supports_color)));
    }
    out
}

pub fn new_json(result: &ScaffoldResult) -> serde_json::Value {
    serde_json::json!({
        "event": "complete",
        "command": "new",
        "root": result.root.display().to_string(),
        "files": result
            .files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn result() -> ScaffoldResult {
        ScaffoldResult {
            root: PathBuf::from("/work/acme-ui"),
            files: vec![
                PathBuf::from("/work/acme-ui/package.json"),
                PathBuf::from("/work/acme-ui/src/alert/element.ts"),
            ],
        }
    }

    #[test]
    fn lists_files_relative_to_root() {
        let rendered = render_new_result("acme-ui", &result(), false, false);
        assert!(rendered.starts_with("[NEW] bp new acme-ui\n"));
        assert!(rendered.contains("  [OK] package.json\n"));
        assert!(rendered.contains("  [OK] src/alert/element.ts\n"));
        assert!(rendered.contains("  cd acme-ui\n"));
    }

    #[test]
    fn json_lists_absolute_files() {
        let value = new_json(&result());
        assert_eq!(value["command"], "new");
        assert_eq!(value["files"][0], "/work/acme-ui/package.json");
    }
}
