use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use crate::ui::theme;

/// Unified diff of `old` against `new`, with both line numbers.
///
/// Unchanged runs longer than `2 * context` are folded into a `...` line;
/// `context = None` prints every line.
pub fn render_unified_diff_with_line_numbers(
    path: &str,
    old: &str,
    new: &str,
    context: Option<usize>,
    supports_color: bool,
) -> String {
    let diff = TextDiff::from_lines(old, new);
    let old_lines = old.lines().count().max(1);
    let new_lines = new.lines().count().max(1);
    let width = old_lines.max(new_lines).to_string().len();

    let mut out = String::new();
    out.push_str(&paint(&format!("--- a/{}", path), theme::colors::INFO, supports_color));
    out.push('\n');
    out.push_str(&paint(&format!("+++ b/{}", path), theme::colors::INFO, supports_color));
    out.push('\n');

    let changes: Vec<_> = diff.iter_all_changes().collect();
    let keep = visible_lines(&changes.iter().map(|c| c.tag()).collect::<Vec<_>>(), context);

    let mut folded = false;
    for (change, visible) in changes.iter().zip(keep) {
        if !visible {
            if !folded {
                out.push_str(&paint("...", theme::colors::DIM, supports_color));
                out.push('\n');
                folded = true;
            }
            continue;
        }
        folded = false;

        let (old_no, new_no, sign, color) = match change.tag() {
            ChangeTag::Delete => (change.old_index(), None, "-", theme::colors::ERROR),
            ChangeTag::Insert => (None, change.new_index(), "+", theme::colors::SUCCESS),
            ChangeTag::Equal => (
                change.old_index(),
                change.new_index(),
                " ",
                theme::colors::DIM,
            ),
        };
        let column = |n: Option<usize>| {
            n.map(|i| format!("{:>width$}", i + 1, width = width))
                .unwrap_or_else(|| " ".repeat(width))
        };

        let value = change.value().trim_end_matches('\n');
        let line = format!("{} {} {} {}", column(old_no), column(new_no), sign, value);
        out.push_str(&paint(&line, color, supports_color));
        out.push('\n');
    }

    out
}

/// Which lines survive folding
fn visible_lines(tags: &[ChangeTag], context: Option<usize>) -> Vec<bool> {
    let Some(context) = context else {
        return vec![true; tags.len()];
    };
    let mut keep = vec![false; tags.len()];
    for (i, tag) in tags.iter().enumerate() {
        if *tag != ChangeTag::Equal {
            let start = i.saturating_sub(context);
            let end = (i + context + 1).min(tags.len());
            keep[start..end].iter_mut().for_each(|k| *k = true);
        }
    }
    keep
}

fn paint(s: &str, color: crossterm::style::Color, supports_color: bool) -> String {
    if supports_color {
        format!("{}", s.with(color))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_added_and_removed_lines() {
        let rendered =
            render_unified_diff_with_line_numbers("api.json", "a\nb\n", "a\nc\n", None, false);
        assert!(rendered.starts_with("--- a/api.json\n+++ b/api.json\n"));
        assert!(rendered.contains("2   - b"));
        assert!(rendered.contains("  2 + c"));
    }

    #[test]
    fn folds_long_unchanged_runs() {
        let old: String = (0..20).map(|i| format!("line {}\n", i)).collect();
        let new = old.replace("line 10\n", "line ten\n");
        let rendered = render_unified_diff_with_line_numbers("x", &old, &new, Some(2), false);

        assert!(rendered.contains("+ line ten"));
        assert!(rendered.contains("  line 8"));
        assert!(!rendered.contains("  line 7\n"));
        assert_eq!(rendered.matches("...").count(), 2);
    }
}
