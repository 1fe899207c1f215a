use std::path::{Path, PathBuf};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Boxed error with optional source excerpt and fix hint
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    title: String,
    message: String,
    file: Option<PathBuf>,
    line: Option<usize>,
    code_context: Option<Vec<(usize, String, bool)>>, // (line_no, content, highlight)
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            file: None,
            line: None,
            code_context: None,
            fix: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn with_file_context(mut self, before: usize, after: usize) -> Self {
        let (Some(file), Some(line)) = (&self.file, self.line) else {
            return self;
        };
        self.code_context = read_code_context(file, line, before, after);
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut b = Box::with_title(format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            self.title
        ))
        .style(BoxStyle::Error);

        if let Some(file) = &self.file {
            match self.line {
                Some(line) => b.add_line(format!("{}:{}", file.display(), line)),
                None => b.add_line(file.display().to_string()),
            }
        }
        b.add_empty();
        b.add_line(self.message.clone());

        if let Some(lines) = &self.code_context {
            b.add_empty();
            for (no, text, highlight) in lines {
                let prefix = if *highlight {
                    Icon::Pointer.render(supports_unicode)
                } else {
                    " "
                };
                let text = if *highlight {
                    ColoredText::error(text.as_str()).render(supports_color)
                } else {
                    text.clone()
                };
                b.add_line(format!("{prefix} {:>4} | {}", no, text));
            }
        }

        if let Some(fix) = &self.fix {
            b.add_empty();
            b.add_line(format!("FIX: {}", fix));
        }

        b.render(supports_color, supports_unicode)
    }
}

fn read_code_context(
    file: &Path,
    line: usize,
    before: usize,
    after: usize,
) -> Option<Vec<(usize, String, bool)>> {
    let content = std::fs::read_to_string(file).ok()?;
    let lines: Vec<&str> = content.lines().collect();
    if line == 0 || line > lines.len() {
        return None;
    }

    let start = line.saturating_sub(before).saturating_sub(1);
    let end = (line + after).min(lines.len());
    Some(
        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let no = start + idx + 1;
                (no, (*text).to_string(), no == line)
            })
            .collect(),
    )
}
