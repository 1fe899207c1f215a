use std::time::Duration;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::warning::render_warning;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use blueprintui::application::BuildEvent;
use blueprintui::ProjectContext;

/// Header printed once before watching
pub fn render_watch_header(
    project: &ProjectContext,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "bp build --watch");
    header.add("Source", project.source_root().display().to_string());
    header.add("Output", project.out_dir().display().to_string());
    if let Some(config) = &project.config_file {
        header.add("Config", config.display().to_string());
    }
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// Seconds the way the build has always reported them: `1234ms -> 1.234`
pub fn format_seconds(duration: Duration) -> String {
    format!("{}", duration.as_millis() as f64 / 1000.0)
}

/// Renders build events for the terminal.
///
/// One-shot builds end with a celebratory line; watch mode prefixes each
/// line with a timestamp and reports `Complete` after every cycle.
#[derive(Debug, Clone, Copy)]
pub struct BuildEventView {
    pub watch: bool,
    pub verbose: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
}

impl BuildEventView {
    pub fn render(&self, timestamp: Option<&str>, event: &BuildEvent) -> String {
        let prefix = match timestamp {
            Some(ts) => format!("{} ", ColoredText::dim(format!("[{}]", ts)).render(self.supports_color)),
            None => String::new(),
        };
        let icon = |icon: Icon| icon.colored(self.supports_color, self.supports_unicode);

        match event {
            BuildEvent::WatchStarted { source } => {
                format!("{}{} Watching: {}\n", prefix, icon(Icon::Watch), source)
            }
            BuildEvent::FileChanged { path } => {
                format!("{}{} Changed: {}\n", prefix, icon(Icon::Arrow), path)
            }
            BuildEvent::Start { .. } => format!("{}{} Building...\n", prefix, icon(Icon::Progress)),
            BuildEvent::Warning { message } => format!(
                "{}{}",
                prefix,
                render_warning(message, self.supports_color, self.supports_unicode)
            ),
            BuildEvent::Error { message } => format!(
                "{}{} {}\n",
                prefix,
                icon(Icon::Error),
                ColoredText::error(message.as_str()).render(self.supports_color)
            ),
            BuildEvent::Complete {
                duration_ms,
                modules,
                written,
                suppressed,
                ..
            } => {
                let seconds = format_seconds(Duration::from_millis(*duration_ms));
                let headline = if self.watch {
                    format!("Complete in {} seconds", seconds)
                } else {
                    format!("Success in {} seconds 🎉", seconds)
                };
                let mut out = format!(
                    "{}{} {}\n",
                    prefix,
                    icon(Icon::Success),
                    ColoredText::success(headline).render(self.supports_color)
                );
                if self.verbose {
                    let stats = format!(
                        "  {} modules, {} written, {} unchanged",
                        modules, written, suppressed
                    );
                    out.push_str(&ColoredText::dim(stats).render(self.supports_color));
                    out.push('\n');
                }
                out
            }
            BuildEvent::Shutdown => format!("\n{}{} Watch stopped.\n", prefix, icon(Icon::Watch)),
        }
    }

    /// Errors and warnings go to stderr
    pub fn is_diagnostic(event: &BuildEvent) -> bool {
        matches!(event, BuildEvent::Error { .. } | BuildEvent::Warning { .. })
    }
}
