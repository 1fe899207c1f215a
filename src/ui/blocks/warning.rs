use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// One warning line, e.g. an unknown config key or an unlisted external
pub fn render_warning(message: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        ColoredText::warning(message).render(supports_color)
    )
}
