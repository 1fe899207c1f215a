use crossterm::style::Stylize;

use crate::ui::theme::{self, icons, Glyph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Pointer,
    Watch,
    New,
}

impl Icon {
    fn glyph(&self) -> Glyph {
        match self {
            Icon::Success => icons::SUCCESS,
            Icon::Error => icons::ERROR,
            Icon::Warning => icons::WARNING,
            Icon::Progress => icons::PROGRESS,
            Icon::Arrow => icons::ARROW,
            Icon::Pointer => icons::POINTER,
            Icon::Watch => icons::WATCH,
            Icon::New => icons::NEW,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        self.glyph().pick(supports_unicode)
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error | Icon::Pointer => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Watch | Icon::New => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
