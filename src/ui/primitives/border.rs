use crate::ui::theme::borders;

/// The six characters of a box outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

impl BorderSet {
    pub fn new(supports_unicode: bool) -> Self {
        Self {
            top_left: borders::TOP_LEFT.pick(supports_unicode),
            top_right: borders::TOP_RIGHT.pick(supports_unicode),
            bottom_left: borders::BOTTOM_LEFT.pick(supports_unicode),
            bottom_right: borders::BOTTOM_RIGHT.pick(supports_unicode),
            horizontal: borders::HORIZONTAL.pick(supports_unicode),
            vertical: borders::VERTICAL.pick(supports_unicode),
        }
    }
}
