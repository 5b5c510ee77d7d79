//! Built-in slide layouts

use crate::core::types::LayoutIndex;

/// A layout and the text placeholders it provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub has_title: bool,
    pub has_body: bool,
}

const fn layout(name: &'static str, has_title: bool, has_body: bool) -> Layout {
    Layout {
        name,
        has_title,
        has_body,
    }
}

/// Layout table, indexed by [`LayoutIndex`]
pub static LAYOUTS: [Layout; 9] = [
    layout("Title Slide", true, true),
    layout("Title and Content", true, true),
    layout("Section Header", true, true),
    layout("Two Content", true, true),
    layout("Comparison", true, true),
    layout("Title Only", true, false),
    layout("Blank", false, false),
    layout("Content with Caption", true, true),
    layout("Picture with Caption", true, true),
];

pub fn layout_at(index: LayoutIndex) -> Option<&'static Layout> {
    LAYOUTS.get(index)
}
