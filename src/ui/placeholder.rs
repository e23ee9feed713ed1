use crate::selection::Tab;
use crate::ui::lines::{footer, wrapped};
use crate::ui::theme;
use crate::ui_framework::scroll_buffer::{Line, TextSegment};

const MVP_NOTE: &str = "This tab is a placeholder in the MVP. Once the core overview is solid, \
                        we can progressively enhance it with more Farcaster + Neynar data.";

pub fn placeholder_copy(tab: Tab) -> Option<(&'static str, &'static str)> {
    match tab {
        Tab::Overview => None,
        Tab::Audience => Some((
            "Audience",
            "Demographics, devices, and active times (future Farcaster data integrations).",
        )),
        Tab::Content => Some((
            "Content",
            "Per-post performance, replies, and media breakdown (future extension).",
        )),
        Tab::Video => Some((
            "Video",
            "Video views and watch time across your casts (future extension).",
        )),
    }
}

/// Static card for tabs that have no data behind them yet.
pub fn placeholder_lines(tab: Tab, width: usize) -> Vec<Line> {
    let mut lines = Vec::new();

    if let Some((title, subtitle)) = placeholder_copy(tab) {
        lines.push(vec![TextSegment::bold(title, theme::TEXT)]);
        lines.extend(wrapped(subtitle, width, theme::SUBTLE));
        lines.push(vec![]);
        lines.extend(wrapped(MVP_NOTE, width, theme::MUTED));
        lines.push(vec![]);
    }
    lines.push(footer(width));

    lines
}
