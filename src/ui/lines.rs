use crate::ui::theme;
use crate::ui_framework::scroll_buffer::{Line, TextSegment};
use unicode_truncate::UnicodeTruncateStr;

pub fn display_width(text: &str) -> usize {
    text.unicode_truncate(usize::MAX).1
}

/// Clips or pads `text` to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    let (clipped, used) = text.unicode_truncate(width);
    format!("{clipped}{}", " ".repeat(width - used))
}

/// `left` and `right` on one line, with `right` flush against the edge.
pub fn spread(mut left: Line, right: Line, width: usize) -> Line {
    let used: usize = left
        .iter()
        .chain(&right)
        .map(|segment| display_width(segment.text()))
        .sum();
    let gap = width.saturating_sub(used).max(1);
    left.push(TextSegment::plain(&" ".repeat(gap)));
    left.extend(right);
    left
}

pub fn centered(line: Line, width: usize) -> Line {
    let used: usize = line.iter().map(|segment| display_width(segment.text())).sum();
    let mut centered = vec![TextSegment::plain(&" ".repeat(width.saturating_sub(used) / 2))];
    centered.extend(line);
    centered
}

pub fn wrapped(text: &str, width: usize, color: crossterm::style::Color) -> Vec<Line> {
    textwrap::wrap(text, width.max(1))
        .iter()
        .map(|line| vec![TextSegment::fg(line, color)])
        .collect()
}

pub fn footer(width: usize) -> Line {
    centered(
        vec![
            TextSegment::fg("Made by ", theme::MUTED),
            TextSegment::fg("0xdevair", theme::BRAND),
            TextSegment::fg(" · Powered by Neynar & Farcaster Hub", theme::MUTED),
        ],
        width,
    )
}
