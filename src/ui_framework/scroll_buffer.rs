use crate::ui_framework::bounding_box::BoundingBox;
use crate::ui_framework::{Input, Render};
use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::queue;
use crossterm::style::{self, Attribute, Attributes, Color, Colors};
use std::cmp::min;
use std::io::{Stdout, Write};
use unicode_truncate::UnicodeTruncateStr;

pub type Line = Vec<TextSegment>;

/// Vertically scrollable block of styled lines. Lines wider than the box are clipped.
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    lines: Vec<Line>,
    display_height: usize,
    display_offset: usize,
    should_render: bool,
    // CR: need to work bounding_box != last_bounding_box => should_render into the framework
    last_bounding_box: BoundingBox,
}

impl ScrollBuffer {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            display_height: 0,
            display_offset: 0,
            should_render: true,
            last_bounding_box: BoundingBox::default(),
        }
    }

    /// Replaces the content, keeping the scroll position where possible.
    pub fn set_lines(&mut self, lines: Vec<Line>) {
        self.lines = lines;
        self.display_offset = min(self.display_offset, self.max_offset());
        self.should_render = true;
    }

    pub fn display_offset(&self) -> usize {
        self.display_offset
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.display_height.max(1))
    }

    pub fn scroll(&mut self, delta: isize) {
        let new_offset = (self.display_offset as isize + delta).max(0) as usize;
        let new_offset = min(new_offset, self.max_offset());
        if new_offset != self.display_offset {
            self.display_offset = new_offset;
            self.should_render = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll(-(self.display_offset as isize));
    }
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for ScrollBuffer {
    fn should_render(&self) -> bool {
        self.should_render
    }

    fn invalidate(&mut self) {
        self.should_render = true;
    }

    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()> {
        if bounding_box != self.last_bounding_box {
            self.last_bounding_box = bounding_box;
            self.should_render = true;
        }

        if self.should_render {
            let BoundingBox {
                left,
                top,
                width,
                height,
            } = bounding_box;

            if self.display_height != height as usize {
                self.display_height = height as usize;
                self.scroll(0); // NB: recalculate scroll
            }

            let str_clear = " ".repeat(width as usize);

            for row in 0..height {
                queue!(stdout, cursor::MoveTo(left, top + row))?;
                queue!(stdout, style::ResetColor)?;
                queue!(stdout, style::SetAttributes(Attributes::default()))?;
                queue!(stdout, style::Print(&str_clear))?;

                let Some(line) = self.lines.get(self.display_offset + row as usize) else {
                    continue;
                };

                queue!(stdout, cursor::MoveTo(left, top + row))?;
                let mut remaining = width as usize;

                for TextSegment {
                    colors,
                    attributes,
                    text,
                } in line
                {
                    if remaining == 0 {
                        break;
                    }
                    let (clipped, used) = text.unicode_truncate(remaining);
                    remaining -= used;

                    queue!(stdout, style::SetAttribute(Attribute::Reset))?;
                    queue!(stdout, style::SetColors(*colors))?;
                    queue!(stdout, style::SetAttributes(*attributes))?;
                    queue!(stdout, style::Print(clipped))?;
                }
            }

            queue!(stdout, style::ResetColor)?;
            queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            stdout.flush()?;
            self.should_render = false;
        }

        Ok(())
    }
}

impl Input for ScrollBuffer {
    fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        let page = self.display_height.max(1) as isize;
        match event.code {
            KeyCode::Up => self.scroll(-1),
            KeyCode::Down => self.scroll(1),
            KeyCode::PageUp => self.scroll(-page),
            KeyCode::PageDown => self.scroll(page),
            KeyCode::Home => self.scroll_to_top(),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    colors: Colors,
    attributes: Attributes,
    text: String,
}

impl TextSegment {
    pub fn new(text: &str, colors: Colors, attributes: Attributes) -> Self {
        Self {
            colors,
            attributes,
            text: text.to_string(),
        }
    }

    pub fn color(text: &str, colors: Colors) -> Self {
        Self::new(text, colors, Attributes::default())
    }

    pub fn fg(text: &str, foreground: Color) -> Self {
        Self::color(text, Colors::new(foreground, Color::Reset))
    }

    pub fn bold(text: &str, foreground: Color) -> Self {
        Self::new(
            text,
            Colors::new(foreground, Color::Reset),
            Attribute::Bold.into(),
        )
    }

    pub fn plain(text: &str) -> Self {
        Self::new(
            text,
            Colors::new(Color::Reset, Color::Reset),
            Attributes::default(),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }
}

/// Concatenated text of a line, without styling.
pub fn line_text(line: &[TextSegment]) -> String {
    line.iter().map(TextSegment::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn numbered(n: usize) -> Vec<Line> {
        (0..n)
            .map(|i| vec![TextSegment::plain(&format!("line {i}"))])
            .collect()
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut buffer = ScrollBuffer::new();
        buffer.display_height = 10;
        buffer.set_lines(numbered(25));

        buffer.scroll(-3);
        assert_eq!(buffer.display_offset(), 0);
        buffer.scroll(100);
        assert_eq!(buffer.display_offset(), 15);

        buffer.set_lines(numbered(12));
        assert_eq!(buffer.display_offset(), 2);
    }

    #[test]
    fn test_keys() {
        let mut buffer = ScrollBuffer::new();
        buffer.display_height = 5;
        buffer.set_lines(numbered(20));

        assert!(buffer.handle_key_event(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)));
        assert_eq!(buffer.display_offset(), 5);
        assert!(buffer.handle_key_event(&KeyEvent::new(KeyCode::Home, KeyModifiers::NONE)));
        assert_eq!(buffer.display_offset(), 0);
        assert!(!buffer.handle_key_event(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_line_text() {
        let line = vec![TextSegment::plain("@"), TextSegment::fg("devair", Color::DarkCyan)];
        assert_eq!(line_text(&line), "@devair");
    }
}
