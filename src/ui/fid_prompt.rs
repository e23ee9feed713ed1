use crate::ui_framework::bounding_box::BoundingBox;
use crate::ui_framework::{Input, Render};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::queue;
use crossterm::style::{self, Color};
use crossterm::terminal::{self, ClearType};
use crossterm::cursor;
use std::io::{Stdout, Write};

const PROMPT: &str = "fid> ";

/// One-line input for switching accounts. Only digits are accepted, so the caret is both a byte
/// and a column offset.
#[derive(Debug)]
pub struct FidPrompt {
    text_input: String,
    caret_position: usize,
    should_render: bool,
}

impl FidPrompt {
    pub fn new() -> Self {
        Self {
            text_input: String::new(),
            caret_position: 0,
            should_render: true,
        }
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text_input);
        self.clear();
        text
    }

    pub fn clear(&mut self) {
        self.text_input.clear();
        self.caret_position = 0;
        self.should_render = true;
    }

    fn insert_char_at_caret(&mut self, ch: char) {
        self.text_input.insert(self.caret_position, ch);
        self.caret_position += 1;
        self.should_render = true;
    }

    fn delete_char_at_caret(&mut self) {
        if self.caret_position < self.text_input.len() {
            self.text_input.remove(self.caret_position);
            self.should_render = true;
        }
    }

    fn delete_char_before_caret(&mut self) {
        if self.caret_position > 0 {
            self.caret_position -= 1;
            self.delete_char_at_caret();
        }
    }

    fn move_caret(&mut self, delta: isize) {
        let new_position = self.caret_position as isize + delta;
        if new_position >= 0 && new_position <= self.text_input.len() as isize {
            self.caret_position = new_position as usize;
            self.should_render = true;
        }
    }
}

impl Default for FidPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for FidPrompt {
    fn should_render(&self) -> bool {
        self.should_render
    }

    fn invalidate(&mut self) {
        self.should_render = true;
    }

    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()> {
        let BoundingBox { left, top, .. } = bounding_box;

        queue!(stdout, cursor::MoveTo(left, top))?;
        queue!(stdout, terminal::Clear(ClearType::CurrentLine))?;
        queue!(stdout, style::SetForegroundColor(Color::DarkGrey))?;
        queue!(stdout, style::Print(PROMPT))?;
        queue!(stdout, style::ResetColor)?;
        queue!(stdout, style::Print(&self.text_input))?;

        stdout.flush()?;
        self.should_render = false;
        Ok(())
    }

    fn get_cursor(&self) -> (u16, u16) {
        ((self.caret_position + PROMPT.len()) as u16, 0)
    }
}

impl Input for FidPrompt {
    fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => self.insert_char_at_caret(ch),
            KeyCode::Left => self.move_caret(-1),
            KeyCode::Right => self.move_caret(1),
            KeyCode::Home => self.move_caret(-(self.caret_position as isize)),
            KeyCode::End => self.caret_position = self.text_input.len(),
            KeyCode::Backspace => self.delete_char_before_caret(),
            KeyCode::Delete => self.delete_char_at_caret(),
            _ => return false,
        }
        true
    }
}
