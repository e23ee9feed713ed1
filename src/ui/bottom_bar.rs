use crate::analytics_client::Fid;
use crate::ui_framework::{bounding_box::BoundingBox, Render};
use anyhow::Result;
use crossterm::style::Color;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue, style};
use std::io::{Stdout, Write};
use unicode_truncate::UnicodeTruncateStr;

const KEY_HINTS: &str = "tab: switch tab · m: metric · r: refresh · /: fid · q: quit";

pub struct BottomBar {
    fid: Fid,
    num_tasks_in_flight: usize,
    should_render: bool,
}

impl BottomBar {
    pub fn new(fid: &Fid) -> Self {
        Self {
            fid: fid.clone(),
            num_tasks_in_flight: 0,
            should_render: true,
        }
    }

    pub fn set_num_tasks_in_flight(&mut self, n: usize) {
        if self.num_tasks_in_flight != n {
            self.num_tasks_in_flight = n;
            self.should_render = true;
        }
    }

    pub fn set_fid(&mut self, fid: &Fid) {
        self.fid = fid.clone();
        self.should_render = true;
    }

    pub fn status_text(&self) -> String {
        let mut text = String::new();
        if self.num_tasks_in_flight > 0 {
            text.push_str(&format!("[* {}] ", self.num_tasks_in_flight));
        }
        text.push_str(&format!("fid {}  {KEY_HINTS}", self.fid));
        text
    }
}

impl Render for BottomBar {
    fn should_render(&self) -> bool {
        self.should_render
    }

    fn invalidate(&mut self) {
        self.should_render = true;
    }

    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()> {
        let text = self.status_text();
        let (text, _) = text.unicode_truncate(bounding_box.width as usize);

        queue!(stdout, cursor::MoveTo(bounding_box.left, bounding_box.top))?;
        queue!(stdout, style::SetForegroundColor(Color::Black))?;
        queue!(stdout, style::SetBackgroundColor(Color::White))?;
        queue!(stdout, style::Print(text))?;
        queue!(stdout, style::ResetColor)?;
        queue!(stdout, terminal::Clear(ClearType::UntilNewLine))?;

        stdout.flush()?;
        self.should_render = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let mut bar = BottomBar::new(&Fid::default());
        assert!(bar.status_text().starts_with("fid 774643"));

        bar.set_num_tasks_in_flight(3);
        assert!(bar.status_text().starts_with("[* 3] fid 774643"));
    }
}
