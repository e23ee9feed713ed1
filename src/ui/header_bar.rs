use crate::analytics_client::api::Account;
use crate::selection::Tab;
use crate::store::Store;
use crate::ui::lines::spread;
use crate::ui::theme;
use crate::ui_framework::bounding_box::BoundingBox;
use crate::ui_framework::scroll_buffer::{Line, ScrollBuffer, TextSegment};
use crate::ui_framework::Render;
use anyhow::Result;
use crossterm::style::{Attribute, Attributes, Colors};
use std::io::Stdout;
use std::sync::Arc;

pub const HEADER_HEIGHT: u16 = 3;

pub fn header_lines(account: Option<&Account>, tab: Tab, width: usize) -> Vec<Line> {
    let mut tabs = Vec::new();
    for (i, each) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            tabs.push(TextSegment::plain("  "));
        }
        if *each == tab {
            let mut attributes = Attributes::default();
            attributes.set(Attribute::Bold);
            attributes.set(Attribute::Underlined);
            tabs.push(TextSegment::new(
                each.label(),
                Colors::new(theme::TEXT, theme::BRAND),
                attributes,
            ));
        } else {
            tabs.push(TextSegment::fg(each.label(), theme::SUBTLE));
        }
    }

    let caption = match account {
        Some(account) => format!("@{} • fid {}", account.handle, account.farcaster_id),
        None => "Loading Farcaster account…".to_string(),
    };

    vec![
        spread(vec![TextSegment::bold("Analytics", theme::TEXT)], tabs, width),
        vec![TextSegment::fg(&caption, theme::SUBTLE)],
        vec![TextSegment::fg(&"─".repeat(width), theme::MUTED)],
    ]
}

pub struct HeaderBar {
    store: Arc<Store>,
    tab: Tab,
    scroll_buffer: ScrollBuffer,
    should_update_scroll_buffer: bool,
}

impl HeaderBar {
    pub fn new(store: &Arc<Store>) -> Self {
        Self {
            store: store.clone(),
            tab: Tab::default(),
            scroll_buffer: ScrollBuffer::new(),
            should_update_scroll_buffer: true,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.should_update_scroll_buffer = true;
        }
    }
}

impl Render for HeaderBar {
    fn should_render(&self) -> bool {
        self.should_update_scroll_buffer || self.scroll_buffer.should_render()
    }

    fn invalidate(&mut self) {
        self.should_update_scroll_buffer = true;
    }

    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()> {
        if self.should_update_scroll_buffer {
            let account = self.store.account();
            self.scroll_buffer.set_lines(header_lines(
                account.as_ref(),
                self.tab,
                bounding_box.width as usize,
            ));
            self.should_update_scroll_buffer = false;
        }
        self.scroll_buffer.render(stdout, bounding_box)
    }
}
