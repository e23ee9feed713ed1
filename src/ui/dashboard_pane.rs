use crate::selection::{Selection, Tab};
use crate::store::Store;
use crate::ui::overview::overview_lines;
use crate::ui::placeholder::placeholder_lines;
use crate::ui_framework::bounding_box::BoundingBox;
use crate::ui_framework::scroll_buffer::{Line, ScrollBuffer};
use crate::ui_framework::{Input, Render};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::io::Stdout;
use std::sync::Arc;

/// Body of the screen: the overview tab or a placeholder card, scrollable.
pub struct DashboardPane {
    store: Arc<Store>,
    selection: Selection,
    scroll_buffer: ScrollBuffer,
    should_update_scroll_buffer: bool,
    display_width: usize,
}

impl DashboardPane {
    pub fn new(store: &Arc<Store>) -> Self {
        Self {
            store: store.clone(),
            selection: Selection::default(),
            scroll_buffer: ScrollBuffer::new(),
            should_update_scroll_buffer: true,
            display_width: 0,
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        if selection.tab != self.selection.tab {
            self.scroll_buffer.scroll_to_top();
        }
        if selection != self.selection {
            self.selection = selection;
            self.should_update_scroll_buffer = true;
        }
    }

    pub fn build_lines(&self, width: usize) -> Vec<Line> {
        match self.selection.tab {
            Tab::Overview => overview_lines(&self.store, self.selection.activity_metric, width),
            tab => placeholder_lines(tab, width),
        }
    }

    fn update_scroll_buffer(&mut self) {
        let lines = self.build_lines(self.display_width);
        self.scroll_buffer.set_lines(lines);
        self.should_update_scroll_buffer = false;
    }
}

impl Render for DashboardPane {
    fn should_render(&self) -> bool {
        self.should_update_scroll_buffer || self.scroll_buffer.should_render()
    }

    fn invalidate(&mut self) {
        self.should_update_scroll_buffer = true;
    }

    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()> {
        // NB: one column of margin on the right keeps wide glyphs off the terminal edge
        let width = (bounding_box.width as usize).saturating_sub(1);

        if self.should_update_scroll_buffer || self.display_width != width {
            self.display_width = width;
            self.update_scroll_buffer();
        }

        self.scroll_buffer.render(stdout, bounding_box)
    }
}

impl Input for DashboardPane {
    fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        self.scroll_buffer.handle_key_event(event)
    }
}
