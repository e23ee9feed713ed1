use crate::ui_framework::bounding_box::BoundingBox;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::io::Stdout;

pub mod bounding_box;
pub mod scroll_buffer;

pub trait Render {
    // CR-soon: invalidation is still by hand; every setter has to remember to flip the flag.
    fn should_render(&self) -> bool;

    fn invalidate(&mut self);

    /// NB: [render] takes [&mut self] since there isn't a separate notification to component that
    /// their bbox changed.
    fn render(&mut self, stdout: &mut Stdout, bounding_box: BoundingBox) -> Result<()>;

    fn get_cursor(&self) -> (u16, u16) {
        (0, 0)
    }
}

pub trait Input {
    /// Returns whether the event was consumed.
    fn handle_key_event(&mut self, event: &KeyEvent) -> bool;
}

pub struct Component<T: Render> {
    pub bounding_box: BoundingBox,
    pub component: T,
}

impl<T: Render> Component<T> {
    pub fn new(component: T) -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            component,
        }
    }

    pub fn set_bounding_box(&mut self, bounding_box: BoundingBox) {
        if self.bounding_box != bounding_box {
            self.bounding_box = bounding_box;
            self.component.invalidate();
        }
    }

    pub fn render_if_necessary(&mut self, stdout: &mut Stdout) -> Result<()> {
        if self.component.should_render() && self.bounding_box.height > 0 {
            self.component.render(stdout, self.bounding_box)?;
        }
        Ok(())
    }

    pub fn get_cursor(&self) -> (u16, u16) {
        let BoundingBox { left, top, .. } = self.bounding_box;
        let relative = self.component.get_cursor();
        (left + relative.0, top + relative.1)
    }
}
