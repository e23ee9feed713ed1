#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl BoundingBox {
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Splits off the first `rows` rows; the remainder may be empty.
    pub fn split_top(self, rows: u16) -> (BoundingBox, BoundingBox) {
        let rows = rows.min(self.height);
        (
            BoundingBox { height: rows, ..self },
            BoundingBox {
                top: self.top + rows,
                height: self.height - rows,
                ..self
            },
        )
    }

    pub fn bottom(self) -> u16 {
        self.top + self.height
    }
}
