//! Screen layout: the terminal rectangle split into the two panes.

use crate::core::terminal::TermSize;

/// A rectangle of cells with a 1-based origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// The area inside a one-cell border.
    pub fn inner(self) -> Rect {
        Rect {
            x: self.x + 1,
            y: self.y + 1,
            w: self.w.saturating_sub(2),
            h: self.h.saturating_sub(2),
        }
    }

    /// Split into left and right halves; an odd column goes to the left.
    pub fn split_horizontal(self) -> (Rect, Rect) {
        let left_w = self.w.div_ceil(2);
        let left = Rect::new(self.x, self.y, left_w, self.h);
        let right = Rect::new(self.x + left_w, self.y, self.w / 2, self.h);
        (left, right)
    }
}

/// Visible size of a pane's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSize {
    pub width: usize,
    pub height: usize,
}

impl Default for PaneSize {
    /// Content area of one pane on an 80x24 terminal.
    fn default() -> Self {
        Layout::for_size(TermSize { rows: 24, cols: 80 }).pane_sizes()[0]
    }
}

/// Outer and content rectangles of both panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub panes: [Rect; 2],
}

impl Layout {
    pub fn for_size(size: TermSize) -> Self {
        let screen = Rect::new(1, 1, usize::from(size.cols), usize::from(size.rows));
        let (left, right) = screen.split_horizontal();
        Self {
            panes: [left, right],
        }
    }

    pub fn content(&self, index: usize) -> Rect {
        self.panes[index].inner()
    }

    pub fn pane_sizes(&self) -> [PaneSize; 2] {
        [0, 1].map(|index| {
            let content = self.content(index);
            PaneSize {
                width: content.w,
                height: content.h,
            }
        })
    }
}
