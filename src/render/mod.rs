//! Layout and drawing.

pub mod draw;
pub mod layout;

pub use draw::draw_app;
pub use layout::{Layout, PaneSize, Rect};
