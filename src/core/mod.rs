//! Core model types and terminal interfaces.

pub mod entry_list;
pub mod input;
pub mod line_editor;
pub mod output;
pub mod terminal;
pub mod text_buffer;
