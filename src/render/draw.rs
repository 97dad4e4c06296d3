//! Draws the application state through a [`Renderer`].
//!
//! Nothing here mutates the model; the marquee position and scroll windows
//! are read as the state machine left them.

use crate::core::output::{Renderer, HIGHLIGHT_BG, HIGHLIGHT_FG};
use crate::render::layout::{Layout, Rect};
use crate::runtime::app::{App, Mode, Pane};

const TOP_LEFT: &str = "╔";
const TOP_RIGHT: &str = "╗";
const BOTTOM_LEFT: &str = "╚";
const BOTTOM_RIGHT: &str = "╝";
const HORIZONTAL: &str = "═";
const VERTICAL: &str = "║";

/// Draw both panes and, while editing, the line editor.
pub fn draw_app<R: Renderer + ?Sized>(app: &App, layout: &Layout, out: &mut R) {
    for pane in Pane::ALL {
        let content = draw_box(out, layout.panes[pane.index()], pane.title());
        draw_list(out, app, pane, content);
    }
}

/// Draw a double-line box with `title` on its top edge and blank its interior.
///
/// Returns the content area. Boxes smaller than 3x3 are skipped.
pub fn draw_box<R: Renderer + ?Sized>(out: &mut R, rect: Rect, title: &str) -> Rect {
    let content = rect.inner();
    if rect.w < 3 || rect.h < 3 {
        return content;
    }

    let edge = HORIZONTAL.repeat(content.w);
    out.position_cursor(rect.x, rect.y);
    out.write_text(format!("{TOP_LEFT}{edge}{TOP_RIGHT}").as_bytes());

    let blank = " ".repeat(content.w);
    for row in 1..rect.h - 1 {
        out.position_cursor(rect.x, rect.y + row);
        out.write_text(format!("{VERTICAL}{blank}{VERTICAL}").as_bytes());
    }

    out.position_cursor(rect.x, rect.y + rect.h - 1);
    out.write_text(format!("{BOTTOM_LEFT}{edge}{BOTTOM_RIGHT}").as_bytes());

    if title.len() <= content.w {
        out.position_cursor(content.x, rect.y);
        out.write_text(title.as_bytes());
    }
    content
}

fn draw_list<R: Renderer + ?Sized>(out: &mut R, app: &App, pane: Pane, area: Rect) {
    if area.w == 0 || area.h == 0 {
        return;
    }
    let list = app.list(pane);
    let is_active = pane == app.active_pane();

    for (row, index) in (list.scroll()..list.len()).take(area.h).enumerate() {
        let Some(entry) = list.get(index) else {
            break;
        };
        let selected = is_active && index == list.cursor();
        if selected && app.mode() == Mode::Edit {
            continue;
        }

        out.position_cursor(area.x, area.y + row);
        if selected && app.mode() == Mode::Idle {
            let start = app.scroll_column().min(entry.len());
            out.set_highlight(HIGHLIGHT_BG, HIGHLIGHT_FG);
            out.write_text(clip(&entry.as_bytes()[start..], area.w));
            out.clear_highlight();
        } else {
            out.write_text(clip(entry.as_bytes(), area.w));
        }
    }

    if is_active && app.mode() != Mode::Idle {
        let row = match app.mode() {
            Mode::Edit => list.cursor(),
            _ => list.len(),
        };
        let row = row.saturating_sub(list.scroll()).min(area.h - 1);
        draw_editor(out, app, area.x, area.y + row);
    }
}

fn draw_editor<R: Renderer + ?Sized>(out: &mut R, app: &App, x: usize, y: usize) {
    let editor = app.editor();
    out.position_cursor(x, y);
    out.write_text(editor.visible());

    out.position_cursor(x + editor.cursor() - editor.offset(), y);
    out.set_highlight(HIGHLIGHT_BG, HIGHLIGHT_FG);
    let cell = editor.byte_at_cursor().unwrap_or(b' ');
    out.write_text(&[cell]);
    out.clear_highlight();
}

fn clip(bytes: &[u8], width: usize) -> &[u8] {
    &bytes[..bytes.len().min(width)]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{draw_app, draw_box};
    use crate::core::input::Key;
    use crate::core::output::Renderer;
    use crate::core::terminal::TermSize;
    use crate::render::layout::{Layout, Rect};
    use crate::runtime::app::{App, Pane};

    /// Renders into a character grid so tests can assert on screen rows.
    struct Grid {
        cells: Vec<Vec<char>>,
        highlighted: Vec<Vec<bool>>,
        x: usize,
        y: usize,
        highlight: bool,
    }

    impl Grid {
        fn new(cols: usize, rows: usize) -> Self {
            Self {
                cells: vec![vec![' '; cols]; rows],
                highlighted: vec![vec![false; cols]; rows],
                x: 1,
                y: 1,
                highlight: false,
            }
        }

        fn row(&self, y: usize) -> String {
            self.cells[y - 1].iter().collect()
        }

        fn highlighted_text(&self, y: usize) -> String {
            self.cells[y - 1]
                .iter()
                .zip(&self.highlighted[y - 1])
                .filter(|(_, lit)| **lit)
                .map(|(ch, _)| *ch)
                .collect()
        }
    }

    impl Renderer for Grid {
        fn position_cursor(&mut self, x: usize, y: usize) {
            self.x = x;
            self.y = y;
        }

        fn set_highlight(&mut self, _bg: u8, _fg: u8) {
            self.highlight = true;
        }

        fn clear_highlight(&mut self) {
            self.highlight = false;
        }

        fn write_text(&mut self, bytes: &[u8]) {
            for ch in String::from_utf8_lossy(bytes).chars() {
                if let Some(cell) = self
                    .cells
                    .get_mut(self.y - 1)
                    .and_then(|row| row.get_mut(self.x - 1))
                {
                    *cell = ch;
                    self.highlighted[self.y - 1][self.x - 1] = self.highlight;
                }
                self.x += 1;
            }
        }
    }

    fn render(app: &mut App, cols: u16, rows: u16) -> Grid {
        let layout = Layout::for_size(TermSize { rows, cols });
        app.set_viewport(layout.pane_sizes());
        let mut grid = Grid::new(usize::from(cols), usize::from(rows));
        draw_app(app, &layout, &mut grid);
        grid
    }

    #[test]
    fn box_has_borders_and_title() {
        let mut grid = Grid::new(8, 3);
        let content = draw_box(&mut grid, Rect::new(1, 1, 8, 3), "TODO");
        assert_eq!(content, Rect::new(2, 2, 6, 1));
        assert_eq!(grid.row(1), "╔TODO══╗");
        assert_eq!(grid.row(2), "║      ║");
        assert_eq!(grid.row(3), "╚══════╝");
    }

    #[test]
    fn title_dropped_when_too_wide() {
        let mut grid = Grid::new(5, 3);
        draw_box(&mut grid, Rect::new(1, 1, 5, 3), "TODO");
        assert_eq!(grid.row(1), "╔═══╗");
    }

    #[test]
    fn panes_show_entries_and_highlight_selection() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"milk");
        app.list_mut(Pane::Todo).add_entry(b"eggs");
        app.list_mut(Pane::Done).add_entry(b"bread");
        let grid = render(&mut app, 20, 5);
        assert_eq!(grid.row(1), "╔TODO════╗╔DONE════╗");
        assert_eq!(grid.row(2), "║milk    ║║bread   ║");
        assert_eq!(grid.row(3), "║eggs    ║║        ║");
        assert_eq!(grid.highlighted_text(3), "eggs");
        assert_eq!(grid.highlighted_text(2), "");
    }

    #[test]
    fn long_entries_are_clipped_and_marquee_shifted() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"0123456789");
        let grid = render(&mut app, 20, 4);
        assert_eq!(grid.row(2), "║01234567║║        ║");

        app.tick(0.5);
        let grid = render(&mut app, 20, 4);
        assert_eq!(grid.highlighted_text(2), "23456789");
    }

    #[test]
    fn add_mode_draws_editor_below_entries() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"one");
        app.handle_key(Key::Char(b'a'));
        for byte in b"two" {
            app.handle_key(Key::Char(*byte));
        }
        let grid = render(&mut app, 20, 5);
        assert_eq!(grid.row(2), "║one     ║║        ║");
        assert_eq!(grid.row(3), "║two     ║║        ║");
        assert_eq!(grid.highlighted_text(3), " ");
    }

    #[test]
    fn edit_mode_replaces_selected_row() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"one");
        app.list_mut(Pane::Todo).add_entry(b"two");
        app.handle_key(Key::Char(b'e'));
        app.handle_key(Key::Delete);
        let grid = render(&mut app, 20, 5);
        assert_eq!(grid.row(2), "║one     ║║        ║");
        assert_eq!(grid.row(3), "║wo      ║║        ║");
        assert_eq!(grid.highlighted_text(3), "w");
    }

    #[test]
    fn inactive_pane_has_no_highlight() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"left");
        app.handle_key(Key::Right);
        let grid = render(&mut app, 20, 4);
        assert_eq!(grid.highlighted_text(2), "");
    }

    #[test]
    fn tiny_terminal_draws_nothing_but_does_not_panic() {
        let mut app = App::default();
        app.list_mut(Pane::Todo).add_entry(b"x");
        app.handle_key(Key::Char(b'a'));
        let grid = render(&mut app, 4, 2);
        assert_eq!(grid.row(1), "    ");
    }
}
