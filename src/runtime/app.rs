//! Application state machine: two panes, one line editor, a marquee timer.

use crate::core::entry_list::EntryList;
use crate::core::input::Key;
use crate::core::line_editor::{EditOutcome, LineEditor, DEFAULT_MAX_LEN};
use crate::render::layout::PaneSize;

/// Columns per second the marquee advances.
pub const SCROLL_EFFECT_SPEED: f32 = 4.0;
/// Seconds the marquee rests at full scroll before restarting.
pub const WAIT_EFFECT_TIME: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Todo,
    Done,
}

impl Pane {
    pub const ALL: [Pane; 2] = [Pane::Todo, Pane::Done];

    pub fn index(self) -> usize {
        match self {
            Pane::Todo => 0,
            Pane::Done => 1,
        }
    }

    pub fn other(self) -> Pane {
        match self {
            Pane::Todo => Pane::Done,
            Pane::Done => Pane::Todo,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Todo => "TODO",
            Pane::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Add,
    Edit,
}

/// What the frame loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignal {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    lists: [EntryList; 2],
    mode: Mode,
    active: Pane,
    editor: LineEditor,
    scroll_effect: f32,
    wait_effect: f32,
    viewport: [PaneSize; 2],
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}

impl App {
    /// Empty lists, TODO pane active, idle.
    pub fn new(max_entry_len: usize) -> Self {
        Self {
            lists: [EntryList::new(), EntryList::new()],
            mode: Mode::Idle,
            active: Pane::Todo,
            editor: LineEditor::new(max_entry_len),
            scroll_effect: 0.0,
            wait_effect: 0.0,
            viewport: [PaneSize::default(); 2],
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_pane(&self) -> Pane {
        self.active
    }

    pub fn list(&self, pane: Pane) -> &EntryList {
        &self.lists[pane.index()]
    }

    /// Direct list access, used to seed entries.
    pub fn list_mut(&mut self, pane: Pane) -> &mut EntryList {
        &mut self.lists[pane.index()]
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn viewport(&self, pane: Pane) -> PaneSize {
        self.viewport[pane.index()]
    }

    /// Marquee timer as `(scroll_effect, wait_effect)`.
    pub fn effects(&self) -> (f32, f32) {
        (self.scroll_effect, self.wait_effect)
    }

    /// Record the content size of both panes and re-clamp scroll windows.
    pub fn set_viewport(&mut self, sizes: [PaneSize; 2]) {
        self.viewport = sizes;
        self.sync_windows();
    }

    pub fn handle_key(&mut self, key: Key) -> AppSignal {
        let signal = match self.mode {
            Mode::Idle => self.handle_idle(key),
            Mode::Add | Mode::Edit => {
                self.handle_editing(key);
                AppSignal::Continue
            }
        };
        self.sync_windows();
        signal
    }

    /// Advance the marquee for the selected entry by `dt` seconds.
    ///
    /// The scroll stops once the last column is visible (`len - width`),
    /// rests for [`WAIT_EFFECT_TIME`], then starts over.
    pub fn tick(&mut self, dt: f32) {
        if self.mode != Mode::Idle {
            return;
        }
        let width = self.viewport(self.active).width;
        let Some(overflow) = self.selected_overflow(width) else {
            self.reset_effects();
            return;
        };

        if self.scroll_effect >= overflow as f32 {
            self.wait_effect += dt;
            if self.wait_effect >= WAIT_EFFECT_TIME {
                self.reset_effects();
            }
        } else {
            self.scroll_effect += dt * SCROLL_EFFECT_SPEED;
        }
    }

    /// First column of the selected entry to draw, never past `len - width`.
    pub fn scroll_column(&self) -> usize {
        let width = self.viewport(self.active).width;
        match self.selected_overflow(width) {
            Some(overflow) => (self.scroll_effect as usize).min(overflow),
            None => 0,
        }
    }

    fn selected_overflow(&self, width: usize) -> Option<usize> {
        let entry = self.list(self.active).selected()?;
        entry.len().checked_sub(width).filter(|overflow| *overflow > 0)
    }

    fn reset_effects(&mut self) {
        self.scroll_effect = 0.0;
        self.wait_effect = 0.0;
    }

    fn enter_mode(&mut self, mode: Mode) {
        log::debug!("mode {:?} -> {:?} on {:?}", self.mode, mode, self.active);
        self.mode = mode;
        self.reset_effects();
    }

    fn handle_idle(&mut self, key: Key) -> AppSignal {
        let active = self.active;
        match key {
            Key::Char(b'q') => {
                log::info!("quit requested");
                return AppSignal::Quit;
            }
            Key::Char(b'a') => {
                self.editor.clear();
                self.enter_mode(Mode::Add);
            }
            Key::Char(b'e') => {
                if let Some(entry) = self.lists[active.index()].selected() {
                    self.editor.load(entry);
                    self.enter_mode(Mode::Edit);
                }
            }
            Key::Char(b'd') => {
                let list = &mut self.lists[active.index()];
                let cursor = list.cursor();
                if let Some(entry) = list.delete_at(cursor) {
                    log::debug!("deleted {:?} from {:?}", entry.to_string_lossy(), active);
                    self.reset_effects();
                }
            }
            Key::Enter => {
                let [todo, done] = &mut self.lists;
                let (from, to) = match active {
                    Pane::Todo => (todo, done),
                    Pane::Done => (done, todo),
                };
                if !from.is_empty() {
                    let cursor = from.cursor();
                    from.move_to(to, cursor);
                    log::debug!("moved entry {:?} -> {:?}", active, active.other());
                    self.reset_effects();
                }
            }
            Key::Up => {
                self.lists[active.index()].select_prev();
                self.reset_effects();
            }
            Key::Down => {
                self.lists[active.index()].select_next();
                self.reset_effects();
            }
            Key::Left => {
                self.active = Pane::Todo;
                self.reset_effects();
            }
            Key::Right => {
                self.active = Pane::Done;
                self.reset_effects();
            }
            _ => {}
        }
        AppSignal::Continue
    }

    fn handle_editing(&mut self, key: Key) {
        let outcome = self.editor.handle_key(key);
        let list = &mut self.lists[self.active.index()];
        match (outcome, self.mode) {
            (EditOutcome::Pending, _) => return,
            (EditOutcome::Commit, Mode::Add) => {
                list.add_entry(self.editor.text().as_bytes());
                log::debug!("added {:?}", self.editor.text().to_string_lossy());
            }
            (EditOutcome::Commit, _) => {
                if let Some(entry) = list.selected_mut() {
                    entry.overwrite_from(self.editor.text());
                    log::debug!("edited entry to {:?}", entry.to_string_lossy());
                }
            }
            (EditOutcome::Cancel, _) => {
                log::debug!("{:?} cancelled", self.mode);
            }
        }
        self.editor.clear();
        self.enter_mode(Mode::Idle);
    }

    fn sync_windows(&mut self) {
        for pane in Pane::ALL {
            let size = self.viewport[pane.index()];
            let list = &mut self.lists[pane.index()];
            let editing_here = pane == self.active && self.mode == Mode::Add;
            if editing_here {
                let row = list.len();
                list.reveal(row, size.height);
            } else {
                list.limit_scroll(size.height);
            }
        }
        let width = self.viewport(self.active).width;
        self.editor.set_width(width);
    }
}
