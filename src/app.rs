use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::events::AppEvent;
use crate::interpreter::Interpreter;
use crate::session::LineKind;
use crate::text_layout::{char_wrap_position, wrap_words};
use crate::theme::{Theme, ThemeCatalog};

const MOUSE_SCROLL_ROWS: u16 = 3;

/// One wrapped screen row of the scrollback. `prompt` is only set on the
/// first row of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: LineKind,
    pub prompt: String,
    pub text: String,
}

#[derive(Debug, Clone)]
struct WrappedScrollbackCache {
    width: u16,
    generation: u64,
    rows: Rc<Vec<DisplayRow>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Viewport {
    width: u16,
    height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptIdentity {
    pub user: String,
    pub host: String,
}

impl Default for PromptIdentity {
    fn default() -> Self {
        Self {
            user: "subodh".to_string(),
            host: "portfolio".to_string(),
        }
    }
}

pub struct App {
    pub running: bool,
    pub ticks: u64,
    interpreter: Interpreter,
    identity: PromptIdentity,
    palettes: ThemeCatalog,
    scroll: u16,
    follow: bool,
    viewport: Cell<Viewport>,
    wrap_cache: RefCell<Option<WrappedScrollbackCache>>,
}

impl App {
    pub fn new(interpreter: Interpreter, identity: PromptIdentity, palettes: ThemeCatalog) -> Self {
        Self {
            running: true,
            ticks: 0,
            interpreter,
            identity,
            palettes,
            scroll: 0,
            follow: true,
            viewport: Cell::new(Viewport::default()),
            wrap_cache: RefCell::new(None),
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick | AppEvent::Resize => self.on_tick(),
            AppEvent::Quit => self.quit(),
            AppEvent::Submit => {
                self.interpreter.submit_input();
                self.follow = true;
            }
            AppEvent::HistoryPrev => {
                self.interpreter.recall_previous();
            }
            AppEvent::HistoryNext => {
                self.interpreter.recall_next();
            }
            AppEvent::CursorLeft => self.interpreter.cursor_left(),
            AppEvent::CursorRight => self.interpreter.cursor_right(),
            AppEvent::CursorHome => self.interpreter.cursor_home(),
            AppEvent::CursorEnd => self.interpreter.cursor_end(),
            AppEvent::Complete => {
                if self.interpreter.complete_input().is_some() {
                    self.follow = true;
                }
            }
            AppEvent::InputChar(c) => self.interpreter.insert_char(c),
            AppEvent::Backspace => self.interpreter.backspace(),
            AppEvent::Delete => self.interpreter.delete(),
            AppEvent::ScrollPageUp => self.scroll_up(self.page_rows()),
            AppEvent::ScrollPageDown => self.scroll_down(self.page_rows()),
            AppEvent::MouseScrollUp => self.scroll_up(MOUSE_SCROLL_ROWS),
            AppEvent::MouseScrollDown => self.scroll_down(MOUSE_SCROLL_ROWS),
        }
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn palette(&self) -> Theme {
        self.palettes.palette(self.interpreter.theme())
    }

    /// `user@host:~/dir$` for the current directory.
    pub fn prompt(&self) -> String {
        self.prompt_for_label(&self.interpreter.path().prompt_label())
    }

    pub fn title(&self) -> String {
        format!(
            "{}@{}:{}",
            self.identity.user,
            self.identity.host,
            self.interpreter.path().prompt_label()
        )
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Remembers the scrollback pane size from the last draw so page
    /// scrolling knows how far to move.
    pub fn record_viewport(&self, width: u16, height: u16) {
        self.viewport.set(Viewport { width, height });
    }

    pub fn scroll_up(&mut self, rows: u16) {
        let current = self.scroll_offset();
        self.scroll = current.saturating_sub(rows.max(1));
        self.follow = false;
    }

    pub fn scroll_down(&mut self, rows: u16) {
        let max = self.max_scroll();
        let next = self.scroll_offset().saturating_add(rows.max(1)).min(max);
        self.scroll = next;
        self.follow = next >= max;
    }

    /// Top row shown in the scrollback pane for the recorded viewport.
    pub fn scroll_offset(&self) -> u16 {
        let max = self.max_scroll();
        if self.follow {
            max
        } else {
            self.scroll.min(max)
        }
    }

    pub fn scrollback_rows(&self, width: u16) -> Rc<Vec<DisplayRow>> {
        let width = width.max(1);
        let generation = self.interpreter.scrollback_generation();
        if let Some(cache) = self.wrap_cache.borrow().as_ref()
            && cache.width == width
            && cache.generation == generation
        {
            return Rc::clone(&cache.rows);
        }

        let rows = Rc::new(self.wrap_scrollback(width));
        *self.wrap_cache.borrow_mut() = Some(WrappedScrollbackCache {
            width,
            generation,
            rows: Rc::clone(&rows),
        });
        rows
    }

    /// Prompt plus input, hard-wrapped to `width`, with the cursor's row and
    /// column inside that layout.
    pub fn input_layout(&self, width: u16) -> (String, (u16, u16)) {
        let prompt = self.prompt();
        let line = format!("{prompt} {}", self.interpreter.input());
        let offset = prompt.chars().count() + 1 + self.interpreter.cursor();
        (line, char_wrap_position(offset, width))
    }

    fn prompt_for_label(&self, label: &str) -> String {
        format!("{}@{}:{label}$", self.identity.user, self.identity.host)
    }

    fn wrap_scrollback(&self, width: u16) -> Vec<DisplayRow> {
        let mut rows = Vec::new();
        for line in self.interpreter.scrollback() {
            match line.kind {
                LineKind::Command => {
                    let label = line.path.as_deref().unwrap_or("~");
                    let prompt = self.prompt_for_label(label);
                    let full = format!("{prompt} {}", line.text);
                    for (index, row) in wrap_words(&full, width).into_iter().enumerate() {
                        let split = if index == 0 {
                            row.strip_prefix(prompt.as_str())
                                .map(|rest| (prompt.clone(), rest.to_string()))
                        } else {
                            None
                        };
                        let (row_prompt, text) = split.unwrap_or((String::new(), row));
                        rows.push(DisplayRow {
                            kind: LineKind::Command,
                            prompt: row_prompt,
                            text,
                        });
                    }
                }
                kind => {
                    rows.extend(wrap_words(&line.text, width).into_iter().map(|text| {
                        DisplayRow {
                            kind,
                            prompt: String::new(),
                            text,
                        }
                    }));
                }
            }
        }
        rows
    }

    fn max_scroll(&self) -> u16 {
        let viewport = self.viewport.get();
        if viewport.height == 0 {
            return 0;
        }
        let total = self.scrollback_rows(viewport.width).len();
        let max = total.saturating_sub(usize::from(viewport.height));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    fn page_rows(&self) -> u16 {
        self.viewport.get().height.saturating_sub(1).max(1)
    }
}

#[cfg(test)]
#[path = "../tests/unit/app_tests.rs"]
mod tests;
