use serde::Serialize;

use crate::navigator::VirtualPath;

pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to My Portfolio Terminal",
    "Type 'help' for available commands",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Output,
    Command,
    Error,
}

/// One rendered scrollback record. Command lines carry the prompt path that
/// was current when they were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Line {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
            path: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            text: text.into(),
            path: None,
        }
    }

    pub fn command(text: impl Into<String>, path: &VirtualPath) -> Self {
        Self {
            kind: LineKind::Command,
            text: text.into(),
            path: Some(path.prompt_label()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scrollback {
    lines: Vec<Line>,
    generation: u64,
}

impl Scrollback {
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bumped on every mutation so renderers can cache wrapped output.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep<'a> {
    Entry(&'a str),
    Exhausted,
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(current) => current.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    pub fn next(&mut self) -> HistoryStep<'_> {
        let Some(current) = self.cursor else {
            return HistoryStep::Idle;
        };
        let index = current + 1;
        if index >= self.entries.len() {
            self.cursor = None;
            return HistoryStep::Exhausted;
        }
        self.cursor = Some(index);
        HistoryStep::Entry(&self.entries[index])
    }
}

/// Pending prompt text. The cursor is a char offset, never a byte offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = char_to_byte_idx(&self.text, self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor = self.cursor.saturating_add(1);
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_idx(&self.text, self.cursor - 1);
        let end = char_to_byte_idx(&self.text, self.cursor);
        self.text.drain(start..end);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = char_to_byte_idx(&self.text, self.cursor);
        let end = char_to_byte_idx(&self.text, self.cursor + 1);
        self.text.drain(start..end);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }
}

/// Everything one interactive session owns. Only the interpreter mutates it.
#[derive(Debug, Clone)]
pub struct Session {
    pub input: InputBuffer,
    pub scrollback: Scrollback,
    pub history: CommandHistory,
    pub path: VirtualPath,
}

impl Default for Session {
    fn default() -> Self {
        let mut scrollback = Scrollback::default();
        for line in WELCOME_LINES {
            scrollback.push(Line::output(line));
        }
        Self {
            input: InputBuffer::default(),
            scrollback,
            history: CommandHistory::default(),
            path: VirtualPath::Root,
        }
    }
}

impl Session {
    pub fn without_welcome() -> Self {
        let mut session = Self::default();
        session.scrollback.clear();
        session
    }

    pub fn recall_previous(&mut self) -> Option<String> {
        let entry = self.history.previous()?.to_string();
        self.input.replace(entry.clone());
        Some(entry)
    }

    pub fn recall_next(&mut self) -> Option<String> {
        match self.history.next() {
            HistoryStep::Entry(entry) => {
                let entry = entry.to_string();
                self.input.replace(entry.clone());
                Some(entry)
            }
            HistoryStep::Exhausted => {
                self.input.clear();
                None
            }
            HistoryStep::Idle => None,
        }
    }
}

fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}
