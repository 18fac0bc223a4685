use crate::commands::{CommandEnv, CommandRegistry, Effect};
use crate::completion::{Autocompleter, Completion};
use crate::content::Content;
use crate::navigator::VirtualPath;
use crate::session::{Line, Session};
use crate::theme::{ThemeName, ThemeSwitcher};

/// Sole owner and mutator of the session. Presentation layers feed it
/// logical input events and read back scrollback, prompt and theme.
pub struct Interpreter {
    session: Session,
    registry: CommandRegistry,
    completer: Autocompleter,
    content: Content,
    theme: ThemeName,
    theme_switcher: Box<dyn ThemeSwitcher>,
}

impl Interpreter {
    pub fn new(content: Content, theme: ThemeName, theme_switcher: Box<dyn ThemeSwitcher>) -> Self {
        Self {
            session: Session::default(),
            registry: CommandRegistry::builtin(),
            completer: Autocompleter::default(),
            content,
            theme,
            theme_switcher,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    #[cfg(test)]
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[cfg(test)]
    pub fn with_completer(mut self, completer: Autocompleter) -> Self {
        self.completer = completer;
        self
    }

    pub fn submit(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }

        self.session.history.push(trimmed);
        self.session
            .scrollback
            .push(Line::command(trimmed, &self.session.path));

        let mut tokens = trimmed.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };
        let name = first.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(spec) = self.registry.find(&name).copied() else {
            tracing::debug!(command = %name, "unknown command");
            self.session.scrollback.push(Line::error(format!(
                "Command not found: {name}. Type 'help' for available commands."
            )));
            return;
        };

        tracing::debug!(command = spec.name, args = args.len(), "dispatching command");
        let output = (spec.handler)(&self.env(), &args);
        for line in output.lines {
            self.session.scrollback.push(Line::output(line));
        }
        if let Some(effect) = output.effect {
            self.apply(effect);
        }
    }

    /// Submits whatever is in the input buffer. The buffer is emptied even
    /// when the submission turns out to be blank.
    pub fn submit_input(&mut self) {
        let raw = self.session.input.take();
        self.session.history.reset_cursor();
        self.submit(&raw);
    }

    pub fn recall_previous(&mut self) -> Option<String> {
        self.session.recall_previous()
    }

    pub fn recall_next(&mut self) -> Option<String> {
        self.session.recall_next()
    }

    /// Runs completion on the input buffer and applies the result: a unique
    /// hit rewrites the buffer, several hits are echoed as one output line.
    pub fn complete_input(&mut self) -> Option<Completion> {
        let completion = self
            .completer
            .complete(&self.env(), self.session.input.text())?;
        match &completion {
            Completion::Replace { text, .. } => self.session.input.replace(text.clone()),
            Completion::Suggestions(items) => {
                self.session.scrollback.push(Line::output(items.join("  ")));
            }
        }
        Some(completion)
    }

    pub fn insert_char(&mut self, c: char) {
        self.session.input.insert_char(c);
    }

    pub fn backspace(&mut self) {
        self.session.input.backspace();
    }

    pub fn delete(&mut self) {
        self.session.input.delete();
    }

    pub fn cursor_left(&mut self) {
        self.session.input.move_left();
    }

    pub fn cursor_right(&mut self) {
        self.session.input.move_right();
    }

    pub fn cursor_home(&mut self) {
        self.session.input.move_home();
    }

    pub fn cursor_end(&mut self) {
        self.session.input.move_end();
    }

    pub fn scrollback(&self) -> &[Line] {
        self.session.scrollback.lines()
    }

    pub fn scrollback_generation(&self) -> u64 {
        self.session.scrollback.generation()
    }

    #[cfg(test)]
    pub fn history(&self) -> &[String] {
        self.session.history.entries()
    }

    #[cfg(test)]
    pub fn history_cursor(&self) -> Option<usize> {
        self.session.history.cursor()
    }

    pub fn input(&self) -> &str {
        self.session.input.text()
    }

    pub fn cursor(&self) -> usize {
        self.session.input.cursor()
    }

    pub fn path(&self) -> &VirtualPath {
        &self.session.path
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    fn env(&self) -> CommandEnv<'_> {
        CommandEnv {
            content: &self.content,
            path: &self.session.path,
            history: self.session.history.entries(),
            theme: self.theme,
            registry: &self.registry,
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ClearScrollback => self.session.scrollback.clear(),
            Effect::ChangeDirectory(path) => {
                tracing::info!(from = %self.session.path, to = %path, "changed directory");
                self.session.path = path;
            }
            Effect::SwitchTheme(name) => {
                tracing::info!(from = %self.theme, to = %name, "switching theme");
                self.theme = name;
                self.theme_switcher.switch_theme(name);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/interpreter_tests.rs"]
mod tests;
