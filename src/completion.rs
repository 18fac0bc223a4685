use std::collections::HashMap;

use crate::commands::CommandEnv;
use crate::navigator::Navigator;
use crate::theme::ThemeName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Unique hit: the whole buffer becomes `text`, cursor at `cursor` chars.
    Replace { text: String, cursor: usize },
    /// Several hits: shown to the user, buffer untouched.
    Suggestions(Vec<String>),
}

/// Produces the argument candidates for one command.
pub type ArgumentSource = fn(&CommandEnv<'_>) -> Vec<String>;

#[derive(Debug, Clone)]
pub struct Autocompleter {
    sources: HashMap<&'static str, ArgumentSource>,
}

impl Default for Autocompleter {
    fn default() -> Self {
        let mut completer = Self {
            sources: HashMap::new(),
        };
        completer.register("cd", directory_candidates);
        completer.register("theme", theme_candidates);
        completer
    }
}

impl Autocompleter {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: &'static str, source: ArgumentSource) {
        self.sources.insert(command, source);
    }

    pub fn complete(&self, env: &CommandEnv<'_>, buffer: &str) -> Option<Completion> {
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return None;
        }

        let Some((head, rest)) = trimmed.split_once(char::is_whitespace) else {
            let head = trimmed.to_lowercase();
            let matches = env.registry.names_with_prefix(&head);
            return resolve(matches, |name| format!("{name} "));
        };

        let head = head.to_lowercase();
        let source = self.sources.get(head.as_str())?;
        let prefix = rest.trim().to_lowercase();
        let candidates = source(env);
        let matches: Vec<&str> = candidates
            .iter()
            .map(String::as_str)
            .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
            .collect();
        resolve(matches, |candidate| format!("{head} {candidate}"))
    }
}

fn resolve<F>(matches: Vec<&str>, replacement: F) -> Option<Completion>
where
    F: Fn(&str) -> String,
{
    match matches.as_slice() {
        [] => None,
        [only] => {
            let text = replacement(*only);
            let cursor = text.chars().count();
            Some(Completion::Replace { text, cursor })
        }
        many => Some(Completion::Suggestions(
            many.iter().map(|item| item.to_string()).collect(),
        )),
    }
}

fn directory_candidates(env: &CommandEnv<'_>) -> Vec<String> {
    Navigator::new(env.content).directory_candidates(env.path)
}

fn theme_candidates(_env: &CommandEnv<'_>) -> Vec<String> {
    ThemeName::names().into_iter().map(str::to_string).collect()
}

#[cfg(test)]
#[path = "../tests/unit/completion_tests.rs"]
mod tests;
