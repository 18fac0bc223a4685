use crate::content::Content;
use crate::navigator::VirtualPath;
use crate::theme::ThemeName;

mod info;
mod navigation;
mod shell;

/// State change a handler asks the interpreter to apply after its lines are
/// appended. Handlers themselves never mutate the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearScrollback,
    ChangeDirectory(VirtualPath),
    SwitchTheme(ThemeName),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub effect: Option<Effect>,
}

impl CommandOutput {
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            effect: None,
        }
    }

    pub fn with_effect(lines: Vec<String>, effect: Effect) -> Self {
        Self {
            lines,
            effect: Some(effect),
        }
    }
}

/// Read-only view of the session handed to every handler.
#[derive(Debug, Clone, Copy)]
pub struct CommandEnv<'a> {
    pub content: &'a Content,
    pub path: &'a VirtualPath,
    pub history: &'a [String],
    pub theme: ThemeName,
    pub registry: &'a CommandRegistry,
}

pub type CommandHandler = fn(&CommandEnv<'_>, &[String]) -> CommandOutput;

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub handler: CommandHandler,
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Every built-in, in the order `help` lists them.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(CommandSpec {
            name: "help",
            usage: "help",
            description: "Show available commands",
            handler: shell::help,
        });
        registry.register(CommandSpec {
            name: "about",
            usage: "about",
            description: "Learn about me",
            handler: info::about,
        });
        registry.register(CommandSpec {
            name: "skills",
            usage: "skills",
            description: "View my technical skills",
            handler: info::skills,
        });
        registry.register(CommandSpec {
            name: "projects",
            usage: "projects",
            description: "See my projects",
            handler: navigation::projects,
        });
        registry.register(CommandSpec {
            name: "experience",
            usage: "experience",
            description: "View work experience",
            handler: info::experience,
        });
        registry.register(CommandSpec {
            name: "contact",
            usage: "contact",
            description: "Get contact information",
            handler: info::contact,
        });
        registry.register(CommandSpec {
            name: "resume",
            usage: "resume",
            description: "Resume summary and download link",
            handler: info::resume,
        });
        registry.register(CommandSpec {
            name: "themes",
            usage: "themes",
            description: "List available themes",
            handler: shell::themes,
        });
        registry.register(CommandSpec {
            name: "theme",
            usage: "theme <name>",
            description: "Switch to a theme",
            handler: shell::theme,
        });
        registry.register(CommandSpec {
            name: "pwd",
            usage: "pwd",
            description: "Print current directory",
            handler: navigation::pwd,
        });
        registry.register(CommandSpec {
            name: "ls",
            usage: "ls",
            description: "List directory contents",
            handler: navigation::ls,
        });
        registry.register(CommandSpec {
            name: "cd",
            usage: "cd <dir>",
            description: "Change directory",
            handler: navigation::cd,
        });
        registry.register(CommandSpec {
            name: "history",
            usage: "history",
            description: "Show command history",
            handler: shell::history,
        });
        registry.register(CommandSpec {
            name: "clear",
            usage: "clear",
            description: "Clear terminal",
            handler: shell::clear,
        });
        registry
    }

    /// Adds or replaces a command. Lookup is by exact lowercase name.
    pub fn register(&mut self, spec: CommandSpec) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.name == spec.name) {
            *existing = spec;
        } else {
            self.commands.push(spec);
        }
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|spec| spec.name)
    }

    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&'static str> {
        self.names().filter(|name| name.starts_with(prefix)).collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/commands_tests.rs"]
mod tests;
