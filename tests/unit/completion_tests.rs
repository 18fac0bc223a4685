use super::*;
use crate::commands::{CommandOutput, CommandRegistry, CommandSpec};
use crate::content::Content;
use crate::navigator::VirtualPath;

fn content() -> Content {
    Content::embedded().expect("embedded content should parse")
}

fn complete_with(
    registry: &CommandRegistry,
    path: &VirtualPath,
    buffer: &str,
) -> Option<Completion> {
    let content = content();
    let env = CommandEnv {
        content: &content,
        path,
        history: &[],
        theme: ThemeName::Dark,
        registry,
    };
    Autocompleter::default().complete(&env, buffer)
}

fn complete(buffer: &str) -> Option<Completion> {
    complete_with(&CommandRegistry::builtin(), &VirtualPath::Root, buffer)
}

fn noop(_env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::default()
}

fn registry_with(names: &[&'static str]) -> CommandRegistry {
    let mut registry = CommandRegistry::default();
    for &name in names {
        registry.register(CommandSpec {
            name,
            usage: name,
            description: "",
            handler: noop,
        });
    }
    registry
}

#[test]
fn empty_or_whitespace_buffer_is_a_no_op() {
    assert_eq!(complete(""), None);
    assert_eq!(complete("   "), None);
}

#[test]
fn unique_command_prefix_replaces_buffer_with_trailing_space() {
    let registry = registry_with(&["help"]);
    assert_eq!(
        complete_with(&registry, &VirtualPath::Root, "hel"),
        Some(Completion::Replace {
            text: "help ".to_string(),
            cursor: 5,
        })
    );
}

#[test]
fn shared_command_prefix_suggests_all_matches() {
    let registry = registry_with(&["history", "help"]);
    assert_eq!(
        complete_with(&registry, &VirtualPath::Root, "h"),
        Some(Completion::Suggestions(vec![
            "history".to_string(),
            "help".to_string(),
        ]))
    );
}

#[test]
fn command_prefix_matching_ignores_case() {
    assert_eq!(
        complete("EXP"),
        Some(Completion::Replace {
            text: "experience ".to_string(),
            cursor: 11,
        })
    );
}

#[test]
fn unknown_command_prefix_yields_nothing() {
    assert_eq!(complete("zzz"), None);
}

#[test]
fn cd_completes_unique_directory() {
    assert_eq!(
        complete("cd w"),
        Some(Completion::Replace {
            text: "cd web-development".to_string(),
            cursor: 18,
        })
    );
}

#[test]
fn cd_offers_parent_only_inside_a_directory() {
    assert_eq!(complete("cd ."), None);
    let inside = VirtualPath::Directory("ai-ml".to_string());
    assert_eq!(
        complete_with(&CommandRegistry::builtin(), &inside, "cd ."),
        Some(Completion::Replace {
            text: "cd ..".to_string(),
            cursor: 5,
        })
    );
}

#[test]
fn theme_completion_lists_ambiguous_matches() {
    assert_eq!(
        complete("theme d"),
        Some(Completion::Suggestions(vec![
            "dark".to_string(),
            "dracula".to_string(),
        ]))
    );
    assert_eq!(
        complete("Theme MO"),
        Some(Completion::Replace {
            text: "theme monokai".to_string(),
            cursor: 13,
        })
    );
}

#[test]
fn commands_without_argument_source_are_not_completed() {
    assert_eq!(complete("ls w"), None);
    assert_eq!(complete("history x"), None);
}

#[test]
fn new_argument_sources_can_be_registered() {
    fn colors(_env: &CommandEnv<'_>) -> Vec<String> {
        vec!["red".to_string(), "green".to_string()]
    }
    let content = content();
    let registry = CommandRegistry::builtin();
    let env = CommandEnv {
        content: &content,
        path: &VirtualPath::Root,
        history: &[],
        theme: ThemeName::Dark,
        registry: &registry,
    };
    let mut completer = Autocompleter::empty();
    assert_eq!(completer.complete(&env, "paint g"), None);
    completer.register("paint", colors);
    assert_eq!(
        completer.complete(&env, "paint g"),
        Some(Completion::Replace {
            text: "paint green".to_string(),
            cursor: 11,
        })
    );
}
