use super::*;
use crate::session::{LineKind, WELCOME_LINES};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct RecordingSwitcher {
    calls: Rc<RefCell<Vec<ThemeName>>>,
}

impl ThemeSwitcher for RecordingSwitcher {
    fn switch_theme(&mut self, name: ThemeName) {
        self.calls.borrow_mut().push(name);
    }
}

fn interpreter() -> (Interpreter, Rc<RefCell<Vec<ThemeName>>>) {
    let switcher = RecordingSwitcher::default();
    let calls = Rc::clone(&switcher.calls);
    let content = Content::embedded().expect("embedded content should parse");
    (
        Interpreter::new(content, ThemeName::Dark, Box::new(switcher)),
        calls,
    )
}

fn texts(interp: &Interpreter) -> Vec<&str> {
    interp
        .scrollback()
        .iter()
        .map(|line| line.text.as_str())
        .collect()
}

fn type_text(interp: &mut Interpreter, text: &str) {
    for c in text.chars() {
        interp.insert_char(c);
    }
}

#[test]
fn starts_with_welcome_lines_at_home() {
    let (interp, _) = interpreter();
    assert_eq!(texts(&interp), WELCOME_LINES);
    assert_eq!(interp.path(), &VirtualPath::Root);
    assert!(interp.history().is_empty());
}

#[test]
fn submission_grows_history_by_one_and_scrollback_by_output_plus_one() {
    let (mut interp, _) = interpreter();
    for input in ["help", "about", "ls", "pwd", "history", "nope"] {
        let history_before = interp.history().len();
        let scrollback_before = interp.scrollback().len();
        interp.submit(input);
        let command_index = scrollback_before;
        let output_lines = interp.scrollback().len() - scrollback_before - 1;
        assert_eq!(interp.history().len(), history_before + 1, "{input}");
        assert_eq!(interp.scrollback()[command_index].kind, LineKind::Command);
        assert!(output_lines >= 1, "{input} should produce output");
    }
}

#[test]
fn blank_submission_changes_nothing() {
    let (mut interp, _) = interpreter();
    interp.submit("");
    interp.submit("   \t ");
    assert!(interp.history().is_empty());
    assert_eq!(interp.scrollback().len(), WELCOME_LINES.len());
}

#[test]
fn command_line_is_trimmed_and_records_prompt_path() {
    let (mut interp, _) = interpreter();
    interp.submit("  cd web-development  ");
    interp.submit("pwd");
    let commands: Vec<&Line> = interp
        .scrollback()
        .iter()
        .filter(|line| line.kind == LineKind::Command)
        .collect();
    assert_eq!(commands[0].text, "cd web-development");
    assert_eq!(commands[0].path.as_deref(), Some("~"));
    assert_eq!(commands[1].path.as_deref(), Some("~/web-development"));
    assert_eq!(interp.history(), ["cd web-development", "pwd"]);
}

#[test]
fn unknown_command_appends_exactly_one_error_line() {
    let (mut interp, _) = interpreter();
    let before = interp.scrollback().len();
    interp.submit("foo");
    assert_eq!(interp.scrollback().len(), before + 2);
    let last = interp.scrollback().last().expect("error line should exist");
    assert_eq!(last.kind, LineKind::Error);
    assert_eq!(
        last.text,
        "Command not found: foo. Type 'help' for available commands."
    );
}

#[test]
fn command_names_are_case_insensitive() {
    let (mut interp, _) = interpreter();
    interp.submit("PWD");
    assert_eq!(texts(&interp).last(), Some(&"home"));
    assert_eq!(interp.history().last().map(String::as_str), Some("PWD"));
}

#[test]
fn clear_empties_scrollback_but_keeps_history() {
    let (mut interp, _) = interpreter();
    interp.submit("help");
    interp.submit("clear");
    assert!(interp.scrollback().is_empty());
    assert_eq!(interp.history(), ["help", "clear"]);
    interp.submit("pwd");
    assert_eq!(texts(&interp), vec!["pwd", "home"]);
}

#[test]
fn cd_then_ls_matches_cd_listing_and_cd_parent_returns_home() {
    let (mut interp, _) = interpreter();
    interp.submit("cd web-development");
    assert_eq!(
        interp.path(),
        &VirtualPath::Directory("web-development".to_string())
    );
    let cd_projects: Vec<String> = interp
        .scrollback()
        .iter()
        .filter_map(|line| {
            let (index, name) = line.text.split_once(". ")?;
            index.parse::<usize>().ok()?;
            Some(name.to_string())
        })
        .collect();

    let before = interp.scrollback().len();
    interp.submit("ls");
    let ls_projects: Vec<String> = interp.scrollback()[before + 1..]
        .iter()
        .filter_map(|line| {
            let (_, rest) = line.text.split_once(". ")?;
            Some(rest.split(" - ").next()?.to_string())
        })
        .collect();
    assert_eq!(cd_projects, ls_projects);

    interp.submit("cd web-development");
    assert_eq!(
        interp.path(),
        &VirtualPath::Directory("web-development".to_string())
    );
    interp.submit("cd ..");
    assert_eq!(interp.path(), &VirtualPath::Root);
}

#[test]
fn unknown_directory_leaves_path_unchanged() {
    let (mut interp, _) = interpreter();
    interp.submit("cd ai-ml");
    interp.submit("cd nowhere");
    assert_eq!(interp.path(), &VirtualPath::Directory("ai-ml".to_string()));
    let all = texts(&interp);
    assert_eq!(all[all.len() - 2], "Directory not found: nowhere");
    assert_eq!(interp.scrollback().last().map(|l| l.kind), Some(LineKind::Output));
}

#[test]
fn not_found_messages_echo_lowercased_arguments() {
    let (mut interp, calls) = interpreter();
    interp.submit("cd FOO");
    interp.submit("theme PURPLE");
    let all = texts(&interp);
    assert!(all.contains(&"cd FOO"));
    assert!(all.contains(&"Directory not found: foo"));
    assert!(all.contains(&"Theme 'purple' not found. Type 'themes' to see available themes."));
    assert_eq!(interp.path(), &VirtualPath::Root);
    assert!(calls.borrow().is_empty());
}

#[test]
fn projects_inside_directory_lists_like_ls() {
    let (mut interp, _) = interpreter();
    interp.submit("projects");
    assert!(texts(&interp).contains(&"Project categories:"));
    interp.submit("cd ai-ml");
    interp.submit("projects");
    assert_eq!(
        texts(&interp).last(),
        Some(&"2. Multimodal RAG Service - Retrieval-augmented assistant over team knowledge")
    );
}

#[test]
fn valid_theme_invokes_switcher_and_updates_current_theme() {
    let (mut interp, calls) = interpreter();
    interp.submit("theme NORD");
    assert_eq!(interp.theme(), ThemeName::Nord);
    assert_eq!(*calls.borrow(), vec![ThemeName::Nord]);
    assert_eq!(texts(&interp).last(), Some(&"Theme switched to: nord"));
}

#[test]
fn invalid_theme_does_not_invoke_switcher() {
    let (mut interp, calls) = interpreter();
    let before = interp.scrollback().len();
    interp.submit("theme purple");
    assert!(calls.borrow().is_empty());
    assert_eq!(interp.theme(), ThemeName::Dark);
    assert_eq!(interp.scrollback().len(), before + 2);
    let last = interp.scrollback().last().expect("not-found line should exist");
    assert_eq!(last.kind, LineKind::Output);
    assert!(last.text.contains("purple"));
}

#[test]
fn theme_usage_is_plain_output() {
    let (mut interp, calls) = interpreter();
    interp.submit("theme");
    let last = interp.scrollback().last().expect("usage line should exist");
    assert_eq!(last.kind, LineKind::Output);
    assert_eq!(last.text, "Usage: theme <name>");
    assert!(calls.borrow().is_empty());
}

#[test]
fn history_command_includes_current_submission() {
    let (mut interp, _) = interpreter();
    interp.submit("about");
    interp.submit("history");
    let all = texts(&interp);
    assert_eq!(all[all.len() - 2..], ["1  about", "2  history"]);
}

#[test]
fn submit_input_clears_buffer_and_resets_browsing() {
    let (mut interp, _) = interpreter();
    interp.submit("help");
    interp.recall_previous();
    assert_eq!(interp.history_cursor(), Some(0));
    interp.submit_input();
    assert!(interp.input().is_empty());
    assert_eq!(interp.cursor(), 0);
    assert_eq!(interp.history_cursor(), None);
    assert_eq!(interp.history(), ["help", "help"]);
}

#[test]
fn blank_submit_input_still_clears_buffer() {
    let (mut interp, _) = interpreter();
    type_text(&mut interp, "   ");
    interp.submit_input();
    assert!(interp.input().is_empty());
    assert!(interp.history().is_empty());
}

#[test]
fn recall_walks_history_in_reverse_then_back_to_empty() {
    let (mut interp, _) = interpreter();
    for cmd in ["help", "about", "skills"] {
        interp.submit(cmd);
    }
    assert_eq!(interp.recall_previous().as_deref(), Some("skills"));
    assert_eq!(interp.recall_previous().as_deref(), Some("about"));
    assert_eq!(interp.recall_previous().as_deref(), Some("help"));
    assert_eq!(interp.recall_previous().as_deref(), Some("help"));
    assert_eq!(interp.input(), "help");
    assert_eq!(interp.cursor(), 4);
    assert_eq!(interp.recall_next().as_deref(), Some("about"));
    assert_eq!(interp.recall_next().as_deref(), Some("skills"));
    assert_eq!(interp.recall_next(), None);
    assert!(interp.input().is_empty());
    assert_eq!(interp.history_cursor(), None);
}

#[test]
fn tab_completion_rewrites_buffer_on_unique_match() {
    let (mut interp, _) = interpreter();
    type_text(&mut interp, "cd a");
    let completion = interp.complete_input();
    assert!(matches!(completion, Some(Completion::Replace { .. })));
    assert_eq!(interp.input(), "cd ai-ml");
    assert_eq!(interp.cursor(), 8);
}

#[test]
fn tab_completion_suggestions_append_one_line_and_keep_buffer() {
    let (mut interp, _) = interpreter();
    type_text(&mut interp, "the");
    let before = interp.scrollback().len();
    interp.complete_input();
    assert_eq!(interp.scrollback().len(), before + 1);
    assert_eq!(texts(&interp).last(), Some(&"themes  theme"));
    assert_eq!(interp.input(), "the");
    assert!(interp.history().is_empty());
}

#[test]
fn tab_completion_without_match_changes_nothing() {
    let (mut interp, _) = interpreter();
    type_text(&mut interp, "xyz");
    let before = interp.scrollback().len();
    assert_eq!(interp.complete_input(), None);
    assert_eq!(interp.scrollback().len(), before);
    assert_eq!(interp.input(), "xyz");
}

#[test]
fn custom_registry_is_dispatched() {
    use crate::commands::{CommandOutput, CommandSpec};

    fn echo(_env: &CommandEnv<'_>, args: &[String]) -> CommandOutput {
        CommandOutput::lines(vec![args.join(" ")])
    }
    let (interp, _) = interpreter();
    let mut registry = CommandRegistry::builtin();
    registry.register(CommandSpec {
        name: "echo",
        usage: "echo <text>",
        description: "Print text",
        handler: echo,
    });
    let mut interp = interp
        .with_registry(registry)
        .with_session(Session::without_welcome());
    interp.submit("ECHO Hello World");
    assert_eq!(texts(&interp), vec!["ECHO Hello World", "Hello World"]);
}

#[test]
fn blank_lines_from_handlers_are_kept_as_spacing() {
    let (mut interp, _) = interpreter();
    interp.submit("themes");
    let all = texts(&interp);
    assert_eq!(all[all.len() - 2..], ["", "Use 'theme <name>' to switch themes"]);
}

#[test]
fn injected_completer_replaces_default_sources() {
    use crate::completion::Autocompleter;

    fn paths(_env: &CommandEnv<'_>) -> Vec<String> {
        vec!["secret".to_string()]
    }
    let (interp, _) = interpreter();
    let mut completer = Autocompleter::empty();
    completer.register("ls", paths);
    let mut interp = interp.with_completer(completer);
    type_text(&mut interp, "ls s");
    interp.complete_input();
    assert_eq!(interp.input(), "ls secret");
    interp.submit_input();
    type_text(&mut interp, "cd w");
    assert_eq!(interp.complete_input(), None);
}
