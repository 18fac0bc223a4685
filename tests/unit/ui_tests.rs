use super::*;
use crate::app::PromptIdentity;
use crate::content::Content;
use crate::events::AppEvent;
use crate::interpreter::Interpreter;
use crate::session::Session;
use crate::theme::{NoopThemeSwitcher, ThemeCatalog, ThemeName};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;

fn app_with(session: Session) -> App {
    let content = Content::embedded().expect("embedded content should parse");
    let interpreter = Interpreter::new(content, ThemeName::Dark, Box::new(NoopThemeSwitcher))
        .with_session(session);
    App::new(interpreter, PromptIdentity::default(), ThemeCatalog::default())
}

fn run(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_event(AppEvent::InputChar(c));
    }
    app.handle_event(AppEvent::Submit);
}

fn draw(app: &App, width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
    terminal
        .draw(|frame| render(frame, app))
        .expect("render should succeed");
    terminal
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
}

fn find_row(buffer: &Buffer, needle: &str) -> Option<u16> {
    (0..buffer.area.height).find(|&y| row_text(buffer, y).contains(needle))
}

#[test]
fn renders_title_welcome_prompt_and_status() {
    let app = app_with(Session::default());
    let terminal = draw(&app, 90, 12);
    let buffer = terminal.backend().buffer();
    let text = buffer_to_string(buffer);
    assert!(row_text(buffer, 0).contains("subodh@portfolio:~"));
    assert!(row_text(buffer, 0).contains("theme: dark"));
    assert!(text.contains("Welcome to My Portfolio Terminal"));
    assert!(text.contains("Type 'help' for available commands"));
    assert!(row_text(buffer, 10).contains("subodh@portfolio:~$"));
    assert!(row_text(buffer, 11).contains("Ctrl+C quit"));
}

#[test]
fn command_lines_show_their_prompt_and_output_follows() {
    let mut app = app_with(Session::without_welcome());
    run(&mut app, "cd ai-ml");
    run(&mut app, "pwd");
    let terminal = draw(&app, 90, 50);
    let buffer = terminal.backend().buffer();
    assert!(find_row(buffer, "subodh@portfolio:~$ cd ai-ml").is_some());
    let pwd_row = find_row(buffer, "subodh@portfolio:~/ai-ml$ pwd").expect("pwd command row");
    assert!(row_text(buffer, pwd_row + 1).contains("home/ai-ml"));
}

#[test]
fn error_lines_use_the_error_color() {
    let mut app = app_with(Session::without_welcome());
    run(&mut app, "nope");
    let terminal = draw(&app, 90, 10);
    let buffer = terminal.backend().buffer();
    let y = find_row(buffer, "Command not found: nope").expect("error row");
    let x = row_text(buffer, y)
        .find("Command")
        .and_then(|byte| u16::try_from(byte).ok())
        .expect("error text column");
    assert_eq!(buffer[(x, y)].fg, Theme::builtin(ThemeName::Dark).error);
}

#[test]
fn theme_switch_recolors_the_screen() {
    let mut app = app_with(Session::without_welcome());
    run(&mut app, "theme nord");
    let terminal = draw(&app, 90, 10);
    let buffer = terminal.backend().buffer();
    let nord = Theme::builtin(ThemeName::Nord);
    assert!(row_text(buffer, 0).contains("theme: nord"));
    assert_eq!(buffer[(0, 0)].bg, nord.bg_secondary);
    assert_eq!(buffer[(0, 3)].bg, nord.bg_primary);
}

#[test]
fn long_scrollback_follows_the_newest_lines() {
    let mut app = app_with(Session::without_welcome());
    run(&mut app, "help");
    run(&mut app, "pwd");
    let terminal = draw(&app, 90, 8);
    let text = buffer_to_string(terminal.backend().buffer());
    assert!(text.contains("home"));
    assert!(!text.contains("Available commands:"));
}

#[test]
fn paging_up_reveals_older_lines_and_marks_status() {
    let mut app = app_with(Session::without_welcome());
    run(&mut app, "help");
    run(&mut app, "pwd");
    draw(&app, 90, 8);
    for _ in 0..10 {
        app.handle_event(AppEvent::ScrollPageUp);
    }
    let terminal = draw(&app, 90, 8);
    let buffer = terminal.backend().buffer();
    let text = buffer_to_string(buffer);
    assert!(text.contains("Available commands:"));
    assert!(row_text(buffer, 7).contains("scrolled"));
}

#[test]
fn cursor_sits_after_the_typed_input() {
    let mut app = app_with(Session::without_welcome());
    for c in "ls".chars() {
        app.handle_event(AppEvent::InputChar(c));
    }
    let mut terminal = draw(&app, 60, 10);
    let cursor = terminal
        .get_cursor_position()
        .expect("cursor position should be readable");
    // padding + "subodh@portfolio:~$ " + "ls"
    assert_eq!(cursor, Position::new(1 + 20 + 2, 8));
}

#[test]
fn long_input_wraps_inside_the_prompt_area() {
    let mut app = app_with(Session::without_welcome());
    for c in "x".repeat(50).chars() {
        app.handle_event(AppEvent::InputChar(c));
    }
    let mut terminal = draw(&app, 32, 12);
    let buffer = terminal.backend().buffer().clone();
    assert!(row_text(&buffer, 8).contains("subodh@portfolio:~$"));
    assert!(row_text(&buffer, 9).contains("xxxxx"));
    let cursor = terminal
        .get_cursor_position()
        .expect("cursor position should be readable");
    // 70 chars at width 30 -> row 2, col 10
    assert_eq!(cursor.y, 10);
    assert_eq!(cursor.x, 1 + 10);
}

#[test]
fn tiny_terminals_do_not_panic() {
    let app = app_with(Session::default());
    draw(&app, 4, 3);
    draw(&app, 1, 1);
}
