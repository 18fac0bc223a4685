use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Quit,
    Submit,
    HistoryPrev,
    HistoryNext,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Complete,
    InputChar(char),
    Backspace,
    Delete,
    ScrollPageUp,
    ScrollPageDown,
    MouseScrollUp,
    MouseScrollDown,
    Resize,
}

fn map_key_event(key_event: KeyEvent) -> AppEvent {
    if key_event.kind != KeyEventKind::Press {
        return AppEvent::Tick;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => AppEvent::Quit,
            KeyCode::Char('a') => AppEvent::CursorHome,
            KeyCode::Char('e') => AppEvent::CursorEnd,
            KeyCode::Char('p') => AppEvent::HistoryPrev,
            KeyCode::Char('n') => AppEvent::HistoryNext,
            _ => AppEvent::Tick,
        };
    }

    match key_event.code {
        KeyCode::Tab => AppEvent::Complete,
        KeyCode::Up => AppEvent::HistoryPrev,
        KeyCode::Down => AppEvent::HistoryNext,
        KeyCode::PageUp => AppEvent::ScrollPageUp,
        KeyCode::PageDown => AppEvent::ScrollPageDown,
        KeyCode::Left => AppEvent::CursorLeft,
        KeyCode::Right => AppEvent::CursorRight,
        KeyCode::Home => AppEvent::CursorHome,
        KeyCode::End => AppEvent::CursorEnd,
        KeyCode::Backspace => AppEvent::Backspace,
        KeyCode::Delete => AppEvent::Delete,
        KeyCode::Enter => AppEvent::Submit,
        KeyCode::Char(c) => AppEvent::InputChar(c),
        _ => AppEvent::Tick,
    }
}

fn map_mouse_event_kind(kind: MouseEventKind) -> AppEvent {
    match kind {
        MouseEventKind::ScrollUp => AppEvent::MouseScrollUp,
        MouseEventKind::ScrollDown => AppEvent::MouseScrollDown,
        _ => AppEvent::Tick,
    }
}

pub fn next_event() -> io::Result<AppEvent> {
    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key_event) => return Ok(map_key_event(key_event)),
            Event::Mouse(mouse_event) => return Ok(map_mouse_event_kind(mouse_event.kind)),
            Event::Resize(_, _) => return Ok(AppEvent::Resize),
            _ => {}
        }
    }

    Ok(AppEvent::Tick)
}
