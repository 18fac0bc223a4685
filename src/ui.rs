use ratatui::prelude::*;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::app::{App, DisplayRow};
use crate::session::LineKind;
use crate::text_layout::wrap_chars;
use crate::theme::Theme;

const TITLE_BAR_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const MAX_INPUT_ROWS: u16 = 4;
const TEXT_PADDING: u16 = 1;
const STATUS_HELP_TEXT: &str =
    "Enter run | Tab complete | Up/Down history | PgUp/PgDn scroll | Ctrl+C quit";

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.palette();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let text_width = area.width.saturating_sub(TEXT_PADDING * 2).max(1);
    let (input_line, (cursor_row, cursor_col)) = app.input_layout(text_width);
    let input_rows = wrap_chars(&input_line, text_width);
    let max_input_height = area
        .height
        .saturating_sub(TITLE_BAR_HEIGHT + STATUS_HEIGHT + 1)
        .clamp(1, MAX_INPUT_ROWS);
    let input_height = u16::try_from(input_rows.len())
        .unwrap_or(u16::MAX)
        .clamp(1, max_input_height);

    let [title_area, scrollback_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(TITLE_BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(input_height),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    render_title_bar(frame, title_area, app, &theme);
    render_scrollback(frame, scrollback_area, app, &theme);

    let input_scroll = cursor_row.saturating_sub(input_height.saturating_sub(1));
    render_input(frame, input_area, &input_rows, input_scroll, app, &theme);

    let inner = padded(input_area);
    if inner.width > 0 && inner.height > 0 {
        let visible_row = cursor_row.saturating_sub(input_scroll);
        if visible_row < inner.height {
            frame.set_cursor_position((
                inner
                    .x
                    .saturating_add(cursor_col.min(inner.width.saturating_sub(1))),
                inner.y.saturating_add(visible_row),
            ));
        }
    }

    render_status_bar(frame, status_area, app, &theme);
}

fn padded(area: Rect) -> Rect {
    area.inner(Margin {
        horizontal: TEXT_PADDING,
        vertical: 0,
    })
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let style = Style::default().bg(theme.bg_secondary).fg(theme.text_primary);
    let theme_label = format!("theme: {}", app.interpreter().theme());
    let label_width = u16::try_from(theme_label.chars().count()).unwrap_or(u16::MAX);
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(label_width.saturating_add(TEXT_PADDING)),
    ])
    .areas(area);

    frame.render_widget(Block::default().style(style), area);
    frame.render_widget(
        Paragraph::new(app.title())
            .style(style.add_modifier(Modifier::BOLD))
            .block(Block::default().padding(Padding::horizontal(TEXT_PADDING))),
        left,
    );
    frame.render_widget(
        Paragraph::new(theme_label).style(Style::default().bg(theme.bg_secondary).fg(theme.accent)),
        right,
    );
}

fn render_scrollback(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let inner = padded(area);
    let width = inner.width.max(1);
    app.record_viewport(width, inner.height);

    let rows = app.scrollback_rows(width);
    let start = usize::from(app.scroll_offset()).min(rows.len());
    let end = start.saturating_add(usize::from(inner.height)).min(rows.len());
    let lines: Vec<Line<'static>> = rows[start..end]
        .iter()
        .map(|row| scrollback_line(row, theme))
        .collect();

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().bg(theme.bg_primary).fg(theme.text_primary))
            .block(Block::default().padding(Padding::horizontal(TEXT_PADDING))),
        area,
    );
}

fn scrollback_line(row: &DisplayRow, theme: &Theme) -> Line<'static> {
    let body_style = match row.kind {
        LineKind::Command => Style::default().fg(theme.text_primary),
        LineKind::Output => Style::default().fg(theme.text_secondary),
        LineKind::Error => Style::default().fg(theme.error),
    };
    let mut spans = Vec::with_capacity(2);
    if !row.prompt.is_empty() {
        spans.push(Span::styled(
            row.prompt.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(row.text.clone(), body_style));
    Line::from(spans)
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    rows: &[String],
    scroll: u16,
    app: &App,
    theme: &Theme,
) {
    let prompt = app.prompt();
    let lines: Vec<Line<'static>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match row.strip_prefix(prompt.as_str()) {
            Some(rest) if index == 0 => Line::from(vec![
                Span::styled(
                    prompt.clone(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(rest.to_string()),
            ]),
            _ => Line::raw(row.clone()),
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().bg(theme.bg_primary).fg(theme.text_primary))
            .scroll((scroll, 0))
            .block(Block::default().padding(Padding::horizontal(TEXT_PADDING))),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(status_line_text(app))
            .style(Style::default().bg(theme.bg_secondary).fg(theme.text_muted))
            .block(Block::default().padding(Padding::horizontal(TEXT_PADDING))),
        area,
    );
}

fn status_line_text(app: &App) -> String {
    if app.is_following() {
        STATUS_HELP_TEXT.to_string()
    } else {
        format!("scrolled | {STATUS_HELP_TEXT}")
    }
}

#[cfg(test)]
#[path = "../tests/unit/ui_tests.rs"]
mod tests;
