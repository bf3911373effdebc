use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tasklist_core::{ListKind, Task};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let input_height = match app.input_mode {
        InputMode::Normal => 0,
        InputMode::Adding | InputMode::Editing => 3,
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(1),               // Lists
            Constraint::Length(input_height), // Input bar
            Constraint::Length(1),            // Activity
            Constraint::Length(1),            // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASKLIST")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let list_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    draw_task_list(
        f,
        app.store.pending(),
        &mut app.pending_state,
        ListKind::Pending,
        app.focus == ListKind::Pending,
        list_chunks[0],
    );
    draw_task_list(
        f,
        app.store.completed(),
        &mut app.completed_state,
        ListKind::Completed,
        app.focus == ListKind::Completed,
        list_chunks[1],
    );

    if input_height > 0 {
        draw_input(f, app, main_chunks[2]);
    }

    let activity = Paragraph::new(app.latest_activity().unwrap_or_default())
        .style(Style::default().fg(Color::Gray));
    f.render_widget(activity, main_chunks[3]);

    let help = match app.input_mode {
        InputMode::Normal => {
            "Tab: Switch list | j/k: Navigate | a: Add | e: Edit | d: Delete | Space: Toggle | q: Quit"
        }
        InputMode::Adding | InputMode::Editing => "Enter: Submit | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);

    if let Some(message) = &app.warning {
        draw_warning(f, message, size);
    }
}

fn draw_task_list(
    f: &mut Frame,
    tasks: &[Task],
    state: &mut ListState,
    kind: ListKind,
    focused: bool,
    area: Rect,
) {
    let (title, icon) = match kind {
        ListKind::Pending => (" Pending ", "☐"),
        ListKind::Completed => (" Completed ", "✔"),
    };
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::raw(task.text().to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("{}({}) ", title, tasks.len()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(if focused { ">> " } else { "   " });

    f.render_stateful_widget(list, area, state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.input_mode {
        InputMode::Editing => " Edit task ",
        _ => " New task ",
    };
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(input, area);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    let offset = before_cursor.width() as u16;
    f.set_cursor_position((area.x + 1 + offset, area.y + 1));
}

fn draw_warning(f: &mut Frame, message: &str, area: Rect) {
    let popup = centered_rect(50, 5, area);
    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Warning ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
