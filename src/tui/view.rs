// File: ./src/tui/view.rs
use crate::model::{Priority, Status};
use crate::notify::Kind;
use crate::tui::form::{Field, TaskForm};
use crate::tui::state::{AppState, Mode};
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState, now: DateTime<Utc>) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(v_chunks[0]);

    // --- Task List ---
    let task_items: Vec<ListItem> = state
        .view_indices
        .iter()
        .map(|&idx| {
            let t = &state.store.tasks()[idx];
            let style = if t.status == Status::Completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(priority_color(t.priority))
            };
            let checkbox = if t.status == Status::Completed {
                "[x]"
            } else {
                "[ ]"
            };
            let overdue = if t.status == Status::InProgress && t.is_overdue(now) {
                " !"
            } else {
                ""
            };
            let summary = format!(
                "{} {} ({}){} [{}]",
                checkbox,
                t.title,
                t.due_string(),
                overdue,
                t.priority.label()
            );
            ListItem::new(Line::from(vec![Span::styled(summary, style)]))
        })
        .collect();

    let title = format!(
        " Tasks ({}/{}) | filter: {} | sort: {} ",
        state.view_indices.len(),
        state.store.len(),
        state.filter.label(),
        state.sort.label()
    );
    let task_list = List::new(task_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(task_list, main_chunks[0], &mut state.list_state);

    // --- Details Pane ---
    let details_text = match state.selected_task() {
        Some(task) => format!(
            "{}\n\nDue: {}\nPriority: {}\nStatus: {}",
            task.description,
            task.due_string(),
            task.priority.label(),
            task.status.label()
        ),
        None => String::new(),
    };
    let details = Paragraph::new(details_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(details, main_chunks[1]);

    // --- Footer ---
    let footer_area = v_chunks[1];
    match state.mode {
        Mode::Searching => {
            let input = Paragraph::new(format!("/ {}", state.search))
                .style(Style::default().fg(Color::Green))
                .block(Block::default().borders(Borders::ALL).title(" Search "));
            f.render_widget(input, footer_area);
            let cursor_x = footer_area.x + 1 + 2 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        Mode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);

            let (message, color) = match state.notifier.latest() {
                Some(n) => (
                    n.text.clone(),
                    if n.kind == Kind::Error {
                        Color::Red
                    } else {
                        Color::Cyan
                    },
                ),
                None => {
                    if state.search.is_empty() {
                        ("Ready.".to_string(), Color::Cyan)
                    } else {
                        (format!("Search: {}", state.search), Color::Green)
                    }
                }
            };
            let status = Paragraph::new(message).style(Style::default().fg(color)).block(
                Block::default()
                    .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                    .title(" Status "),
            );
            let help_text = "a:Add | e:Edit | d:Del | Space:Done | /:Find | f:Filter | s:Sort | q:Quit";
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }

    // --- Modal Form ---
    // The form only exists while open; a closed modal renders nothing.
    if let Some(form) = &state.form {
        draw_form(f, form, v_chunks[0]);
    }
}

fn draw_form(f: &mut Frame, form: &TaskForm, area: Rect) {
    let popup = centered_rect(60, 8, area);
    f.render_widget(Clear, popup);

    let block = Block::default().borders(Borders::ALL).title(form.heading());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = [Field::Title, Field::Description, Field::Due, Field::Priority];
    let mut lines: Vec<Line> = Vec::new();
    for field in rows {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = match field {
            Field::Title => form.title.clone(),
            Field::Description => form.description.clone(),
            Field::Due => form.due.clone(),
            Field::Priority => format!("< {} >", form.priority.label()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", field.label()), label_style),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: Save | Tab: Next | Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);

    // Cursor inside the focused text field
    let row = match form.focus {
        Field::Title => Some(0),
        Field::Description => Some(1),
        Field::Due => Some(2),
        Field::Priority => None,
    };
    if let Some(row) = row {
        let cursor_x = inner.x + 18 + form.cursor as u16;
        let cursor_y = inner.y + row;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

/// A rect centered in `area`: `percent_x` of the width, `height` rows tall.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let h = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(v[1]);
    h[1]
}
