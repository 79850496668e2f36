// File: ./src/tui/mod.rs
pub mod form;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::tui::state::{AppState, Mode};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    time::{Duration, Instant},
};

pub fn run() -> Result<()> {
    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("taskdeck_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let config = Config::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(config);

    loop {
        // Everything derived is recomputed here, every tick: expired
        // notifications drop out and the view reflects the store as-is.
        app_state.notifier.prune(Instant::now());
        let now = chrono::Utc::now();
        app_state.recalculate_view(now);
        terminal.draw(|f| view::draw(f, &mut app_state, now))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && handle_key(&mut app_state, key) {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    // Persist UI preferences only; the task collection is memory-only.
    let _ = Config {
        filter: app_state.filter,
        sort: app_state.sort,
    }
    .save();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Dispatch one key press. Returns true when the app should quit.
fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    let now = Instant::now();

    // The modal form swallows all input while it is open.
    if state.form.is_some() {
        handle_form_key(state, key, now);
        return false;
    }

    match state.mode {
        Mode::Searching => match key.code {
            KeyCode::Enter => state.mode = Mode::Normal,
            KeyCode::Esc => {
                state.reset_search();
                state.mode = Mode::Normal;
            }
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            KeyCode::Char(c) => state.enter_char(c),
            _ => {}
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => state.open_create(),
            KeyCode::Char('e') => state.open_edit(now),
            KeyCode::Char('d') => state.delete_selected(now),
            KeyCode::Char(' ') => state.toggle_selected(now),
            KeyCode::Char('/') => state.mode = Mode::Searching,
            KeyCode::Char('f') => state.filter = state.filter.cycle(),
            KeyCode::Char('s') => state.sort = state.sort.cycle(),
            KeyCode::Down | KeyCode::Char('j') => state.next(),
            KeyCode::Up | KeyCode::Char('k') => state.previous(),
            KeyCode::PageDown => state.jump_forward(10),
            KeyCode::PageUp => state.jump_backward(10),
            _ => {}
        },
    }
    false
}

fn handle_form_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => state.close_form(),
        KeyCode::Enter => state.submit_form(now),
        code => {
            if let Some(form) = state.form.as_mut() {
                match code {
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                    KeyCode::Left => form.left(),
                    KeyCode::Right => form.right(),
                    KeyCode::Backspace => form.delete_char(),
                    KeyCode::Char(c) => form.enter_char(c),
                    _ => {}
                }
            }
        }
    }
}
