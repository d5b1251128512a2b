//! Terminal UI for the Hull Insight console.
//!
//! This module owns the terminal lifecycle and the input loop; all state
//! lives in [`app::ConsoleApp`] and all drawing in [`ui`]. The loop is
//! single-threaded and event-driven: every network call happens inline in
//! a key handler, so requests are strictly sequential and no response can
//! overtake a later one.
//!
//! # Submodules
//!
//! - `app`: console state (session, tabs, screens, dialogs, toasts)
//! - `ui`: layout and widget definitions
//! - `mod.rs` (this file): terminal setup/teardown and key dispatch

pub mod app;
mod ui;

pub use app::ConsoleApp;

use crate::config::AppConfig;
use crate::error::Result;
use crate::form::FieldKind;
use crate::routes::{Screen, SIDEBAR_ITEMS};
use crate::session::SessionStore;
use app::{AppMode, Focus, Overlay};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;

/// Input poll interval; also bounds the toast sweep cadence.
const TICK: Duration = Duration::from_millis(100);

/// Run the console until the user quits. Handles terminal setup and
/// cleanup; the terminal is restored even when the loop errors.
pub fn run_console(config: AppConfig) -> Result<()> {
    let session = SessionStore::open()?;
    let mut app = ConsoleApp::new(config, session);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ConsoleApp,
) -> Result<()> {
    loop {
        app.toasts.sweep();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
        if app.should_exit() {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut ConsoleApp, key: KeyEvent) {
    // Ctrl+C always exits, whatever is on screen.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_exit();
        return;
    }
    if app.overlay.is_some() {
        handle_overlay_key(app, key);
        return;
    }
    match app.mode {
        AppMode::Login => handle_login_key(app, key),
        AppMode::Shell => {
            if app.search_input.is_some() {
                handle_search_key(app, key);
            } else {
                handle_shell_key(app, key);
            }
        }
    }
}

fn handle_login_key(app: &mut ConsoleApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.request_exit(),
        KeyCode::Enter => app.attempt_login(),
        KeyCode::Tab | KeyCode::Down => app.login.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.login.focus_prev(),
        KeyCode::Backspace => app.login.backspace(),
        KeyCode::Char(c) => app.login.input_char(c),
        _ => {}
    }
}

fn handle_search_key(app: &mut ConsoleApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_search(),
        KeyCode::Esc => app.search_input = None,
        KeyCode::Backspace => {
            if let Some(text) = &mut app.search_input {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = &mut app.search_input {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn handle_shell_key(app: &mut ConsoleApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_exit(),
        KeyCode::Char('L') => app.logout(),

        // Tab strip.
        KeyCode::Tab => app.cycle_tab(false),
        KeyCode::BackTab => app.cycle_tab(true),
        KeyCode::Char('w') => app.close_active_tab(),

        // Sidebar.
        KeyCode::Char('j') => {
            app.focus = Focus::Sidebar;
            app.sidebar_index = (app.sidebar_index + 1) % SIDEBAR_ITEMS.len();
        }
        KeyCode::Char('k') => {
            app.focus = Focus::Sidebar;
            app.sidebar_index =
                (app.sidebar_index + SIDEBAR_ITEMS.len() - 1) % SIDEBAR_ITEMS.len();
        }
        KeyCode::Enter => {
            let url = SIDEBAR_ITEMS[app.sidebar_index].url;
            app.focus = Focus::Content;
            app.navigate(url);
        }

        // Section strip on masters/users screens.
        KeyCode::Right => app.cycle_section(false),
        KeyCode::Left => app.cycle_section(true),

        // List rows and pages.
        KeyCode::Down => app.select_next_row(),
        KeyCode::Up => app.select_prev_row(),
        KeyCode::Char(']') => app.next_page(),
        KeyCode::Char('[') => app.prev_page(),
        KeyCode::Char('r') => app.reload_current(),
        KeyCode::Char('/') => {
            if app.current_screen().is_some() {
                let seed = app
                    .current_screen()
                    .map(|s| s.search_text().to_string())
                    .unwrap_or_default();
                app.search_input = Some(seed);
            }
        }

        // CRUD dialogs.
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('v') => app.open_view(),
        KeyCode::Char('d') => app.open_delete_confirmation(),

        // Dashboard period.
        KeyCode::Char('p') => {
            if matches!(
                crate::routes::resolve_screen(&app.current_path),
                Some(Screen::Dashboard)
            ) {
                app.dashboard_period = app.dashboard_period.next();
            }
        }
        _ => {}
    }
}

fn handle_overlay_key(app: &mut ConsoleApp, key: KeyEvent) {
    match &app.overlay {
        Some(Overlay::Form(_)) => match key.code {
            KeyCode::Esc => app.overlay = None,
            KeyCode::Enter => app.submit_form(),
            _ => handle_form_edit_key(app, key),
        },
        Some(Overlay::View(_)) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') => app.overlay = None,
            _ => {}
        },
        Some(Overlay::ConfirmDelete(_)) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.overlay = None,
            _ => {}
        },
        None => {}
    }
}

fn handle_form_edit_key(app: &mut ConsoleApp, key: KeyEvent) {
    let Some(Overlay::Form(form)) = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(' ') => {
            // Space toggles checkboxes and selects; in text fields it is
            // just a character.
            let textual = form
                .focused_field()
                .map(|f| f.kind.is_textual())
                .unwrap_or(false);
            if textual {
                form.input_char(' ');
            } else {
                form.toggle();
            }
        }
        KeyCode::Char(c) => {
            let focused_is_select = matches!(
                form.focused_field().map(|f| &f.kind),
                Some(FieldKind::Select { .. }) | Some(FieldKind::MultiSelect { .. })
            );
            if focused_is_select {
                // Any letter also cycles a select for convenience.
                form.toggle();
            } else {
                form.input_char(c);
            }
        }
        _ => {}
    }
}
