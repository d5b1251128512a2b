//! Console layout and widget definitions.
//!
//! Pure rendering: everything here reads `ConsoleApp` and draws, nothing
//! mutates. The shell is laid out as:
//!
//! ```text
//! ┌─────────────────── Header ────────────────────┐
//! │ Hull Insight │ user │ api host                │
//! ├─ Sidebar ─┬───────── Tab strip ───────────────┤
//! │ Dashboard │ [Units] [Commands] [Dashboard]    │
//! │ Masters   ├───────── Content ─────────────────┤
//! │ ...       │ table / dashboard / welcome       │
//! ├───────────┴───────── Footer ──────────────────┤
//! │ key hints                        toasts       │
//! └───────────────────────────────────────────────┘
//! ```

use super::app::{AppMode, ConsoleApp, Focus, Overlay};
use crate::dashboard::{kpi_cards, Trend};
use crate::form::{value_is_truthy, FieldKind, FormMode, FormState};
use crate::nav::{ContentView, SectionStrip};
use crate::routes::{Screen, SIDEBAR_ITEMS};
use crate::screen::CrudScreen;
use crate::toast::ToastLevel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use serde_json::Value;

const ACCENT: Color = Color::Cyan;

/// Render one frame.
pub fn render(frame: &mut Frame, app: &ConsoleApp) {
    match app.mode {
        AppMode::Login => render_login(frame, app),
        AppMode::Shell => render_shell(frame, app),
    }
    render_toasts(frame, app);
}

fn render_shell(frame: &mut Frame, app: &ConsoleApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(rows[1]);

    render_sidebar(frame, app, body[0]);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(body[1]);

    render_tab_strip(frame, app, content[0]);
    render_content(frame, app, content[1]);
    render_footer(frame, app, rows[2]);

    match &app.overlay {
        Some(Overlay::Form(form)) => render_form_dialog(frame, form),
        Some(Overlay::View(record)) => render_view_dialog(frame, app, record),
        Some(Overlay::ConfirmDelete(record)) => render_confirm_dialog(frame, app, record),
        None => {}
    }
}

fn render_header(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    let user = app
        .session
        .user()
        .map(|u| u.display_name())
        .unwrap_or_else(|| "—".to_string());
    let line = Line::from(vec![
        Span::styled(
            "Hull Insight",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(user, Style::default().fg(Color::White)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.config.effective_base_url(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_sidebar(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    let mut lines = Vec::with_capacity(SIDEBAR_ITEMS.len());
    for (i, item) in SIDEBAR_ITEMS.iter().enumerate() {
        let marker = if i == app.sidebar_index { "▸ " } else { "  " };
        let style = if i == app.sidebar_index && app.focus == Focus::Sidebar {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else if i == app.sidebar_index {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{} {}", item.icon.glyph(), item.title),
            style,
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Menu ", Style::default().fg(Color::White)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_tab_strip(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    if app.registry.is_empty() {
        let hint = Paragraph::new(Span::styled(
            " no open tabs ",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(hint, area);
        return;
    }
    let titles: Vec<Line> = app
        .registry
        .tabs()
        .iter()
        .map(|t| Line::from(format!("{} {}", t.icon.glyph(), t.title)))
        .collect();
    let selected = app.registry.active_index().unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn render_content(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    match app.content_view() {
        ContentView::Welcome => render_welcome(frame, area),
        ContentView::NotFound => render_not_found(frame, area),
        ContentView::Screen { screen, section } => {
            let area = match section {
                Some(strip) => {
                    let split = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(2), Constraint::Min(3)])
                        .split(area);
                    render_section_strip(frame, &strip, split[0]);
                    split[1]
                }
                None => area,
            };
            render_screen(frame, app, screen, area);
        }
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Hull Insight",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Select a menu item to get started",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_not_found(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Page Not Found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The requested page could not be found",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_section_strip(frame: &mut Frame, strip: &SectionStrip, area: Rect) {
    let titles: Vec<Line> = strip.items.iter().map(|i| Line::from(i.title)).collect();
    let selected = strip
        .items
        .iter()
        .position(|i| crate::routes::final_segment(i.url) == strip.selected)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn render_screen(frame: &mut Frame, app: &ConsoleApp, screen: Screen, area: Rect) {
    match screen {
        Screen::Dashboard => render_dashboard(frame, app, area),
        Screen::Master(_) | Screen::ManageUsers | Screen::ManageRoles => {
            match app.current_screen() {
                Some(state) => render_crud(frame, app, state, area),
                None => render_welcome(frame, area),
            }
        }
        Screen::DockyardPlans => render_placeholder(frame, "Dockyard Plan Approval", area),
        Screen::Surveys => render_placeholder(frame, "Quarterly Hull Survey", area),
        Screen::HvacTrial => render_placeholder(frame, "HVAC Trial", area),
        Screen::Drawing => render_placeholder(frame, "Interactive Drawing", area),
        Screen::Reports => render_placeholder(frame, "Reports", area),
    }
}

fn render_placeholder(frame: &mut Frame, title: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Coming soon...",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_dashboard(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let period = Paragraph::new(Line::from(vec![
        Span::styled("Period: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.dashboard_period.label(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (p to change)", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(period, rows[0]);

    let cards = kpi_cards(app.dashboard_period);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(rows[1]);
    for (card, column) in cards.iter().zip(columns.iter()) {
        let (arrow, color) = match card.trend {
            Trend::Up => ("▲", Color::Green),
            Trend::Down => ("▼", Color::Red),
        };
        let body = vec![
            Line::from(Span::styled(
                card.value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(arrow, Style::default().fg(color))),
        ];
        let widget = Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(card.title));
        frame.render_widget(widget, *column);
    }
}

fn render_crud(frame: &mut Frame, app: &ConsoleApp, state: &CrudScreen, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search line
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    let search_line = match &app.search_input {
        Some(text) => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(ACCENT)),
            Span::raw(text.clone()),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ]),
        None if !state.search_text().is_empty() => Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Gray)),
            Span::raw(state.search_text().to_string()),
            Span::styled("  (/ to edit)", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            "/ search · n new · e edit · v view · d delete",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(search_line), rows[0]);

    let header_cells: Vec<Cell> = state
        .resource
        .columns
        .iter()
        .map(|c| {
            Cell::from(Span::styled(
                c.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let widths: Vec<Constraint> = state
        .resource
        .columns
        .iter()
        .map(|c| Constraint::Ratio(c.width as u32, total_width(state)))
        .collect();

    let body_rows: Vec<Row> = state
        .items()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells: Vec<Cell> = state
                .resource
                .columns
                .iter()
                .map(|c| Cell::from(cell_text(record, &c.key)))
                .collect();
            let style = if i == state.selected_index() {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let title = format!(" {} ", state.resource.title);
    let table = Table::new(body_rows, widths)
        .header(Row::new(header_cells))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, rows[1]);

    let status = if state.is_loading() {
        "Loading...".to_string()
    } else {
        format!(
            "Page {}/{} · {} records",
            state.current_page() + 1,
            state.total_pages(),
            state.total_count()
        )
    };
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::Gray))),
        rows[2],
    );
}

fn total_width(state: &CrudScreen) -> u32 {
    state
        .resource
        .columns
        .iter()
        .map(|c| c.width as u32)
        .sum::<u32>()
        .max(1)
}

/// Table cell text for a record column; active-style flags render as
/// Yes/No the way the web grid showed badges.
fn cell_text(record: &Value, key: &str) -> String {
    let value = record.get(key).unwrap_or(&Value::Null);
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(_) | Value::Number(_) if is_flag_key(key) => {
            if value_is_truthy(value) {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_flag_key(key: &str) -> bool {
    key == "active" || key == "is_active"
}

fn render_footer(frame: &mut Frame, app: &ConsoleApp, area: Rect) {
    let hints = if app.overlay.is_some() {
        "Tab next field · Space toggle · Enter submit · Esc cancel"
    } else if app.search_input.is_some() {
        "Enter apply · Esc cancel"
    } else {
        "↑↓ rows · ←→ section · Tab tabs · w close tab · L logout · q quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn render_login(frame: &mut Frame, app: &ConsoleApp) {
    let area = centered_rect(frame.area(), 52, 14);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Hull Insight",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Naval hull-maintenance console",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(form_lines(&app.login, true));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter sign in · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign In ")
        .border_style(Style::default().fg(ACCENT));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_form_dialog(frame: &mut Frame, form: &FormState) {
    let height = (form.descriptor.fields.len() as u16 * 2 + 7).min(frame.area().height);
    let area = centered_rect(frame.area(), 64, height);
    frame.render_widget(Clear, area);

    let title = match form.mode {
        FormMode::Create => format!(" New {} ", form.descriptor.title),
        FormMode::Edit => format!(" Edit {} ", form.descriptor.title),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            form.descriptor.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(form_lines(form, false));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(ACCENT));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

/// One render dispatch for every field kind: label, current value,
/// then any validation error.
fn form_lines(form: &FormState, mask_password: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, field) in form.descriptor.fields.iter().enumerate() {
        let focused = i == form.focus();
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let required = if field.required { " *" } else { "" };

        let value = form.values().get(&field.name);
        let shown = match &field.kind {
            FieldKind::Checkbox => {
                let on = value.map(value_is_truthy).unwrap_or(false);
                if on { "[x]".to_string() } else { "[ ]".to_string() }
            }
            FieldKind::Select { options } | FieldKind::MultiSelect { options } => match value {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| options.iter().find(|o| &o.value == v))
                    .map(|o| o.label.clone())
                    .collect::<Vec<_>>()
                    .join(", "),
                Some(v) => options
                    .iter()
                    .find(|o| &o.value == v)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| "(space to choose)".to_string()),
                None => "(space to choose)".to_string(),
            },
            _ => {
                let raw = value.and_then(|v| v.as_str()).unwrap_or("");
                if mask_password && field.name == "password" {
                    "•".repeat(raw.chars().count())
                } else if raw.is_empty() {
                    field.placeholder.clone().unwrap_or_default()
                } else {
                    raw.to_string()
                }
            }
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}{required}: ", field.label), label_style),
            Span::styled(shown, Style::default().fg(Color::White)),
        ]));
        if let Some(error) = form.error_for(&field.name) {
            lines.push(Line::from(Span::styled(
                format!("    {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines
}

fn render_view_dialog(frame: &mut Frame, app: &ConsoleApp, record: &Value) {
    let Some(state) = app.current_screen() else {
        return;
    };
    let view = &state.resource.view;
    let area = centered_rect(frame.area(), 60, 18);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            view.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    for section in &view.sections {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        for key in &section.fields {
            if let Some(field) = view.find(key) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {}: ", field.label),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(field.format(record)),
                ]));
            }
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", view.title))
        .border_style(Style::default().fg(ACCENT));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_confirm_dialog(frame: &mut Frame, app: &ConsoleApp, record: &Value) {
    let entity = app
        .current_screen()
        .map(|s| s.resource.form.title.to_lowercase())
        .unwrap_or_else(|| "record".to_string());
    let name = record
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("this record");

    let area = centered_rect(frame.area(), 56, 7);
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(format!(
            "Are you sure you want to delete {name}?"
        )),
        Line::from(Span::styled(
            format!("This {entity} cannot be recovered from the console."),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y delete · n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm Delete ")
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_toasts(frame: &mut Frame, app: &ConsoleApp) {
    if app.toasts.is_empty() {
        return;
    }
    let area = frame.area();
    let count = app.toasts.len() as u16;
    let width = area.width.min(50);
    let toast_area = Rect {
        x: area.width.saturating_sub(width),
        y: area.height.saturating_sub(count + 1),
        width,
        height: count.min(area.height),
    };
    let lines: Vec<Line> = app
        .toasts
        .visible()
        .map(|t| {
            let color = match t.level {
                ToastLevel::Success => Color::Green,
                ToastLevel::Error => Color::Red,
                ToastLevel::Info => Color::Yellow,
            };
            Line::from(Span::styled(
                format!(" {}: {} ", t.title, t.message),
                Style::default().fg(Color::Black).bg(color),
            ))
        })
        .collect();
    frame.render_widget(Clear, toast_area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Right), toast_area);
}

/// Center a fixed-size rect inside the terminal area.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
