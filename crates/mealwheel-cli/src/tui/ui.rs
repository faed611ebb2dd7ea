//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::render::{BLW_TIP, PLACEHOLDER, row_cells};

use super::app::{App, View};

/// Render the current view.
pub fn render(f: &mut Frame, app: &App) {
    let warning = app.warning();
    let banner_height = if warning.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // warning banner
            Constraint::Min(5),                // main content
            Constraint::Length(1),             // tip
            Constraint::Length(1),             // status bar
        ])
        .split(f.area());

    if let Some(message) = warning {
        render_warning(f, &message, chunks[0]);
    }

    match app.current_view {
        View::Week => render_week(f, app, chunks[1]),
        View::Help => render_help(f, chunks[1]),
    }

    f.render_widget(
        Paragraph::new(Span::styled(BLW_TIP, Style::default().fg(Color::DarkGray))),
        chunks[2],
    );
    render_status_bar(f, app, chunks[3]);
}

fn render_warning(f: &mut Frame, message: &str, area: Rect) {
    let banner = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Yellow),
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Warning "),
    );
    f.render_widget(banner, area);
}

fn render_week(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Week ");

    if app.days().is_empty() {
        let prompt = if app.session.is_enabled() {
            PLACEHOLDER
        } else {
            "Generation is disabled until the workbook loads."
        };
        f.render_widget(Paragraph::new(prompt).block(block), area);
        return;
    }

    let header_cells = app
        .household
        .headers()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app.days().iter().enumerate().map(|(i, day)| {
        let style = if i == app.selected_day {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(row_cells(day).map(|c| Cell::from(c.to_string()))).style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Percentage(18),
            Constraint::Percentage(22),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(block);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(area);

    f.render_widget(table, chunks[0]);
    render_day_detail(f, app, chunks[1]);
}

/// Full, wrapped text of the selected day; long slots are cut off in the table.
fn render_day_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(day) = app.selected() else {
        return;
    };
    let headers = app.household.headers();
    let lines: Vec<Line> = headers
        .iter()
        .zip(row_cells(day))
        .skip(1)
        .map(|(header, value)| {
            Line::from(vec![
                Span::styled(format!("{header}: "), Style::default().fg(Color::Yellow)),
                Span::raw(value.to_string()),
            ])
        })
        .collect();

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", day.day)),
    );
    f.render_widget(detail, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let section = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("  Menu", section)),
        Line::from("    g         Generate a new week"),
        Line::from(""),
        Line::from(Span::styled("  Navigation", section)),
        Line::from("    j/Down    Next day"),
        Line::from("    k/Up      Previous day"),
        Line::from("    Esc/q     Back / Quit"),
        Line::from(""),
        Line::from(Span::styled("  Other", section)),
        Line::from("    ?         Show this help"),
        Line::from(""),
    ];

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.current_view {
        View::Week => "Week",
        View::Help => "Help",
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            format!(" {view_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw("  g:generate  q:quit  ?:help"),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}
