//! Main viewer screen
//!
//! Renders the date selector, the fetched entry (title, metadata, and
//! explanation), and the footer with key hints and history status.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::ApodRecord;

/// Renders the full viewer screen
pub fn render_viewer(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Date selector
            Constraint::Min(5),    // Entry content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_date_selector(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Renders the year/month/day selector row
fn render_date_selector(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),  // Year
            Constraint::Length(6),  // Month
            Constraint::Length(6),  // Day
            Constraint::Min(10),    // Hint
        ])
        .split(area);

    render_selector_box(
        frame,
        columns[0],
        "Year",
        &format!("{:04}", app.selected_year),
        app.focus == Focus::Year,
    );
    render_selector_box(
        frame,
        columns[1],
        "Mon",
        &format!("{:02}", app.selected_month),
        app.focus == Focus::Month,
    );
    render_selector_box(
        frame,
        columns[2],
        "Day",
        &format!("{:02}", app.selected_day),
        app.focus == Focus::Day,
    );

    let hint = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" to fetch the picture of that day"),
    ]))
    .block(Block::default().borders(Borders::NONE))
    .alignment(Alignment::Left);
    // Vertically center the hint against the bordered boxes
    if columns[3].height >= 2 {
        let hint_area = Rect {
            y: columns[3].y + 1,
            height: 1,
            ..columns[3]
        };
        frame.render_widget(hint, hint_area);
    }
}

/// Renders one selector column with highlight when focused
fn render_selector_box(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Span::styled(value.to_string(), value_style))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the entry area: record, failure message, fetching notice, or welcome
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    if app.fetching {
        let fetching = Paragraph::new("Fetching...")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(fetching, centered_line(area));
        return;
    }

    if let Some(message) = &app.status {
        let failure = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(failure, centered_line(area));
        return;
    }

    match &app.record {
        Some(record) => render_record(frame, app, record, area),
        None => render_welcome(frame, area),
    }
}

/// Renders a fetched entry
fn render_record(frame: &mut Frame, app: &App, record: &ApodRecord, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Metadata line
            Constraint::Length(1), // Media URL line
            Constraint::Min(1),    // Explanation
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        record.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(title, chunks[0]);

    let metadata = Paragraph::new(Line::from(vec![
        Span::styled(
            record.date.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            record.media_type.to_string(),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            record.copyright.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(metadata, chunks[1]);

    // Image rendering is left to the user's browser; show where the media lives
    let media = Paragraph::new(Span::styled(
        record.best_url().to_string(),
        Style::default().fg(Color::Blue),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(media, chunks[2]);

    let explanation = Paragraph::new(record.explanation.clone())
        .block(
            Block::default()
                .title(" Explanation ")
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_offset, 0));
    frame.render_widget(explanation, chunks[3]);
}

/// Renders the welcome text shown before the first fetch
fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "NASA Astronomy Picture of the Day",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Pick a date above and press Enter to fetch that day's picture."),
        Line::from("The feed goes back to 1995-06-16."),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? for keyboard shortcuts",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Percentage(30),
        ])
        .split(area);
    frame.render_widget(welcome, vertical[1]);
}

/// Renders the footer with key hints and history status
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut right = format!("{} saved", app.history_len);
    if let Some(fetched) = app.last_fetched {
        right.push_str(&format!("  fetched {}", fetched.format("%H:%M:%S")));
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(right.len() as u16 + 1)])
        .split(area);

    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" ←→", Style::default().fg(Color::Yellow)),
        Span::raw(" column "),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(" value "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" fetch "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]));
    frame.render_widget(hints, columns[0]);

    let status = Paragraph::new(Span::styled(right, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Right);
    frame.render_widget(status, columns[1]);
}

/// Returns a one-third-height band in the middle of the area for short notices
fn centered_line(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);
    chunks[1]
}
