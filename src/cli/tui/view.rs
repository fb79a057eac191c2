//! Order view: menu list, running summary and status bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, InputMode};
use crate::domain::{Category, MenuItem};

/// Draw the order layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Menu and summary
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[0]);

    draw_menu_panel(frame, app, content_chunks[0]);
    draw_summary_panel(frame, app, content_chunks[1]);
    draw_status_bar(frame, app, main_chunks[1]);
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Pizza => Color::Red,
        Category::Sandwich => Color::Yellow,
        Category::Bowl => Color::Green,
        Category::Drink => Color::Blue,
    }
}

fn menu_line(app: &App, item: &MenuItem) -> ListItem<'static> {
    let key = app
        .hotkey_for(item.id())
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let quantity = app
        .session()
        .map(|s| s.order().quantity_of(item.id()))
        .unwrap_or(0);

    let mut spans = vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:<24}", truncate_str(item.name(), 24)),
            Style::default().fg(category_color(item.category())),
        ),
        Span::raw(format!(" ${:>6.2}", item.price())),
    ];
    if quantity > 0 {
        spans.push(Span::styled(
            format!("  x{}", quantity),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    ListItem::new(Line::from(spans))
}

/// Draw the menu panel
fn draw_menu_panel(frame: &mut Frame, app: &App, area: Rect) {
    let focused = *app.input_mode() == InputMode::Ordering;

    let items: Vec<ListItem> = app
        .catalog()
        .items()
        .iter()
        .map(|item| menu_line(app, item))
        .collect();

    let block_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title("Menu")
                .borders(Borders::ALL)
                .border_style(block_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the summary panel, or the name prompt before a session exists
fn draw_summary_panel(frame: &mut Frame, app: &App, area: Rect) {
    let (title, text) = match (app.input_mode(), app.session()) {
        (InputMode::CustomerName(name), _) => (
            "Customer".to_string(),
            vec![
                Line::from("Enter customer name:"),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{}_", name),
                    Style::default().fg(Color::Yellow),
                )),
            ],
        ),
        (_, Some(session)) => {
            let mut lines: Vec<Line> = session
                .summary_text()
                .lines()
                .map(|line| Line::from(line.to_string()))
                .collect();

            if let Some(item) = app.selected_item() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    item.name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                if !item.ingredients().is_empty() {
                    lines.push(Line::from(Span::styled(
                        item.ingredients().join(", "),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }

            ("Order Summary".to_string(), lines)
        }
        (_, None) => ("Order Summary".to_string(), Vec::new()),
    };

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let total = app
        .session()
        .map(|s| format!("Total: ${:.2}", s.total()))
        .unwrap_or_default();

    let hint = match app.input_mode() {
        InputMode::CustomerName(_) => "enter:start  esc:quit".to_string(),
        InputMode::Ordering => match app.pending_quantity() {
            Some(qty) => format!("Qty: {}  [key] add", qty),
            None => "?:help  enter:end order  esc:quit".to_string(),
        },
        InputMode::Finished => String::new(),
    };

    let message = app.status_message().unwrap_or_default();
    let status = if total.is_empty() {
        format!("{}  {}", message, hint)
    } else {
        format!("{}  |  {}  {}", total, message, hint)
    };

    let paragraph = Paragraph::new(status.trim().to_string())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Truncate a string to max_len characters, adding "..." if truncated
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}
