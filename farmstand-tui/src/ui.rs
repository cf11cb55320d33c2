//! Dashboard rendering

use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, Focus, Screen};

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Login => draw_login(f, app),
        Screen::Dashboard => draw_dashboard(f, app),
        Screen::Unreachable => draw_unreachable(f, app),
    }
}

// ========== Login ==========

fn draw_login(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 14, f.area());
    let block = Block::default()
        .title(" Farmstand Login ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Error
            Constraint::Min(1),    // Hint
        ])
        .split(area);

    input_box(
        f,
        chunks[0],
        "Username",
        app.username.value(),
        app.username.visual_cursor(),
        app.focus == Focus::Username,
    );

    let masked: String = "*".repeat(app.password.value().chars().count());
    input_box(
        f,
        chunks[1],
        "Password",
        &masked,
        masked.chars().count(),
        app.focus == Focus::Password,
    );

    if let Some(error) = &app.login_error {
        let line = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(line, chunks[2]);
    }

    let hint = Paragraph::new("Tab switch field · Enter login · Esc quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[3]);
}

// ========== Unreachable ==========

fn draw_unreachable(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 10, f.area());
    let block = Block::default()
        .title(" Connection Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let detail = app
        .unreachable_error
        .as_deref()
        .unwrap_or("unknown error");
    let text = vec![
        Line::from(Span::styled(
            format!("Cannot reach the store API at {}", app.base_url),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(detail),
        Line::from(""),
        Line::from(Span::styled(
            "r retry · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

// ========== Dashboard ==========

fn draw_dashboard(f: &mut Frame, app: &mut App) {
    let mut constraints = vec![Constraint::Length(3)]; // Header
    if app.banner.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(10)); // Panels
    if app.show_logs {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(1)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());
    let mut next = 0;

    // Header
    let user = app.sync.session().username().unwrap_or("-").to_string();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Farmstand Dashboard ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| Inventory & Customer Queue | "),
        Span::styled(format!("{} ", user), Style::default().fg(Color::Green)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, chunks[next]);
    next += 1;

    // Section-level error banner
    if let Some(banner) = app.banner.clone() {
        let line = Paragraph::new(banner)
            .style(Style::default().fg(Color::White).bg(Color::Red));
        f.render_widget(line, chunks[next]);
        next += 1;
    }

    // Panels
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[next]);
    next += 1;

    draw_inventory_panel(f, panels[0], app);
    draw_queue_panel(f, panels[1], app);

    // Logs
    if app.show_logs {
        let logs = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title(" Logs ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM)),
            )
            .output_separator('|')
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .style(Style::default().fg(Color::White))
            .state(&app.logger_state);
        f.render_widget(logs, chunks[next]);
        next += 1;
    }

    // Footer
    let footer = Paragraph::new(
        "Tab focus · Enter add/enqueue · ^S set qty · ^X delete · ^N serve · ^L clear · ^R refresh · ^G logs · Esc logout",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[next]);
}

fn draw_inventory_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Length(3), // Search
            Constraint::Length(1), // Status
            Constraint::Min(3),    // Table
        ])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[0]);

    input_box(
        f,
        form[0],
        "Item name",
        app.item_name.value(),
        app.item_name.visual_cursor(),
        app.focus == Focus::ItemName,
    );
    input_box(
        f,
        form[1],
        "Qty",
        app.item_qty.value(),
        app.item_qty.visual_cursor(),
        app.focus == Focus::ItemQty,
    );
    input_box(
        f,
        chunks[1],
        "Search items",
        app.item_search.value(),
        app.item_search.visual_cursor(),
        app.focus == Focus::ItemSearch,
    );

    let view = app.inventory_view();
    let status = match &app.item_form_error {
        Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(format!(" {} items", view.len()))
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(status, chunks[2]);

    let rows: Vec<Row> = view
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.name.clone()),
                Cell::from(item.qty.to_string()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(8)])
        .header(
            Row::new(vec!["Item", "Qty"]).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .title(" Inventory ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, chunks[3], &mut app.inventory_state);
}

fn draw_queue_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Length(3), // Search
            Constraint::Length(1), // Status
            Constraint::Min(3),    // List
        ])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    input_box(
        f,
        form[0],
        "Customer name",
        app.customer_name.value(),
        app.customer_name.visual_cursor(),
        app.focus == Focus::CustomerName,
    );
    input_box(
        f,
        form[1],
        "Note",
        app.customer_note.value(),
        app.customer_note.visual_cursor(),
        app.focus == Focus::CustomerNote,
    );
    input_box(
        f,
        chunks[1],
        "Search queue",
        app.customer_search.value(),
        app.customer_search.visual_cursor(),
        app.focus == Focus::CustomerSearch,
    );

    let status = match &app.queue_form_error {
        Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
        None => {
            let served = app
                .sync
                .last_served()
                .map(|c| format!(" last served: {}", c.name))
                .unwrap_or_else(|| format!(" {} waiting", app.sync.queue().len()));
            Paragraph::new(served).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(status, chunks[2]);

    let view = app.queue_view();
    let items: Vec<ListItem> = view
        .iter()
        .enumerate()
        .map(|(i, customer)| {
            let mut spans = vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(customer.name.clone()),
            ];
            if let Some(note) = &customer.note {
                spans.push(Span::styled(
                    format!("  ({})", note),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Queue ({}) ", app.sync.queue().len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(list, chunks[3]);
}

// ========== Helpers ==========

fn input_box(f: &mut Frame, area: Rect, title: &str, value: &str, cursor: usize, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let widget = Paragraph::new(value).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(widget, area);

    if focused {
        f.set_cursor_position(Position::new(
            area.x + 1 + cursor as u16,
            area.y + 1,
        ));
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
