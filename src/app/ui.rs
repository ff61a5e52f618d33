use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Wrap,
    },
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use strum::IntoEnumIterator;

use crate::{
    app::app::{App, InputMode},
    models::{TimeRange, TradeAction},
    services::DataMode,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if let Some(message) = app.error_popup.clone() {
        render_popup(frame, "Error", &message, Color::Red);
    } else if let Some(message) = app.popup_message.clone() {
        render_popup(frame, "Info", &message, Color::Cyan);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (mode_label, mode_color) = match app.session.mode() {
        DataMode::Mock => ("MOCK MODE", Color::Yellow),
        DataMode::Real => ("REAL MODE", Color::Green),
    };

    let ranges = TimeRange::iter()
        .map(|range| {
            if range == app.time_range {
                Span::styled(
                    format!(" [{}] ", range.label()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!("  {}  ", range.label()), Style::default().fg(Color::DarkGray))
            }
        })
        .collect::<Vec<Span>>();

    let mut spans = vec![
        Span::styled(
            "AlphaTrade",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(mode_label, Style::default().fg(mode_color)),
        Span::raw("  "),
    ];
    spans.extend(ranges);

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(columns[0]);

    render_quote(frame, app, left[0]);
    render_chart(frame, app, left[1]);
    render_analysis(frame, app, left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(6),
            Constraint::Length(9),
        ])
        .split(columns[1]);

    render_trade_form(frame, app, right[0]);
    render_positions(frame, app, right[1]);
    render_trades(frame, app, right[2]);
}

fn render_quote(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.symbol))
        .borders(Borders::ALL);

    let Some(quote) = &app.quote else {
        let empty = Paragraph::new("No quote loaded").block(block);
        frame.render_widget(empty, area);
        return;
    };

    let change_color = if *quote.change() >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };
    let arrow = if *quote.change() >= Decimal::ZERO {
        "▲"
    } else {
        "▼"
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:.2}", quote.price()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} {:.2} ({:.2}%)",
                    arrow,
                    quote.change().abs(),
                    quote.change_percent().abs()
                ),
                Style::default().fg(change_color),
            ),
        ]),
        Line::from(format!(
            "Open {:.2}   High {:.2}   Low {:.2}   Prev Close {:.2}",
            quote.open(),
            quote.high(),
            quote.low(),
            quote.previous_close()
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Close ({}) ", app.time_range.label()))
        .borders(Borders::ALL);

    if app.candles.is_empty() {
        let empty = Paragraph::new("No candle data").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let points = app
        .candles
        .iter()
        .enumerate()
        .map(|(i, candle)| (i as f64, candle.close().to_f64().unwrap_or(0.0)))
        .collect::<Vec<(f64, f64)>>();

    let min = points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let margin = ((max - min) * 0.1).max(0.01);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, (points.len().saturating_sub(1)) as f64])
                .labels(vec![
                    Span::raw("oldest"),
                    Span::raw("latest"),
                ]),
        )
        .y_axis(
            Axis::default()
                .bounds([min - margin, max + margin])
                .labels(vec![
                    Span::raw(format!("{:.2}", min - margin)),
                    Span::raw(format!("{:.2}", max + margin)),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_analysis(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.analysis.clone().unwrap_or_else(|| {
        String::from("Press 'a' to generate an AI analysis of the current instrument.")
    });

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" AI Analysis ").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_trade_form(frame: &mut Frame, app: &App, area: Rect) {
    let action_color = match app.trade_action {
        TradeAction::Buy => Color::Green,
        TradeAction::Sell => Color::Red,
    };

    let price = app
        .quote
        .as_ref()
        .map(|quote| format!("{:.2}", quote.price()))
        .unwrap_or_else(|| String::from("---"));

    let estimated_total = match (&app.quote, app.quantity_input.parse::<Decimal>()) {
        (Some(quote), Ok(quantity)) => format!("{:.2}", quote.price() * quantity),
        _ => String::from("---"),
    };

    let quantity_style = if app.input_mode == InputMode::Quantity {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Action    "),
            Span::styled(
                app.trade_action.to_string().to_uppercase(),
                Style::default().fg(action_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Symbol    {}", app.symbol)),
        Line::from(format!("Price     {}", price)),
        Line::from(vec![
            Span::raw("Quantity  "),
            Span::styled(app.quantity_input.clone(), quantity_style),
        ]),
        Line::from(format!("Est Total {}", estimated_total)),
        Line::from(""),
        Line::from(Span::styled(
            "b/s action   e quantity   t submit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Paper Trade ")
            .borders(Borders::ALL),
    );

    frame.render_widget(paragraph, area);
}

fn render_positions(frame: &mut Frame, app: &mut App, area: Rect) {
    let header_cells = ["Symbol", "Kind", "Qty", "Avg Cost", "Value", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let quote_price = app.quote.as_ref().map(|quote| *quote.price());
    let total_value = app.session.ledger().total_value();

    let rows = app
        .session
        .ledger()
        .positions()
        .iter()
        .map(|position| {
            // Market value at the live quote for the viewed symbol; the
            // average cost is the best price estimate for everything else.
            let price = match quote_price {
                Some(price) if *position.symbol() == app.symbol => price,
                _ => *position.average_cost(),
            };

            // Allocation share on the same cost basis as the total.
            let share = if total_value.is_zero() {
                Decimal::ZERO
            } else {
                position.quantity() * position.average_cost() / total_value
                    * Decimal::ONE_HUNDRED
            };

            let cells = [
                Cell::from(position.symbol().clone()),
                Cell::from(position.kind().to_string()),
                Cell::from(format!("{:.2}", position.quantity())),
                Cell::from(format!("{:.2}", position.average_cost())),
                Cell::from(format!("{:.2}", position.market_value(price))),
                Cell::from(format!("{:.1}%", share)),
            ];

            Row::new(cells).height(1)
        })
        .collect::<Vec<Row>>();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Positions (Total {:.2}) ", total_value))
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_trades(frame: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Time", "Action", "Qty", "Price", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app
        .session
        .ledger()
        .trades()
        .iter()
        .take(10)
        .map(|trade| {
            let action_color = match trade.action() {
                TradeAction::Buy => Color::Green,
                TradeAction::Sell => Color::Red,
            };

            let cells = [
                Cell::from(trade.timestamp().format("%Y-%m-%d").to_string()),
                Cell::from(format!("{} {}", trade.action(), trade.symbol()))
                    .style(Style::default().fg(action_color)),
                Cell::from(format!("{:.2}", trade.quantity())),
                Cell::from(format!("{:.2}", trade.price())),
                Cell::from(format!("{:.2}", trade.total())),
            ];

            Row::new(cells).height(1)
        })
        .collect::<Vec<Row>>();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Trade Log ").borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::raw("Symbol: "),
            Span::styled(
                format!("{}_", app.search_input),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Enter load   Esc cancel", Style::default().fg(Color::DarkGray)),
        ]),
        InputMode::Quantity => Line::from(Span::styled(
            "Editing quantity: type digits, Enter/Esc to finish",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Normal => Line::from(Span::styled(
            "/ symbol   1/2/3 range   b/s action   e qty   t trade   a analysis   m mode   r refresh   q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_popup(frame: &mut Frame, title: &str, message: &str, color: Color) {
    let area = centered_rect(50, 20, frame.area());

    let paragraph = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
