use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::app::App;
use super::theme;
use super::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Chart
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    render_chart(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(" spendtrail ", theme::header_style()),
        Span::styled(
            truncate(app.category_label(), 32),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(title).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::axis_style())
        .title(Span::styled(
            format!(" {} · window {} ", app.query.smoothing, app.query.window),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.series.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No transactions in range",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let points = app.points();
    let net: f64 = app.series.iter().map(|d| d.amount).sum();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme::series_style(net))
        .data(&points);

    let x_bounds = app.x_bounds();
    let y_bounds = app.y_bounds();
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::axis_style())
                .bounds(x_bounds)
                .labels(date_labels(app)),
        )
        .y_axis(
            Axis::default()
                .style(theme::axis_style())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format_amount(y_bounds[0]), theme::dim_style()),
                    Span::styled(format_amount(y_bounds[1]), theme::dim_style()),
                ]),
        );

    f.render_widget(chart, area);
}

/// First, middle and last date of the series.
fn date_labels(app: &App) -> Vec<Span<'static>> {
    let n = app.series.len();
    [0, n / 2, n.saturating_sub(1)]
        .iter()
        .filter_map(|&i| app.series.get(i))
        .map(|d| Span::styled(d.date.format("%Y-%m-%d").to_string(), theme::dim_style()))
        .collect()
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::raw(format!(" {} ", app.status_message)),
        Span::styled(
            "│ s smoothing  +/- window  c category  q quit",
            theme::dim_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(line).style(theme::status_bar_style()), area);
}
