//! Dashboard visualization widgets
//!
//! Stat cards, the monthly match chart, retention gauges, and the live
//! metrics panel composed by the dashboard screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Gauge, Paragraph, Sparkline},
    Frame,
};

use crate::data::model::{MonthlyStat, ServerMetrics};
use crate::utils::formatting::format_large_number;

/// One summary card at the top of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub detail: String,
    pub color: Color,
}

impl StatCard {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        detail: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            detail: detail.into(),
            color,
        }
    }

    /// Card for a plain count, abbreviated past a thousand.
    pub fn count(title: impl Into<String>, count: u64, detail: impl Into<String>) -> Self {
        Self::new(title, format_large_number(count), detail, Color::Cyan)
    }
}

/// Render a row of stat cards in equal columns.
pub fn render_stat_cards(f: &mut Frame, area: Rect, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    let percent = (100 / cards.len()) as u16;
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Percentage(percent))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default()
                    .fg(card.color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.detail.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(card.color))
                .title(card.title.clone()),
        );
        f.render_widget(widget, *chunk);
    }
}

/// Bar data for the monthly chart.
pub fn monthly_bar_data(stats: &[MonthlyStat]) -> Vec<(&'static str, u64)> {
    stats.iter().map(|s| (s.month, s.matches)).collect()
}

/// Render the monthly match counts for one year.
pub fn render_monthly_chart(f: &mut Frame, area: Rect, year: u16, stats: &[MonthlyStat]) {
    let data = monthly_bar_data(stats);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!("Monthly Matches {year} [y: switch year]")),
        )
        .data(&data)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, area);
}

/// Render the engagement trend line for the same months.
pub fn render_trend_sparkline(f: &mut Frame, area: Rect, stats: &[MonthlyStat]) {
    let data: Vec<u64> = stats.iter().map(|s| s.trend).collect();
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title("Engagement Trend"),
        )
        .data(&data)
        .style(Style::default().fg(Color::Magenta));
    f.render_widget(sparkline, area);
}

/// Render retention cohorts as stacked gauges.
pub fn render_retention(f: &mut Frame, area: Rect, cohorts: &[(&str, u16)]) {
    if cohorts.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cohorts.iter().map(|_| Constraint::Length(3)).collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for ((label, percent), chunk) in cohorts.iter().zip(chunks.iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue))
                    .title(format!("Retention {label}")),
            )
            .gauge_style(Style::default().fg(Color::Blue))
            .percent((*percent).min(100))
            .label(format!("{percent}%"));
        f.render_widget(gauge, *chunk);
    }
}

/// Render the live server metrics panel.
pub fn render_metrics(f: &mut Frame, area: Rect, metrics: &ServerMetrics) {
    let uptime_color = if metrics.uptime_pct >= 99.95 {
        Color::Green
    } else {
        Color::Yellow
    };
    let latency_color = if metrics.latency_ms <= 100.0 {
        Color::Green
    } else {
        Color::Yellow
    };
    let error_color = if metrics.error_rate_pct < 0.05 {
        Color::Green
    } else {
        Color::Red
    };

    let lines = vec![
        metric_line("Uptime", format!("{:.2}%", metrics.uptime_pct), uptime_color),
        metric_line(
            "Latency",
            format!("{:.0} ms", metrics.latency_ms),
            latency_color,
        ),
        metric_line(
            "Error rate",
            format!("{:.2}%", metrics.error_rate_pct),
            error_color,
        ),
        metric_line(
            "Churn",
            format!("{:.1}%", metrics.churn_rate_pct),
            Color::Gray,
        ),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title("Live Metrics [r: refresh]"),
    );
    f.render_widget(panel, area);
}

fn metric_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}
