//! Dashboard screen
//!
//! Stat cards over a monthly match chart, engagement trend sparkline,
//! retention gauges, live server metrics, and two demographic tables.
//! `y` flips the chart year, `r` resamples the metrics panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::components::charts::{
    render_metrics, render_monthly_chart, render_retention, render_stat_cards,
    render_trend_sparkline, StatCard,
};
use crate::data::mock;
use crate::data::model::MonthlyStat;
use crate::data::store::DataStore;
use crate::events::Event;
use crate::utils::formatting::format_large_number;

use super::ScreenResponse;

#[derive(Debug)]
pub struct DashboardState {
    pub year: u16,
    pub monthly: Vec<MonthlyStat>,
    pub retention: Vec<(&'static str, u16)>,
    cities: Vec<(u8, &'static str, &'static str, u32)>,
    demographics: Vec<(&'static str, u32, &'static str)>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            year: 2024,
            monthly: mock::seed_monthly(2024),
            retention: mock::seed_retention(),
            cities: mock::seed_cities(),
            demographics: mock::seed_demographics(),
        }
    }
}

impl DashboardState {
    pub fn toggle_year(&mut self) {
        self.year = if self.year == 2024 { 2023 } else { 2024 };
        self.monthly = mock::seed_monthly(self.year);
    }

    pub fn handle_event(&mut self, event: &Event, store: &mut DataStore) -> ScreenResponse {
        match event {
            Event::Char('y') => {
                self.toggle_year();
                ScreenResponse::info(format!("Showing {}", self.year))
            }
            Event::Char('r') | Event::Refresh => {
                store.metrics.jitter(&mut rand::thread_rng());
                ScreenResponse::info("Metrics refreshed")
            }
            _ => ScreenResponse::NotHandled,
        }
    }
}

/// Build the headline cards from live store counts.
pub fn stat_cards(store: &DataStore) -> Vec<StatCard> {
    let active_games = store
        .games
        .iter()
        .filter(|game| game.status.is_active())
        .count() as u64;
    let revenue: f64 = store
        .packages
        .iter()
        .map(|package| package.price * f64::from(package.stock))
        .sum();
    vec![
        StatCard::count("Total Users", store.users.len() as u64, "registered"),
        StatCard::count("Total Events", store.events.len() as u64, "scheduled"),
        StatCard::new(
            "Total Revenue",
            format!("${}", format_large_number(revenue as u64)),
            "package inventory",
            Color::Green,
        ),
        StatCard::count("Active Games", active_games, "live now"),
    ]
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState, store: &DataStore, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    render_stat_cards(f, chunks[0], &stat_cards(store));

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[0]);

    let chart_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(top[0]);
    render_monthly_chart(f, chart_column[0], state.year, &state.monthly);
    render_trend_sparkline(f, chart_column[1], &state.monthly);

    let side_column = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top[1]);
    render_retention(f, side_column[0], &state.retention);
    render_metrics(f, side_column[1], &store.metrics);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);
    render_cities(f, bottom[0], &state.cities);
    render_demographics(f, bottom[1], &state.demographics);
}

fn render_cities(f: &mut Frame, area: Rect, cities: &[(u8, &'static str, &'static str, u32)]) {
    let header = Row::new(vec!["#", "City", "Population", "Users"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = cities
        .iter()
        .map(|(rank, city, population, users)| {
            Row::new(vec![
                Cell::from(rank.to_string()),
                Cell::from(*city),
                Cell::from(*population),
                Cell::from(users.to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(11),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Top Cities"));
    f.render_widget(table, area);
}

fn render_demographics(f: &mut Frame, area: Rect, groups: &[(&'static str, u32, &'static str)]) {
    let header = Row::new(vec!["Group", "Count", "Share"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = groups
        .iter()
        .map(|(group, count, share)| {
            Row::new(vec![
                Cell::from(*group),
                Cell::from(count.to_string()),
                Cell::from(*share),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Demographics"));
    f.render_widget(table, area);
}
