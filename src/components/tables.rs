//! Management table rendering
//!
//! Shared table chrome for the management screens: header row, paged body,
//! selection highlight, and a footer with the page position. Callers filter
//! their rows first and hand the filtered set in; paging always applies to
//! what survives the filter.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub const ITEMS_PER_PAGE: usize = 5;

/// Paging and selection state for one managed table.
#[derive(Debug, Clone)]
pub struct TableView {
    pub state: TableState,
    /// Zero-based page into the filtered rows
    pub page: usize,
    pub per_page: usize,
    /// Body rectangle recorded at last render, used for click routing
    area: Option<Rect>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl TableView {
    pub fn new(per_page: usize) -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        Self {
            state,
            page: 0,
            per_page,
            area: None,
        }
    }

    /// Page count for `len` filtered rows; an empty table still has one page.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page).max(1)
    }

    /// Index range of the rows shown on the current page.
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.page * self.per_page).min(len);
        let end = (start + self.per_page).min(len);
        start..end
    }

    /// Re-fit page and selection after the row set changed (filter edit,
    /// delete, create).
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.min(self.total_pages(len) - 1);
        let visible = self.visible_range(len).len();
        if visible == 0 {
            self.state.select(None);
        } else {
            let selected = self.state.selected().unwrap_or(0).min(visible - 1);
            self.state.select(Some(selected));
        }
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page + 1 < self.total_pages(len) {
            self.page += 1;
            self.state.select(Some(0));
        }
    }

    pub fn previous_page(&mut self, len: usize) {
        if self.page > 0 {
            self.page -= 1;
            self.state.select(Some(0));
        }
    }

    pub fn select_next(&mut self, len: usize) {
        let visible = self.visible_range(len).len();
        if visible == 0 {
            return;
        }
        let next = match self.state.selected() {
            Some(current) => (current + 1).min(visible - 1),
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self, len: usize) {
        let visible = self.visible_range(len).len();
        if visible == 0 {
            return;
        }
        let previous = self.state.selected().unwrap_or(0).saturating_sub(1);
        self.state.select(Some(previous));
    }

    /// Absolute index into the filtered rows of the selected row.
    pub fn selected_index(&self, len: usize) -> Option<usize> {
        let selected = self.state.selected()?;
        let absolute = self.page * self.per_page + selected;
        (absolute < len).then_some(absolute)
    }

    /// Visible row index under a terminal cell, if any.
    pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.area?;
        if column <= area.x
            || column >= area.x.saturating_add(area.width).saturating_sub(1)
            || row < area.y + 2
        {
            return None;
        }
        // Border and header occupy the first two lines of the block
        let index = (row - area.y - 2) as usize;
        (index < self.visible_range(len).len()).then_some(index)
    }

    fn note_area(&mut self, area: Rect) {
        self.area = Some(area);
    }
}

/// Draw one managed table with its footer.
#[allow(clippy::too_many_arguments)]
pub fn render_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[&str],
    widths: &[Constraint],
    rows: &[Vec<String>],
    view: &mut TableView,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let border_color = if focused { Color::Yellow } else { Color::Blue };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string());

    if rows.is_empty() {
        let empty = Paragraph::new("No rows match the current filter")
            .style(Style::default().fg(Color::Gray))
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
        f.render_widget(empty, chunks[0]);
        view.note_area(chunks[0]);
        render_footer(f, chunks[1], rows.len(), view);
        return;
    }

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    let visible = view.visible_range(rows.len());
    let body: Vec<Row> = rows[visible]
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.clone()))).height(1))
        .collect();

    let table = Table::new(body, widths.to_vec())
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    view.note_area(chunks[0]);
    f.render_stateful_widget(table, chunks[0], &mut view.state);
    render_footer(f, chunks[1], rows.len(), view);
}

fn render_footer(f: &mut Frame, area: Rect, len: usize, view: &TableView) {
    let text = format!(
        " Page {} of {}  |  {} row{}",
        view.page + 1,
        view.total_pages(len),
        len,
        if len == 1 { "" } else { "s" },
    );
    let footer = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up_and_never_hits_zero() {
        let view = TableView::new(5);
        assert_eq!(view.total_pages(0), 1);
        assert_eq!(view.total_pages(5), 1);
        assert_eq!(view.total_pages(6), 2);
        assert_eq!(view.total_pages(11), 3);
    }

    #[test]
    fn test_visible_range_clips_last_page() {
        let mut view = TableView::new(5);
        assert_eq!(view.visible_range(7), 0..5);
        view.next_page(7);
        assert_eq!(view.visible_range(7), 5..7);
        // No page past the last
        view.next_page(7);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_selection_stays_inside_page() {
        let mut view = TableView::new(5);
        for _ in 0..10 {
            view.select_next(7);
        }
        assert_eq!(view.state.selected(), Some(4));
        assert_eq!(view.selected_index(7), Some(4));

        view.next_page(7);
        assert_eq!(view.state.selected(), Some(0));
        view.select_next(7);
        assert_eq!(view.state.selected(), Some(1));
        assert_eq!(view.selected_index(7), Some(6));
        view.select_previous(7);
        view.select_previous(7);
        assert_eq!(view.state.selected(), Some(0));
    }

    #[test]
    fn test_clamp_after_rows_shrink() {
        let mut view = TableView::new(5);
        view.next_page(6);
        assert_eq!(view.page, 1);

        // Filter tightened: only 3 rows remain, page 1 no longer exists
        view.clamp(3);
        assert_eq!(view.page, 0);
        assert_eq!(view.state.selected(), Some(0));

        view.clamp(0);
        assert_eq!(view.state.selected(), None);
        assert_eq!(view.total_pages(0), 1);
    }

    #[test]
    fn test_row_at_maps_clicks_to_visible_rows() {
        let mut view = TableView::new(5);
        view.note_area(Rect::new(0, 5, 60, 10));

        // First body row sits under border + header
        assert_eq!(view.row_at(10, 7, 4), Some(0));
        assert_eq!(view.row_at(10, 10, 4), Some(3));
        // Below the last populated row
        assert_eq!(view.row_at(10, 11, 4), None);
        // Header line and border
        assert_eq!(view.row_at(10, 6, 4), None);
        assert_eq!(view.row_at(0, 7, 4), None);
    }

    #[test]
    fn test_render_populates_click_area() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut view = TableView::new(5);
        let rows = vec![
            vec!["1".to_string(), "Aura Bundle Event".to_string()],
            vec!["2".to_string(), "Call Bundle Event".to_string()],
        ];
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_table(
                    f,
                    Rect::new(0, 0, 80, 12),
                    "Events",
                    &["SL", "Event Name"],
                    &[Constraint::Length(4), Constraint::Min(10)],
                    &rows,
                    &mut view,
                    true,
                );
            })
            .unwrap();
        assert_eq!(view.row_at(10, 2, rows.len()), Some(0));
    }
}
