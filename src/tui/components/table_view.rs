//! Data table with a checkbox-style selection column.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::UnicodeWidthChar;

use crate::remote::Artwork;
use crate::table::TableController;
use crate::tui::styles::Theme;
use crate::tui::Frame;

/// Table renderer plus the row cursor within the visible slice.
#[derive(Debug, Default)]
pub struct TableView {
    /// Highlighted row, an index into the visible slice
    cursor_row: usize,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the row under the cursor
    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// Move the cursor up one row
    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    /// Move the cursor down one row
    pub fn move_down(&mut self, visible_len: usize) {
        if self.cursor_row + 1 < visible_len {
            self.cursor_row += 1;
        }
    }

    /// Keep the cursor inside the visible slice after it changes size
    pub fn clamp_cursor(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor_row = 0;
        } else if self.cursor_row >= visible_len {
            self.cursor_row = visible_len - 1;
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        controller: &TableController<Artwork>,
        theme: &Theme,
    ) {
        let header = Row::new(vec![
            Cell::from(" "),
            Cell::from("Title"),
            Cell::from("Place of Origin"),
            Cell::from("Artist Display"),
            Cell::from("Inscriptions"),
            Cell::from("Date Start"),
            Cell::from("Date End"),
        ])
        .style(theme.header);

        let rows: Vec<Row> = controller
            .visible()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let selected = controller.selection().contains(record.id);
                let marker = if selected { "[x]" } else { "[ ]" };

                let marker_cell = if selected {
                    Cell::from(marker).style(theme.selected_marker)
                } else {
                    Cell::from(marker)
                };

                let row = Row::new(vec![
                    marker_cell,
                    Cell::from(truncate(record.title.as_deref().unwrap_or("-"), 40)),
                    Cell::from(truncate(record.place_of_origin.as_deref().unwrap_or("-"), 20)),
                    Cell::from(truncate(record.artist_display.as_deref().unwrap_or("-"), 40)),
                    Cell::from(truncate(record.inscriptions.as_deref().unwrap_or("-"), 30)),
                    Cell::from(year(record.date_start)),
                    Cell::from(year(record.date_end)),
                ]);

                if index == self.cursor_row {
                    row.style(theme.cursor_row)
                } else {
                    row.style(theme.row)
                }
            })
            .collect();

        let title = if controller.is_loading() {
            format!(
                " Artworks - {} selected (loading...) ",
                controller.selection().len()
            )
        } else {
            format!(" Artworks - {} selected ", controller.selection().len())
        };

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(26),
            Constraint::Percentage(14),
            Constraint::Percentage(26),
            Constraint::Percentage(16),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .column_spacing(1);

        frame.render_widget(table, area);
    }
}

/// Clip a string to `max` display columns, appending an ellipsis when
/// anything was cut.
fn truncate(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut clipped = String::new();

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max.saturating_sub(1) {
            clipped.push('\u{2026}');
            return clipped;
        }
        width += ch_width;
        clipped.push(ch);
    }

    clipped
}

fn year(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |year| year.to_string())
}
