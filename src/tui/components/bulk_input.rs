//! Popover form for the "select N rows" workflow.
//!
//! The form owns only text-input state; the parsed count is handed to
//! the controller on submit and never read back out of the widget.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::styles::Theme;
use crate::tui::Frame;

/// Numeric input popover for bulk selection.
#[derive(Debug, Default)]
pub struct BulkInput {
    input: String,
    open: bool,
}

impl BulkInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the popover with an empty input
    pub fn open(&mut self) {
        self.input.clear();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Append a character; anything but an ASCII digit is ignored
    pub fn push(&mut self, ch: char) {
        if self.open && ch.is_ascii_digit() {
            self.input.push(ch);
        }
    }

    /// Remove the last entered digit
    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Parse the entered count; an empty input counts as zero
    pub fn value(&self) -> usize {
        self.input.parse().unwrap_or(0)
    }

    pub fn render(&self, frame: &mut Frame, full_area: Rect, theme: &Theme) {
        let area = centered_rect(34, 3, full_area);

        frame.render_widget(Clear, area);

        let line = Line::from(vec![
            Span::styled("Rows to select: ", theme.popover),
            Span::styled(self.input.clone(), theme.popover_input),
            Span::styled("_", theme.popover_input),
        ]);

        let popover = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select rows (enter submit, esc cancel) ")
                .style(theme.popover),
        );

        frame.render_widget(popover, area);
    }
}

/// Fixed-size rect centered in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
