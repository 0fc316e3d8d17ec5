//! Paginator footer with page numbers and a rows-per-page selector.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::remote::Artwork;
use crate::table::TableController;
use crate::tui::styles::Theme;
use crate::tui::Frame;

/// Maximum page numbers shown around the current one
const MAX_PAGE_NUMBERS: u32 = 7;

/// Footer paginator plus the rows-per-page selector state.
#[derive(Debug)]
pub struct Paginator {
    /// Rows-per-page choices offered to the user
    options: Vec<usize>,

    /// Whether the selector overlay line is open
    selector_open: bool,

    /// Highlighted option while the selector is open
    selector_index: usize,
}

impl Paginator {
    pub fn new(options: Vec<usize>) -> Self {
        Self {
            options,
            selector_open: false,
            selector_index: 0,
        }
    }

    /// Open the selector with the current rows-per-page highlighted
    pub fn open_selector(&mut self, current_rows: usize) {
        self.selector_index = self
            .options
            .iter()
            .position(|&option| option == current_rows)
            .unwrap_or(0);
        self.selector_open = true;
    }

    pub fn close_selector(&mut self) {
        self.selector_open = false;
    }

    pub fn is_selector_open(&self) -> bool {
        self.selector_open
    }

    /// Highlight the next option
    pub fn selector_next(&mut self) {
        if self.selector_index + 1 < self.options.len() {
            self.selector_index += 1;
        }
    }

    /// Highlight the previous option
    pub fn selector_prev(&mut self) {
        self.selector_index = self.selector_index.saturating_sub(1);
    }

    /// Currently highlighted rows-per-page option
    pub fn selected_option(&self) -> usize {
        self.options[self.selector_index]
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        controller: &TableController<Artwork>,
        show_help: bool,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let line = if self.selector_open {
            self.selector_line(theme)
        } else {
            self.pager_line(controller, theme)
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), chunks[0]);

        let status = if show_help {
            Line::from(Span::styled(
                "left/right page | up/down row | space select | s bulk | p rows | r refresh | q quit",
                theme.footer,
            ))
        } else {
            self.status_line(controller, theme)
        };
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[1]);
    }

    /// Page-number line in the style "< 1 2 [3] 4 5 >".
    ///
    /// The highlighted entry is derived from the pager cursor offset,
    /// which is what the pager widget treats as the start of the
    /// visible window.
    fn pager_line(&self, controller: &TableController<Artwork>, theme: &Theme) -> Line<'static> {
        let total_pages = controller.total_pages();
        let highlighted = controller.first() / controller.rows_per_page() as u32;

        let mut spans = Vec::new();

        let back_style = if controller.page_number() > 1 {
            theme.footer
        } else {
            theme.footer.add_modifier(ratatui::style::Modifier::DIM)
        };
        spans.push(Span::styled("< ", back_style));

        let start_page = highlighted.saturating_sub(MAX_PAGE_NUMBERS / 2);
        let end_page = (start_page + MAX_PAGE_NUMBERS).min(total_pages.max(1));

        for page in start_page..end_page {
            if page == highlighted {
                spans.push(Span::styled(format!("[{}] ", page + 1), theme.footer_active));
            } else {
                spans.push(Span::styled(format!("{} ", page + 1), theme.footer));
            }
        }

        let forward_style = if controller.page_number() < total_pages {
            theme.footer
        } else {
            theme.footer.add_modifier(ratatui::style::Modifier::DIM)
        };
        spans.push(Span::styled(">", forward_style));

        spans.push(Span::styled(
            format!(
                "   page {} of {}   {}/page",
                controller.page_number(),
                total_pages,
                controller.rows_per_page()
            ),
            theme.footer,
        ));

        Line::from(spans)
    }

    /// Inline rows-per-page selector: "rows per page: [5] 10 25 50"
    fn selector_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled("rows per page: ", theme.footer)];

        for (index, option) in self.options.iter().enumerate() {
            if index == self.selector_index {
                spans.push(Span::styled(format!("[{}] ", option), theme.footer_active));
            } else {
                spans.push(Span::styled(format!("{} ", option), theme.footer));
            }
        }

        spans.push(Span::styled("(enter apply, esc cancel)", theme.footer));
        Line::from(spans)
    }

    fn status_line(&self, controller: &TableController<Artwork>, theme: &Theme) -> Line<'static> {
        if let Some(message) = controller.last_error() {
            return Line::from(Span::styled(
                format!("fetch failed: {message} (r to retry)"),
                theme.error,
            ));
        }

        let bulk = controller.bulk();
        if bulk.active {
            return Line::from(Span::styled(
                format!(
                    "bulk select: {} of {} rows gathered, page forward to continue",
                    controller.selection().len(),
                    bulk.requested
                ),
                theme.footer,
            ));
        }

        Line::from(Span::styled(
            format!("{} rows selected", controller.selection().len()),
            theme.footer,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_opens_on_current_option() {
        let mut paginator = Paginator::new(vec![5, 10, 25, 50]);

        paginator.open_selector(25);
        assert!(paginator.is_selector_open());
        assert_eq!(paginator.selected_option(), 25);
    }

    #[test]
    fn test_selector_defaults_to_first_for_unknown_rows() {
        let mut paginator = Paginator::new(vec![5, 10, 25, 50]);

        paginator.open_selector(7);
        assert_eq!(paginator.selected_option(), 5);
    }

    #[test]
    fn test_selector_navigation_clamps_at_ends() {
        let mut paginator = Paginator::new(vec![5, 10]);
        paginator.open_selector(5);

        paginator.selector_prev();
        assert_eq!(paginator.selected_option(), 5);

        paginator.selector_next();
        paginator.selector_next();
        assert_eq!(paginator.selected_option(), 10);
    }
}
