use ratatui::style::{Color, Modifier, Style};

/// Visual styles for the application
#[derive(Debug, Clone)]
pub struct Theme {
    /// Table header row
    pub header: Style,

    /// Ordinary table rows
    pub row: Style,

    /// Row under the cursor
    pub cursor_row: Style,

    /// Selection checkbox of a selected row
    pub selected_marker: Style,

    /// Paginator footer text
    pub footer: Style,

    /// Highlighted page number / selector option
    pub footer_active: Style,

    /// Error messages in the status line
    pub error: Style,

    /// Popover border and title
    pub popover: Style,

    /// Popover input text
    pub popover_input: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            row: Style::default().fg(Color::White),
            cursor_row: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            selected_marker: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray),
            footer_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            popover: Style::default().fg(Color::Cyan),
            popover_input: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        }
    }
}
