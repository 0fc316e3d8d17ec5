//! Application driver: routes input to the controller and executes the
//! effects it returns.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::remote::{Artwork, CollectionClient, PageSource};
use crate::table::{Effect, TableController};
use crate::tui::components::{BulkInput, Paginator, TableView};
use crate::tui::events::Event;
use crate::tui::keys::KeyMap;
use crate::tui::styles::Theme;
use crate::tui::Frame;

/// Which component receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Table,
    SizeSelector,
    BulkInput,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    should_quit: bool,

    /// Current application dimensions
    size: Rect,

    /// Key mappings for the application
    key_map: KeyMap,

    /// Current theme for styling
    theme: Theme,

    /// Show the key hint line
    show_help: bool,

    /// Pagination/selection state machine
    controller: TableController<Artwork>,

    /// Remote page source
    source: Arc<dyn PageSource>,

    /// Table rendering and row cursor
    table: TableView,

    /// Paginator footer and rows-per-page selector
    paginator: Paginator,

    /// Bulk-select popover
    bulk_input: BulkInput,

    /// Component currently receiving keys
    focus: Focus,

    /// Sender handed to spawned fetch tasks
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, event_sender: mpsc::UnboundedSender<Event>) -> Result<Self> {
        let source = Arc::new(CollectionClient::new(&config)?);
        Self::with_source(config, source, event_sender)
    }

    fn with_source(
        config: Config,
        source: Arc<dyn PageSource>,
        event_sender: mpsc::UnboundedSender<Event>,
    ) -> Result<Self> {
        let controller = TableController::new(config.rows_per_page)?;
        let paginator = Paginator::new(config.page_size_options.clone());

        Ok(Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            show_help: false,
            controller,
            source,
            table: TableView::new(),
            paginator,
            bulk_input: BulkInput::new(),
            focus: Focus::Table,
            event_sender,
        })
    }

    /// Issue the initial page fetch
    pub fn start(&mut self) -> Result<()> {
        let rows = self.controller.rows_per_page();
        let effects = self.controller.on_page_change(0, rows)?;
        self.execute_effects(effects);
        Ok(())
    }

    /// Handle incoming events
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                if self.key_map.should_quit(&key_event) {
                    self.should_quit = true;
                    return Ok(true);
                }

                if self.key_map.should_show_help(&key_event) && self.focus == Focus::Table {
                    self.show_help = !self.show_help;
                    return Ok(false);
                }

                match self.focus {
                    Focus::BulkInput => self.handle_bulk_input_key(key_event),
                    Focus::SizeSelector => self.handle_size_selector_key(key_event)?,
                    Focus::Table => self.handle_table_key(key_event)?,
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
            }

            Event::Tick => {}

            Event::PageLoaded { request, window } => {
                self.controller.on_page_loaded(request, window);
                self.table.clamp_cursor(self.controller.visible().len());
            }

            Event::FetchFailed { request, message } => {
                self.controller.on_fetch_failed(request, message);
            }
        }

        Ok(self.should_quit)
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(frame.size());

        self.table.render(frame, chunks[0], &self.controller, &self.theme);
        self.paginator
            .render(frame, chunks[1], &self.controller, self.show_help, &self.theme);

        if self.bulk_input.is_open() {
            let full_area = frame.size();
            self.bulk_input.render(frame, full_area, &self.theme);
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => {
                let selected: Vec<u64> = self
                    .controller
                    .selection()
                    .records()
                    .iter()
                    .map(|record| record.id)
                    .collect();
                info!(count = selected.len(), ?selected, "exiting with selection");
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                // Previous page; the controller takes 0-based pages.
                if self.controller.page_number() > 1 {
                    let requested = self.controller.page_number() - 2;
                    self.change_page(requested)?;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let next_exists = self.controller.page_number() < self.controller.total_pages();
                if next_exists {
                    let requested = self.controller.page_number();
                    self.change_page(requested)?;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table.move_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.table.move_down(self.controller.visible().len());
            }
            KeyCode::Char(' ') => {
                let record = self.controller.visible().get(self.table.cursor_row()).cloned();
                if let Some(record) = record {
                    self.controller.on_row_toggle(record);
                }
            }
            KeyCode::Char('s') => {
                self.bulk_input.open();
                self.focus = Focus::BulkInput;
            }
            KeyCode::Char('p') => {
                if !self.paginator.is_selector_open() {
                    self.paginator.open_selector(self.controller.rows_per_page());
                    self.focus = Focus::SizeSelector;
                }
            }
            KeyCode::Char('r') => {
                let requested = self.controller.page_number() - 1;
                self.change_page(requested)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_bulk_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) => {
                self.bulk_input.push(ch);
            }
            KeyCode::Backspace => {
                self.bulk_input.pop();
            }
            KeyCode::Enter => {
                let target = self.bulk_input.value();
                self.controller.on_bulk_select_submit(target);
                self.bulk_input.close();
                self.focus = Focus::Table;
            }
            KeyCode::Esc => {
                self.bulk_input.close();
                self.focus = Focus::Table;
            }
            _ => {}
        }
    }

    fn handle_size_selector_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.paginator.selector_prev();
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.paginator.selector_next();
            }
            KeyCode::Enter => {
                let rows = self.paginator.selected_option();
                self.controller.on_rows_per_page_change(rows)?;
                self.table.clamp_cursor(self.controller.visible().len());
                self.paginator.close_selector();
                self.focus = Focus::Table;
            }
            KeyCode::Esc => {
                self.paginator.close_selector();
                self.focus = Focus::Table;
            }
            _ => {}
        }
        Ok(())
    }

    fn change_page(&mut self, requested_page: u32) -> Result<()> {
        let rows = self.controller.rows_per_page();
        let effects = self.controller.on_page_change(requested_page, rows)?;
        self.execute_effects(effects);
        Ok(())
    }

    /// Execute controller effects: fetches run on the runtime and feed
    /// their results back through the event channel.
    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { page, request } => {
                    let source = Arc::clone(&self.source);
                    let sender = self.event_sender.clone();

                    tokio::spawn(async move {
                        let event = match source.fetch_page(page).await {
                            Ok(window) => Event::PageLoaded { request, window },
                            Err(e) => Event::FetchFailed {
                                request,
                                message: e.to_string(),
                            },
                        };

                        if sender.send(event).is_err() {
                            warn!(page, "event channel closed before fetch result arrived");
                        }
                    });
                }
            }
        }
    }
}
