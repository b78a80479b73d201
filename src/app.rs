//! Application state management for the APOD viewer
//!
//! This module contains the main application state, handling keyboard input,
//! date selection, and the fetch-then-store sequence triggered by the user.

use chrono::{DateTime, Datelike, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::cache::{CacheError, CacheStore};
use crate::cli::StartupConfig;
use crate::config::Config;
use crate::data::{ApodClient, ApodRecord};

/// First year the APOD service has entries for (the feed started 1995-06-16)
pub const FIRST_APOD_YEAR: i32 = 1995;

/// Message shown for any fetch failure, regardless of its kind
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please check the date and try again.";

/// File name used when no platform data directory is available
const FALLBACK_HISTORY_FILE: &str = "apod_history.csv";

/// Which part of the date selector currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Year,
    Month,
    Day,
}

/// Main application struct managing state and data
pub struct App {
    /// Selected year in the date selector
    pub selected_year: i32,
    /// Selected month (1-12)
    pub selected_month: u32,
    /// Selected day (1-31; combinations are not validated locally)
    pub selected_day: u32,
    /// Largest selectable year (the current year)
    pub max_year: i32,
    /// Which selector column has focus
    pub focus: Focus,
    /// Record currently on screen, if the last fetch succeeded
    pub record: Option<ApodRecord>,
    /// Generic failure message shown when the last fetch failed
    pub status: Option<String>,
    /// True while a fetch-then-store sequence is in flight
    pub fetching: bool,
    /// Fetch queued by handle_key, consumed by the event loop
    pub fetch_requested: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Scroll offset for the explanation text
    pub scroll_offset: u16,
    /// Rows in the history file after the last successful fetch
    pub history_len: usize,
    /// Timestamp of the last successful fetch
    pub last_fetched: Option<DateTime<Local>>,
    /// APOD API client
    client: ApodClient,
    /// CSV history store
    store: CacheStore,
}

impl App {
    /// Creates a new App instance from resolved configuration
    ///
    /// The date selector starts on today's date, or on the date given via
    /// `--date` (which also queues an immediate fetch). The history file
    /// falls back to the working directory when no platform data directory
    /// can be determined.
    pub fn new(config: &Config, startup: StartupConfig) -> Self {
        let store = match startup.cache_file {
            Some(path) => CacheStore::with_path(path),
            None => CacheStore::new()
                .unwrap_or_else(|| CacheStore::with_path(FALLBACK_HISTORY_FILE.into())),
        };

        let today = Local::now().date_naive();
        let initial = startup.initial_date.unwrap_or(today);

        Self {
            selected_year: initial.year(),
            selected_month: initial.month(),
            selected_day: initial.day(),
            max_year: today.year(),
            focus: Focus::Day,
            record: None,
            status: None,
            fetching: false,
            fetch_requested: startup.initial_date.is_some(),
            should_quit: false,
            show_help: false,
            scroll_offset: 0,
            history_len: 0,
            last_fetched: None,
            client: ApodClient::new(config.api_key.clone()),
            store,
        }
    }

    /// Creates an App with a specific store (for testing)
    #[cfg(test)]
    fn with_store(store: CacheStore) -> Self {
        let config = Config {
            api_key: "TEST_KEY".to_string(),
        };
        let mut app = Self::new(&config, StartupConfig::default());
        app.store = store;
        app
    }

    /// Formats the current selection as the date string sent to the service
    ///
    /// The selection is formatted as-is; an impossible combination such as
    /// 2024-02-31 is passed through and rejected by the service, not locally.
    pub fn selected_date_string(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.selected_year, self.selected_month, self.selected_day
        )
    }

    /// Runs the fetch-then-store sequence for the selected date
    ///
    /// At most one such sequence is ever in flight: the event loop awaits this
    /// method before handling further input. Fetch failures of any kind
    /// collapse into one generic status message; history file failures are
    /// fatal and propagate.
    pub async fn run_fetch(&mut self) -> Result<(), CacheError> {
        let date = self.selected_date_string();

        self.fetch_requested = false;
        self.fetching = true;
        let result = self.client.fetch(&date).await;
        self.fetching = false;

        match result {
            Ok(record) => self.apply_fetch_success(record),
            Err(err) => {
                warn!(error = %err, requested = %date, "APOD fetch failed");
                self.apply_fetch_failure();
                Ok(())
            }
        }
    }

    /// Stores a fetched record in the history and puts it on screen
    fn apply_fetch_success(&mut self, record: ApodRecord) -> Result<(), CacheError> {
        let history = self.store.upsert(&record)?;
        self.history_len = history.len();
        self.record = Some(record);
        self.status = None;
        self.scroll_offset = 0;
        self.last_fetched = Some(Local::now());
        Ok(())
    }

    /// Clears any displayed record and shows the generic failure message
    fn apply_fetch_failure(&mut self) {
        self.record = None;
        self.status = Some(FETCH_FAILED_MESSAGE.to_string());
        self.scroll_offset = 0;
    }

    /// Handles a keyboard event
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Only quit is allowed while a fetch is in flight
        if self.fetching {
            if key_event.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus_previous();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focus_next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.increment_focused();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.decrement_focused();
            }
            KeyCode::Enter => {
                self.fetch_requested = true;
            }
            KeyCode::Char('t') => {
                self.select_today();
            }
            // Explanation scrolling
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.scroll_down();
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll_up();
            }
            KeyCode::Char('g') => {
                self.scroll_to_top();
            }
            KeyCode::Char('G') => {
                self.scroll_to_bottom();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Moves selector focus one column to the left, wrapping around
    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            Focus::Year => Focus::Day,
            Focus::Month => Focus::Year,
            Focus::Day => Focus::Month,
        };
    }

    /// Moves selector focus one column to the right, wrapping around
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Year => Focus::Month,
            Focus::Month => Focus::Day,
            Focus::Day => Focus::Year,
        };
    }

    /// Increments the focused selector value, wrapping at its upper bound
    pub fn increment_focused(&mut self) {
        match self.focus {
            Focus::Year => {
                self.selected_year = if self.selected_year >= self.max_year {
                    FIRST_APOD_YEAR
                } else {
                    self.selected_year + 1
                };
            }
            Focus::Month => {
                self.selected_month = if self.selected_month >= 12 {
                    1
                } else {
                    self.selected_month + 1
                };
            }
            Focus::Day => {
                self.selected_day = if self.selected_day >= 31 {
                    1
                } else {
                    self.selected_day + 1
                };
            }
        }
    }

    /// Decrements the focused selector value, wrapping at its lower bound
    pub fn decrement_focused(&mut self) {
        match self.focus {
            Focus::Year => {
                self.selected_year = if self.selected_year <= FIRST_APOD_YEAR {
                    self.max_year
                } else {
                    self.selected_year - 1
                };
            }
            Focus::Month => {
                self.selected_month = if self.selected_month <= 1 {
                    12
                } else {
                    self.selected_month - 1
                };
            }
            Focus::Day => {
                self.selected_day = if self.selected_day <= 1 {
                    31
                } else {
                    self.selected_day - 1
                };
            }
        }
    }

    /// Resets the date selection to today
    pub fn select_today(&mut self) {
        let today = Local::now().date_naive();
        self.selected_year = today.year();
        self.selected_month = today.month();
        self.selected_day = today.day();
    }

    /// Scrolls up in the explanation with bounds checking
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the explanation with a maximum limit
    ///
    /// The actual maximum depends on content height, but we use a reasonable
    /// upper bound and let the renderer clamp.
    pub fn scroll_down(&mut self) {
        const MAX_SCROLL: u16 = 100;
        if self.scroll_offset < MAX_SCROLL {
            self.scroll_offset += 1;
        }
    }

    /// Resets scroll offset to 0
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Sets scroll offset to a large value that the renderer clamps
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 100;
    }
}
