//! gtd - Getting Things Done over a directory of markdown notes
//!
//! # Layout
//!
//! | Directory | Purpose |
//! |-----------|---------|
//! | `in/` | Inbox: anything captured but not yet processed |
//! | `next_actions/` | Concrete next steps |
//! | `calendar/` | Dated tasks, optionally recurring |
//! | `reference/browser_bookmarks.toml` | Bookmarks |
//!
//! # Calendar notes
//!
//! ```text
//! ---
//! title: Pay rent
//! date: 01.03.2024
//! period: 1m
//! ---
//! ```
//!
//! Completing a note with a `period` moves its `date` forward in place.
//!
//! ```no_run
//! use gtd::{calendar, Config};
//!
//! let config = Config::load(None);
//! let entries = calendar::sort_by_date(calendar::scan(&config.calendar_dir).unwrap());
//! for entry in &entries {
//!     println!("{}", entry);
//! }
//! ```

pub mod bookmarks;
pub mod calendar;
pub mod config;
pub mod external;
pub mod notes;
pub mod picker;

pub use calendar::{CalendarEntry, CalendarError, ParseError, Recurrence, Unit};
pub use config::Config;
pub use picker::{Picker, RofiPicker, TerminalPicker};
