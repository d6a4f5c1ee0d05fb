//! One interactive session over an address book.
//!
//! A session owns the book for its lifetime: it loads it once from a
//! [`BookStore`], runs one command per input line, and saves the whole book
//! after every command that changed it.

use crate::commands::{dispatch, parse_line, Command, CommandContext};
use crate::config::Config;
use crate::error::StorageResult;
use crate::models::AddressBook;
use crate::storage::BookStore;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const UNKNOWN_COMMAND: &str = "Unknown command. Type 'help' for the list of commands.";

/// What the user sees after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReply {
    /// Text to print; empty for a blank line
    pub text: String,

    /// Whether the session is over
    pub exit: bool,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct Session {
    book: AddressBook,
    store: Arc<dyn BookStore>,
    clock: fn() -> NaiveDate,
    birthday_window_days: u32,

    /// In-memory changes not yet written to the store
    dirty: bool,
}

impl Session {
    /// Load the book from `store` and start a session.
    ///
    /// A book that cannot be loaded is logged and replaced by an empty one;
    /// the next save overwrites the unreadable data.
    pub async fn open(store: Arc<dyn BookStore>, config: &Config) -> Self {
        let book = match store.load().await {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, "Could not load address book, starting empty");
                AddressBook::new()
            }
        };
        info!(contacts = book.len(), "Session opened");

        Self {
            book,
            store,
            clock: local_today,
            birthday_window_days: config.birthday_window_days,
            dirty: false,
        }
    }

    /// Use `clock` instead of the local date for birthday questions.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Whether the book has changes the store has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the book if an earlier save failed.
    ///
    /// Called before the session ends so that a change kept only in memory
    /// still reaches the store.
    pub async fn flush(&mut self) -> StorageResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.save().await
    }

    async fn save(&mut self) -> StorageResult<()> {
        match self.store.save(&self.book).await {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }

    /// Run one input line.
    ///
    /// Save failures are reported after the command's own reply but do not
    /// end the session; the change stays in memory and is retried on the
    /// next save, or by `close` through [`flush`](Self::flush).
    pub async fn execute(&mut self, line: &str) -> SessionReply {
        let Some(parsed) = parse_line(line) else {
            return SessionReply {
                text: String::new(),
                exit: false,
            };
        };
        let Some(command) = Command::from_word(parsed.word) else {
            debug!(word = parsed.word, "Unknown command");
            return SessionReply {
                text: UNKNOWN_COMMAND.to_string(),
                exit: false,
            };
        };

        let mut ctx = CommandContext {
            book: &mut self.book,
            today: (self.clock)(),
            birthday_window_days: self.birthday_window_days,
        };
        let reply = dispatch(command, &parsed.args, &mut ctx);
        let mut text = reply.text;

        let result = if reply.changed && command.is_mutating() {
            self.save().await
        } else if reply.exit {
            self.flush().await
        } else {
            Ok(())
        };
        if let Err(e) = result {
            error!(error = %e, ?command, "Failed to save address book");
            text.push_str(&format!("\nFailed to save the address book: {}", e));
        }

        SessionReply {
            text,
            exit: reply.exit,
        }
    }
}
