//! Line commands for the address book.
//!
//! This module turns one input line into a [`Command`] plus argument tokens
//! and runs it against an [`AddressBook`](crate::models::AddressBook):
//! - **Contacts**: add, change, delete, list and search contacts
//! - **Details**: phones, email, address and birthday of one contact
//! - **Notes**: add, edit, show and delete notes
//! - **Birthdays**: upcoming birthdays in a window of days

pub mod handlers;
pub mod help;

pub use handlers::{dispatch, CommandContext, Reply};
pub use help::help_table;

/// Every command the assistant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Hello,
    Add,
    AddPhone,
    RemovePhone,
    Change,
    Phone,
    Find,
    All,
    Delete,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    BirthdaysInPeriod,
    AddAddress,
    ChangeAddress,
    AddEmail,
    ChangeEmail,
    ShowEmail,
    ShowAddress,
    AddNote,
    EditNote,
    Note,
    DeleteNote,
    Help,
    Close,
}

impl Command {
    /// All commands in help order.
    pub const ALL: [Command; 25] = [
        Self::All,
        Self::Add,
        Self::AddPhone,
        Self::RemovePhone,
        Self::Change,
        Self::Phone,
        Self::Find,
        Self::Delete,
        Self::AddBirthday,
        Self::ShowBirthday,
        Self::BirthdaysInPeriod,
        Self::Birthdays,
        Self::AddAddress,
        Self::ChangeAddress,
        Self::AddEmail,
        Self::ChangeEmail,
        Self::ShowEmail,
        Self::ShowAddress,
        Self::AddNote,
        Self::EditNote,
        Self::Note,
        Self::DeleteNote,
        Self::Hello,
        Self::Help,
        Self::Close,
    ];

    /// Look up a command word. Matching ignores case, and `_` may stand in
    /// for `-` (`add_email` is `add-email`).
    pub fn from_word(word: &str) -> Option<Self> {
        let word = word.to_lowercase().replace('_', "-");
        let command = match word.as_str() {
            "hello" => Self::Hello,
            "add" => Self::Add,
            "add-phone" => Self::AddPhone,
            "remove-phone" => Self::RemovePhone,
            "change" => Self::Change,
            "phone" => Self::Phone,
            "find" | "search" => Self::Find,
            "all" => Self::All,
            "delete" => Self::Delete,
            "add-birthday" => Self::AddBirthday,
            "show-birthday" => Self::ShowBirthday,
            "birthdays" => Self::Birthdays,
            "birthdays-in-period" => Self::BirthdaysInPeriod,
            "add-address" => Self::AddAddress,
            "change-address" => Self::ChangeAddress,
            "add-email" => Self::AddEmail,
            "change-email" => Self::ChangeEmail,
            "show-email" => Self::ShowEmail,
            "show-address" => Self::ShowAddress,
            "add-note" => Self::AddNote,
            "edit-note" => Self::EditNote,
            "note" | "notes" => Self::Note,
            "delete-note" => Self::DeleteNote,
            "help" => Self::Help,
            "close" | "exit" => Self::Close,
            _ => return None,
        };
        Some(command)
    }

    /// Whether a successful run changes the book and must be persisted.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::AddPhone
                | Self::RemovePhone
                | Self::Change
                | Self::Delete
                | Self::AddBirthday
                | Self::AddAddress
                | Self::ChangeAddress
                | Self::AddEmail
                | Self::ChangeEmail
                | Self::AddNote
                | Self::EditNote
                | Self::DeleteNote
        )
    }

    pub fn usage(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Add => "add <name> <phone>",
            Self::AddPhone => "add-phone <name> <phone>",
            Self::RemovePhone => "remove-phone <name> <phone>",
            Self::Change => "change <name> <new_phone>",
            Self::Phone => "phone <name>",
            Self::Find => "find <query>",
            Self::All => "all",
            Self::Delete => "delete <name>",
            Self::AddBirthday => "add-birthday <name> <birthday>",
            Self::ShowBirthday => "show-birthday <name>",
            Self::Birthdays => "birthdays",
            Self::BirthdaysInPeriod => "birthdays-in-period <days>",
            Self::AddAddress => "add-address <name> <address>",
            Self::ChangeAddress => "change-address <name> <new_address>",
            Self::AddEmail => "add-email <name> <email>",
            Self::ChangeEmail => "change-email <name> <new_email>",
            Self::ShowEmail => "show-email <name>",
            Self::ShowAddress => "show-address <name>",
            Self::AddNote => "add-note <name> <note>",
            Self::EditNote => "edit-note <name> <note_index> <new_note>",
            Self::Note => "note <name>",
            Self::DeleteNote => "delete-note <name> <index>",
            Self::Help => "help",
            Self::Close => "close | exit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Hello => "Say hello.",
            Self::Add => "Add a new contact.",
            Self::AddPhone => "Add another phone number to a contact.",
            Self::RemovePhone => "Remove a phone number from a contact.",
            Self::Change => "Change the phone number for a contact.",
            Self::Phone => "Show the phone numbers of a contact.",
            Self::Find => "Search for a contact by name or phone number.",
            Self::All => "Show all contacts.",
            Self::Delete => "Delete a contact.",
            Self::AddBirthday => "Add birthday for a contact (DD.MM.YYYY).",
            Self::ShowBirthday => "Show the birthday for a contact.",
            Self::Birthdays => "Show birthdays within the configured window (7 days by default).",
            Self::BirthdaysInPeriod => "Show upcoming birthdays in the specified period.",
            Self::AddAddress => "Add an address for a contact.",
            Self::ChangeAddress => "Change the address for a contact.",
            Self::AddEmail => "Add an email for a contact.",
            Self::ChangeEmail => "Change the email for a contact.",
            Self::ShowEmail => "Show the email for a contact.",
            Self::ShowAddress => "Show the address for a contact.",
            Self::AddNote => "Add a note for a contact.",
            Self::EditNote => "Edit a note for a contact.",
            Self::Note => "Show all notes for a contact.",
            Self::DeleteNote => "Delete a note for a contact.",
            Self::Help => "Show available commands.",
            Self::Close => "Close the application.",
        }
    }
}

/// A line split into its command word and argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// The command word as typed
    pub word: &'a str,

    /// Remaining whitespace-separated tokens
    pub args: Vec<&'a str>,
}

/// Split a line on whitespace. `None` for a blank line.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut tokens = line.split_whitespace();
    let word = tokens.next()?;
    Some(ParsedLine {
        word,
        args: tokens.collect(),
    })
}
