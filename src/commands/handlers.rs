//! Command handlers.
//!
//! Each handler validates its arguments, calls into the book or one record,
//! and answers with text. Handlers never fail: every problem becomes a reply
//! for the user, and `changed` tells the caller whether the book needs saving.

use super::{help_table, Command};
use crate::domain::{FieldKind, FieldValue, PhoneNumber};
use crate::error::BookError;
use crate::models::{AddressBook, FieldUpdate, Record};
use crate::table::render_contacts;
use chrono::NaiveDate;
use tracing::debug;

/// What a handler needs besides its arguments.
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub book: &'a mut AddressBook,

    /// Reference date for birthday questions
    pub today: NaiveDate,

    /// Window used by `birthdays`
    pub birthday_window_days: u32,
}

/// A handler's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text for the user
    pub text: String,

    /// Whether the book was modified
    pub changed: bool,

    /// Whether the session should end
    pub exit: bool,
}

impl Reply {
    /// A reply that left the book as it was.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: false,
            exit: false,
        }
    }

    /// A reply after the book was modified.
    pub fn changed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: true,
            exit: false,
        }
    }

    fn exit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: false,
            exit: true,
        }
    }
}

const INVALID_PHONE: &str = "Invalid phone number. Please try again.";
const INVALID_EMAIL: &str = "Invalid email address. Please try again.";
const INVALID_BIRTHDAY: &str = "Invalid birthday format. Use DD.MM.YYYY";

/// Run `command` with its argument tokens.
pub fn dispatch(command: Command, args: &[&str], ctx: &mut CommandContext<'_>) -> Reply {
    debug!(?command, args = args.len(), "Dispatching command");
    match command {
        Command::Hello => Reply::info("Hello, how can I assist you today?"),
        Command::Add => add(args, ctx.book),
        Command::AddPhone => add_phone(args, ctx.book),
        Command::RemovePhone => remove_phone(args, ctx.book),
        Command::Change => change_phone(args, ctx.book),
        Command::Phone => show_phones(args, ctx.book),
        Command::Find => find(args, ctx.book),
        Command::All => all(ctx.book),
        Command::Delete => delete(args, ctx.book),
        Command::AddBirthday => add_birthday(args, ctx.book),
        Command::ShowBirthday => show_birthday(args, ctx.book),
        Command::Birthdays => birthdays_next(ctx),
        Command::BirthdaysInPeriod => birthdays_in_period(args, ctx),
        Command::AddAddress => set_address(command, args, ctx.book),
        Command::ChangeAddress => set_address(command, args, ctx.book),
        Command::AddEmail => set_email(command, args, ctx.book),
        Command::ChangeEmail => set_email(command, args, ctx.book),
        Command::ShowEmail => show_email(args, ctx.book),
        Command::ShowAddress => show_address(args, ctx.book),
        Command::AddNote => add_note(args, ctx.book),
        Command::EditNote => edit_note(args, ctx.book),
        Command::Note => show_notes(args, ctx.book),
        Command::DeleteNote => delete_note(args, ctx.book),
        Command::Help => Reply::info(help_table()),
        Command::Close => Reply::exit("Goodbye!"),
    }
}

fn usage(command: Command) -> Reply {
    Reply::info(format!("Invalid command usage: {}", command.usage()))
}

fn not_found(name: &str) -> Reply {
    Reply::info(format!("Contact {} not found", name))
}

/// Split `args` into a contact name and the trailing `rest` tokens.
///
/// Names may contain spaces, so the longest leading run of tokens that names
/// an existing contact wins, leaving at least `rest` tokens. When nothing
/// matches, the first token is taken as the (unknown) name.
fn split_name<'t>(book: &AddressBook, args: &'t [&'t str], rest: usize) -> (String, &'t [&'t str]) {
    let longest = args.len().saturating_sub(rest);
    for len in (1..=longest).rev() {
        let candidate = args[..len].join(" ");
        if book.find(&candidate).is_some() {
            return (candidate, &args[len..]);
        }
    }
    (args[0].to_string(), &args[1..])
}

fn add(args: &[&str], book: &mut AddressBook) -> Reply {
    let Some((phone, name_parts)) = args.split_last().filter(|(_, name)| !name.is_empty()) else {
        return usage(Command::Add);
    };
    let name = name_parts.join(" ");

    let mut record = match Record::new(&name) {
        Ok(record) => record,
        Err(e) => return Reply::info(e.to_string()),
    };
    if record.add_phone(phone).is_err() {
        return Reply::info(INVALID_PHONE);
    }

    match book.add(record) {
        Some(_) => Reply::changed(format!(
            "Contact {} added (replaced the existing contact with this name)",
            name
        )),
        None => Reply::changed(format!("Contact {} added", name)),
    }
}

fn add_phone(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::AddPhone);
    }
    let (name, rest) = split_name(book, args, 1);
    let [phone] = rest else {
        return usage(Command::AddPhone);
    };
    let Ok(phone) = FieldValue::construct(FieldKind::Phone, phone) else {
        return Reply::info(INVALID_PHONE);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    match record.apply(phone) {
        Ok(_) => Reply::changed(format!("Phone added for {}", name)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn remove_phone(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::RemovePhone);
    }
    let (name, rest) = split_name(book, args, 1);
    let [phone] = rest else {
        return usage(Command::RemovePhone);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    if record.find_phone(phone).is_none() {
        return Reply::info(format!("Contact {} has no phone {}", name, phone));
    }
    record.remove_phone(phone);
    Reply::changed(format!("Phone {} removed for {}", phone, name))
}

fn change_phone(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::Change);
    }
    let (name, rest) = split_name(book, args, 1);
    let [new_phone] = rest else {
        return usage(Command::Change);
    };
    let Ok(new_phone) = PhoneNumber::new(*new_phone) else {
        return Reply::info(INVALID_PHONE);
    };
    if book.find(&name).is_none() {
        return not_found(&name);
    }
    if book.change_primary_phone(&name, new_phone) {
        Reply::changed(format!("Phone number for {} changed", name))
    } else {
        Reply::info(format!("Contact {} has no phone number to change", name))
    }
}

fn show_phones(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::Phone);
    }
    let name = args.join(" ");
    match book.show_phones(&name) {
        Ok(phones) if phones.is_empty() => Reply::info(format!("Contact {} has no phones", name)),
        Ok(phones) => Reply::info(format!("Phones for {}: {}", name, phones)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn find(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::Find);
    }
    let query = args.join(" ");
    let matches = book.search(&query);
    if matches.is_empty() {
        Reply::info("No contacts found")
    } else {
        Reply::info(render_contacts(matches))
    }
}

fn all(book: &AddressBook) -> Reply {
    if book.is_empty() {
        Reply::info("Contacts were not added")
    } else {
        Reply::info(render_contacts(book.list_all()))
    }
}

fn delete(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::Delete);
    }
    let name = args.join(" ");
    match book.delete(&name) {
        Ok(_) => Reply::changed(format!("Contact {} deleted", name)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn add_birthday(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::AddBirthday);
    }
    let (name, rest) = split_name(book, args, 1);
    let [raw] = rest else {
        return usage(Command::AddBirthday);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let Ok(birthday) = FieldValue::construct(FieldKind::Birthday, raw) else {
        return Reply::info(INVALID_BIRTHDAY);
    };
    match record.apply(birthday) {
        Ok(_) => Reply::changed(format!("Birthday added for {}", name)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn show_birthday(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::ShowBirthday);
    }
    let name = args.join(" ");
    match book.find(&name) {
        Some(record) => match record.birthday() {
            Some(birthday) => Reply::info(format!("Birthday for {}: {}", name, birthday)),
            None => Reply::info(format!("Contact {} does not have a birthday", name)),
        },
        None => not_found(&name),
    }
}

fn format_upcoming(header: &str, upcoming: &[(&Record, i64)]) -> String {
    let mut text = format!("{}:", header);
    for (record, days_left) in upcoming {
        text.push_str(&format!("\n{}: {} days left", record.name(), days_left));
    }
    text
}

fn birthdays_next(ctx: &CommandContext<'_>) -> Reply {
    let days = ctx.birthday_window_days;
    let upcoming = ctx.book.upcoming_birthdays(ctx.today, days);
    if upcoming.is_empty() {
        Reply::info(format!("No birthdays within the next {} days.", days))
    } else {
        let header = format!("Upcoming birthdays within the next {} days", days);
        Reply::info(format_upcoming(&header, &upcoming))
    }
}

fn birthdays_in_period(args: &[&str], ctx: &CommandContext<'_>) -> Reply {
    let [days] = args else {
        return usage(Command::BirthdaysInPeriod);
    };
    let Ok(days) = days.parse::<u32>() else {
        return Reply::info("Invalid number of days");
    };
    let upcoming = ctx.book.upcoming_birthdays(ctx.today, days);
    if upcoming.is_empty() {
        Reply::info("No birthdays in the specified period.")
    } else {
        Reply::info(format_upcoming(
            "Upcoming birthdays in the specified period",
            &upcoming,
        ))
    }
}

fn set_address(command: Command, args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(command);
    }
    let (name, rest) = split_name(book, args, 1);
    let address = rest.join(" ");
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let field = match FieldValue::construct(FieldKind::Address, &address) {
        Ok(field) => field,
        Err(e) => return Reply::info(e.to_string()),
    };
    if let Err(e) = record.apply(field) {
        return Reply::info(e.to_string());
    }
    match command {
        Command::ChangeAddress => {
            Reply::changed(format!("Address for {} changed to {}", name, address))
        }
        _ => Reply::changed(format!("Address added for {}", name)),
    }
}

fn set_email(command: Command, args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(command);
    }
    let (name, rest) = split_name(book, args, 1);
    let [raw] = rest else {
        return usage(command);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let update = FieldValue::construct(FieldKind::Email, raw)
        .map_err(BookError::from)
        .and_then(|field| record.apply(field));
    match (update, command) {
        (Ok(FieldUpdate::Applied), Command::ChangeEmail) => {
            Reply::changed(format!("Email for {} changed", name))
        }
        (Ok(FieldUpdate::Applied), _) => Reply::changed(format!("Email added for {}", name)),
        (Ok(FieldUpdate::EmailRejected(_)), _) => Reply::info(INVALID_EMAIL),
        (Err(e), _) => Reply::info(e.to_string()),
    }
}

fn show_email(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::ShowEmail);
    }
    let name = args.join(" ");
    match book.show_email(&name) {
        Ok(email) => Reply::info(format!("Email for {}: {}", name, email)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn show_address(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::ShowAddress);
    }
    let name = args.join(" ");
    match book.show_address(&name) {
        Ok(address) => Reply::info(format!("Address for {}: {}", name, address)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn add_note(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::AddNote);
    }
    let (name, rest) = split_name(book, args, 1);
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let note = match FieldValue::construct(FieldKind::Note, &rest.join(" ")) {
        Ok(note) => note,
        Err(e) => return Reply::info(e.to_string()),
    };
    match record.apply(note) {
        Ok(_) => Reply::changed(format!("Note added for {}", name)),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn edit_note(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 3 {
        return usage(Command::EditNote);
    }
    let (name, rest) = split_name(book, args, 2);
    let Some((index, words)) = rest.split_first().filter(|(_, words)| !words.is_empty()) else {
        return usage(Command::EditNote);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let Ok(index) = index.parse::<i64>() else {
        return Reply::info(format!("Invalid note index for contact {}", name));
    };
    match record.edit_note(index, &words.join(" ")) {
        Ok(()) => Reply::changed(format!("Note edited for {}", name)),
        Err(BookError::InvalidNoteIndex { .. }) => {
            Reply::info(format!("Invalid note index for contact {}", name))
        }
        Err(e) => Reply::info(e.to_string()),
    }
}

fn show_notes(args: &[&str], book: &AddressBook) -> Reply {
    if args.is_empty() {
        return usage(Command::Note);
    }
    let name = args.join(" ");
    match book.show_notes(&name) {
        Ok(notes) => Reply::info(notes),
        Err(e) => Reply::info(e.to_string()),
    }
}

fn delete_note(args: &[&str], book: &mut AddressBook) -> Reply {
    if args.len() < 2 {
        return usage(Command::DeleteNote);
    }
    let (name, rest) = split_name(book, args, 1);
    let [index] = rest else {
        return usage(Command::DeleteNote);
    };
    let Some(record) = book.find_mut(&name) else {
        return not_found(&name);
    };
    let Ok(index) = index.parse::<i64>() else {
        return Reply::info(format!("Invalid note index for contact {}", name));
    };
    match record.remove_note(index) {
        Ok(_) => Reply::changed(format!("Note deleted for {}", name)),
        Err(_) => Reply::info(format!("Invalid note index for contact {}", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(book: &mut AddressBook, line: &str) -> Reply {
        let parsed = super::super::parse_line(line).unwrap();
        let command = Command::from_word(parsed.word).unwrap();
        let mut ctx = CommandContext {
            book,
            today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            birthday_window_days: 7,
        };
        dispatch(command, &parsed.args, &mut ctx)
    }

    fn book_with_ann() -> AddressBook {
        let mut book = AddressBook::new();
        run(&mut book, "add Ann 1234567890");
        book
    }

    #[test]
    fn test_add_contact() {
        let mut book = AddressBook::new();
        let reply = run(&mut book, "add Ann 1234567890");
        assert_eq!(reply, Reply::changed("Contact Ann added"));
        assert_eq!(book.find("Ann").unwrap().phones().len(), 1);
    }

    #[test]
    fn test_add_multi_word_name() {
        let mut book = AddressBook::new();
        run(&mut book, "add Ann Marie Lee 1234567890");
        assert!(book.find("Ann Marie Lee").is_some());

        let reply = run(&mut book, "add-email Ann Marie Lee ann@example.com");
        assert_eq!(reply.text, "Email added for Ann Marie Lee");
    }

    #[test]
    fn test_add_with_invalid_phone_creates_nothing() {
        let mut book = AddressBook::new();
        let reply = run(&mut book, "add Ann 12345");
        assert_eq!(reply, Reply::info(INVALID_PHONE));
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_usage() {
        let mut book = AddressBook::new();
        let reply = run(&mut book, "add 1234567890");
        assert_eq!(reply.text, "Invalid command usage: add <name> <phone>");
        assert!(!reply.changed);
    }

    #[test]
    fn test_add_twice_replaces() {
        let mut book = book_with_ann();
        let reply = run(&mut book, "add Ann 0987654321");
        assert!(reply.changed);
        assert!(reply.text.contains("replaced"));
        assert_eq!(book.len(), 1);
        assert_eq!(book.find("Ann").unwrap().phones_as_text(), "0987654321");
    }

    #[test]
    fn test_change_phone() {
        let mut book = book_with_ann();
        assert_eq!(
            run(&mut book, "change Ann 0987654321"),
            Reply::changed("Phone number for Ann changed")
        );
        assert_eq!(run(&mut book, "change Ann 12").text, INVALID_PHONE);
        assert_eq!(run(&mut book, "change Bob 0987654321").text, "Contact Bob not found");
    }

    #[test]
    fn test_add_and_remove_phone() {
        let mut book = book_with_ann();
        assert!(run(&mut book, "add-phone Ann 0987654321").changed);
        assert_eq!(
            run(&mut book, "phone Ann").text,
            "Phones for Ann: 1234567890; 0987654321"
        );

        assert!(run(&mut book, "remove-phone Ann 1234567890").changed);
        let reply = run(&mut book, "remove-phone Ann 1234567890");
        assert!(!reply.changed);
        assert_eq!(reply.text, "Contact Ann has no phone 1234567890");
    }

    #[test]
    fn test_find_renders_table_or_message() {
        let mut book = book_with_ann();
        let reply = run(&mut book, "find an");
        assert!(reply.text.contains("│ Ann "));
        assert!(!reply.changed);

        assert_eq!(run(&mut book, "find zed").text, "No contacts found");
    }

    #[test]
    fn test_all_on_empty_book() {
        let mut book = AddressBook::new();
        assert_eq!(run(&mut book, "all").text, "Contacts were not added");
    }

    #[test]
    fn test_delete() {
        let mut book = book_with_ann();
        assert_eq!(run(&mut book, "delete Ann"), Reply::changed("Contact Ann deleted"));
        assert_eq!(run(&mut book, "delete Ann"), Reply::info("Contact Ann not found"));
    }

    #[test]
    fn test_birthday_commands() {
        let mut book = book_with_ann();
        assert_eq!(
            run(&mut book, "add-birthday Ann 2000-01-01").text,
            INVALID_BIRTHDAY
        );
        assert!(run(&mut book, "add-birthday Ann 21.10.1990").changed);
        assert_eq!(
            run(&mut book, "show-birthday Ann").text,
            "Birthday for Ann: 21.10.1990"
        );
        assert_eq!(
            run(&mut book, "birthdays").text,
            "Upcoming birthdays within the next 7 days:\nAnn: 2 days left"
        );
        assert_eq!(
            run(&mut book, "birthdays-in-period 1").text,
            "No birthdays in the specified period."
        );
        assert_eq!(
            run(&mut book, "birthdays-in-period 2").text,
            "Upcoming birthdays in the specified period:\nAnn: 2 days left"
        );
        assert_eq!(
            run(&mut book, "birthdays-in-period soon").text,
            "Invalid number of days"
        );
    }

    #[test]
    fn test_email_commands() {
        let mut book = book_with_ann();
        assert_eq!(run(&mut book, "show-email Ann").text, "Email for Ann: No email");

        let reply = run(&mut book, "add-email Ann not-an-email");
        assert_eq!(reply, Reply::info(INVALID_EMAIL));

        assert!(run(&mut book, "add-email Ann ann@example.com").changed);
        let reply = run(&mut book, "change-email Ann broken");
        assert!(!reply.changed);
        assert_eq!(
            run(&mut book, "show-email Ann").text,
            "Email for Ann: ann@example.com"
        );
        assert_eq!(
            run(&mut book, "change-email Ann ann@work.org").text,
            "Email for Ann changed"
        );
    }

    #[test]
    fn test_address_commands() {
        let mut book = book_with_ann();
        assert_eq!(
            run(&mut book, "add-address Ann Kyiv, Khreshchatyk 1").text,
            "Address added for Ann"
        );
        assert_eq!(
            run(&mut book, "show-address Ann").text,
            "Address for Ann: Kyiv, Khreshchatyk 1"
        );
        assert_eq!(
            run(&mut book, "change_address Ann Lviv").text,
            "Address for Ann changed to Lviv"
        );
    }

    #[test]
    fn test_note_commands() {
        let mut book = book_with_ann();
        assert_eq!(
            run(&mut book, "note Ann").text,
            "No notes found for this contact"
        );
        assert!(run(&mut book, "add-note Ann likes green tea").changed);
        assert!(run(&mut book, "add-note Ann birthday gift ideas").changed);
        assert_eq!(
            run(&mut book, "note Ann").text,
            "likes green tea; birthday gift ideas"
        );

        assert_eq!(
            run(&mut book, "edit-note Ann 0 likes black tea").text,
            "Note edited for Ann"
        );
        let reply = run(&mut book, "edit-note Ann 2 nope");
        assert_eq!(reply, Reply::info("Invalid note index for contact Ann"));
        let reply = run(&mut book, "edit-note Ann -1 nope");
        assert!(!reply.changed);

        assert!(run(&mut book, "delete-note Ann 1").changed);
        assert_eq!(run(&mut book, "note Ann").text, "likes black tea");
        assert!(!run(&mut book, "delete-note Ann x").changed);
    }

    #[test]
    fn test_note_for_missing_contact() {
        let mut book = AddressBook::new();
        assert_eq!(
            run(&mut book, "add-note Ghost hello").text,
            "Contact Ghost not found"
        );
        assert_eq!(run(&mut book, "note Ghost").text, "Contact Ghost not found");
    }

    #[test]
    fn test_close_ends_session() {
        let mut book = AddressBook::new();
        let reply = run(&mut book, "exit");
        assert!(reply.exit);
        assert!(!reply.changed);
    }

    #[test]
    fn test_split_name_prefers_longest_known_name() {
        let mut book = AddressBook::new();
        book.add(Record::new("Ann").unwrap());
        book.add(Record::new("Ann Lee").unwrap());

        let args = ["Ann", "Lee", "note", "text"];
        let (name, rest) = split_name(&book, &args, 1);
        assert_eq!(name, "Ann Lee");
        assert_eq!(rest, ["note", "text"]);

        let args = ["Bob", "x"];
        let (name, rest) = split_name(&book, &args, 1);
        assert_eq!(name, "Bob");
        assert_eq!(rest, ["x"]);
    }
}
