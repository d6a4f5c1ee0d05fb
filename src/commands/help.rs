//! Help text.

use super::Command;
use crate::table::render_table;

/// The command list as a two-column table.
pub fn help_table() -> String {
    let rows: Vec<Vec<&str>> = Command::ALL
        .iter()
        .map(|command| vec![command.usage(), command.description()])
        .collect();
    format!("Available commands:\n{}", render_table(&rows, false))
}
