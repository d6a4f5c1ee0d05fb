//! Boxed text tables.
//!
//! ```text
//! ┌──────┬────────────┐
//! │ Name │ Phone      │
//! ├──────┼────────────┤
//! │ Ann  │ 1234567890 │
//! └──────┴────────────┘
//! ```

use crate::models::Record;

/// Header row of the contacts table.
pub const CONTACT_HEADERS: [&str; 5] = ["Name", "Phone Numbers", "Birthday", "Address", "Email"];

/// Render `rows` as a box-drawn table, one line per row plus borders.
///
/// Columns are as wide as their widest cell, counted in characters. Short
/// rows are padded with empty cells. With `line_between_rows` a separator is
/// drawn between every pair of rows.
pub fn render_table<S: AsRef<str>>(rows: &[Vec<S>], line_between_rows: bool) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(AsRef::<str>::as_ref(cell).chars().count());
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    };

    let mut lines = vec![border('┌', '┬', '┐')];
    for (index, cells) in rows.iter().enumerate() {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let text: &str = cells.get(i).map_or("", AsRef::<str>::as_ref);
                let fill = width - text.chars().count();
                format!("{}{}", text, " ".repeat(fill))
            })
            .collect();
        lines.push(format!("│ {} │", padded.join(" │ ")));

        if line_between_rows && index + 1 < rows.len() {
            lines.push(border('├', '┼', '┤'));
        }
    }
    lines.push(border('└', '┴', '┘'));

    lines.join("\n")
}

/// One table row per contact; absent fields are empty cells.
pub fn contact_rows<'a, I>(records: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut rows = vec![CONTACT_HEADERS.iter().map(|h| h.to_string()).collect()];
    rows.extend(records.into_iter().map(|record| {
        vec![
            record.name().to_string(),
            record.phones_as_text(),
            record.birthday().map(|b| b.to_string()).unwrap_or_default(),
            record.address().unwrap_or_default().to_string(),
            record.email().map(|e| e.to_string()).unwrap_or_default(),
        ]
    }));
    rows
}

/// Render contacts as a table with a header row.
pub fn render_contacts<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    render_table(&contact_rows(records), true)
}
