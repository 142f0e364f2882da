//! CSV Module - Comma separated import/export of the admin lists
//!
//! Fields are separated by `,`, records by `\n` (`\r\n` accepted on input).
//! A field containing a comma, a double quote or a line break is written
//! between double quotes, inner quotes doubled.

pub mod export;
pub mod import;

pub use export::{guestbook_csv, guests_csv, rsvp_csv};
pub use import::{ParsedImport, parse_guests};

use std::borrow::Cow;

/// Quotes `field` only when needed
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Appends one record (without trailing newline handling: the caller joins)
pub(crate) fn push_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    if !out.is_empty() {
        out.push('\n');
    }
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
}

/// Splits `text` into records of raw (untrimmed) fields. Quoted fields may
/// contain commas, doubled quotes and line breaks.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
