//! Guest import - Header-driven mapping of a CSV file onto guests

use super::parse_records;
use crate::dtos::{CreateGuestDTO, blank_to_none};
use crate::entities::{Guest, GuestCategory};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FirstName,
    LastName,
    Phone,
    Email,
    Category,
    Code,
    Adults,
    Children,
    Ignored,
}

/// Header fragments, tried in this order: the first fragment contained in
/// the lower-cased header wins ("prénom" must be tried before "nom").
const HEADER_FRAGMENTS: &[(Column, &[&str])] = &[
    (Column::FirstName, &["prénom", "prenom", "first_name", "first name", "firstname"]),
    (Column::LastName, &["nom", "last_name", "last name", "lastname", "surname"]),
    (Column::Phone, &["phone", "téléphone", "telephone"]),
    (Column::Email, &["email"]),
    (Column::Category, &["catégorie", "categorie", "category"]),
    (Column::Code, &["code"]),
    (Column::Adults, &["adulte", "adult"]),
    (Column::Children, &["enfant", "child"]),
];

/// Same bound as a guest created through the API
const MAX_HEADCOUNT: i32 = 20;

fn classify(header: &str) -> Column {
    let header = header.trim().to_lowercase();
    HEADER_FRAGMENTS
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|f| header.contains(f)))
        .map(|(column, _)| *column)
        .unwrap_or(Column::Ignored)
}

#[derive(Debug, Default)]
pub struct ParsedImport {
    pub guests: Vec<CreateGuestDTO>,
    /// Rows dropped because the first or the last name was missing
    pub skipped: usize,
}

/// Maps the rows of `text` onto new guests.
///
/// Rows without both names are skipped. A row without a code gets the next
/// sequential one: the counter starts at `existing_guests` and advances once
/// per accepted row, whether or not that row carried its own code.
pub fn parse_guests(text: &str, code_prefix: &str, existing_guests: i64) -> ParsedImport {
    let mut records = parse_records(text)
        .into_iter()
        .filter(|r| r.iter().any(|f| !f.trim().is_empty()));

    let Some(header) = records.next() else {
        return ParsedImport::default();
    };
    let columns: Vec<Column> = header.iter().map(|h| classify(h)).collect();
    debug!(?columns, "CSV header mapped");

    let mut parsed = ParsedImport::default();
    let mut counter = existing_guests;

    for record in records {
        let mut first_name = None;
        let mut last_name = None;
        let mut phone = None;
        let mut email = None;
        let mut category = GuestCategory::default();
        let mut code = None;
        let mut num_adults = 1;
        let mut num_children = 0;

        for (column, value) in columns.iter().zip(record.iter()) {
            let value = value.trim();
            match column {
                Column::FirstName => first_name = blank_to_none(value),
                Column::LastName => last_name = blank_to_none(value),
                Column::Phone => phone = blank_to_none(value),
                Column::Email => email = blank_to_none(value),
                Column::Category => category = GuestCategory::parse_lenient(value),
                Column::Code => code = blank_to_none(value),
                Column::Adults => num_adults = value.parse::<i32>().unwrap_or(1).clamp(1, MAX_HEADCOUNT),
                Column::Children => num_children = value.parse::<i32>().unwrap_or(0).clamp(0, MAX_HEADCOUNT),
                Column::Ignored => {}
            }
        }

        let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
            parsed.skipped += 1;
            continue;
        };

        counter += 1;
        let invitation_code = code.unwrap_or_else(|| Guest::sequential_code(code_prefix, counter));

        parsed.guests.push(CreateGuestDTO {
            invitation_code,
            first_name,
            last_name,
            phone,
            email,
            category,
            num_adults,
            num_children,
        });
    }

    parsed
}
