//! CSV exports of the admin lists

use super::push_record;
use crate::dtos::GuestWithRsvpDTO;
use crate::entities::{Guest, GuestbookMessage};
use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%d/%m/%Y";

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Guest directory export. The header is the one `parse_guests` recognizes,
/// so an export can be imported back.
pub fn guests_csv(guests: &[Guest]) -> String {
    let mut out = String::new();
    push_record(
        &mut out,
        &["Code", "Prénom", "Nom", "Téléphone", "Email", "Catégorie", "Adultes", "Enfants"],
    );

    for guest in guests {
        push_record(
            &mut out,
            &[
                guest.invitation_code.clone(),
                guest.first_name.clone(),
                guest.last_name.clone(),
                guest.phone.clone().unwrap_or_default(),
                guest.email.clone().unwrap_or_default(),
                guest.category.as_str().to_string(),
                guest.num_adults.to_string(),
                guest.num_children.to_string(),
            ],
        );
    }

    out.push('\n');
    out
}

/// RSVP tracking export: one row per guest, pending guests with empty
/// headcount, remarks and date.
pub fn rsvp_csv(rows: &[GuestWithRsvpDTO]) -> String {
    let mut out = String::new();
    push_record(
        &mut out,
        &["Code", "Nom", "Catégorie", "Statut", "Adultes", "Enfants", "Remarques", "Date réponse"],
    );

    for row in rows {
        let guest = &row.guest;
        let (adults, children, remarks, date) = match &row.rsvp {
            Some(rsvp) => (
                rsvp.num_adults.to_string(),
                rsvp.num_children.to_string(),
                rsvp.remarks.clone().unwrap_or_default(),
                format_date(&rsvp.responded_at),
            ),
            None => Default::default(),
        };

        push_record(
            &mut out,
            &[
                guest.invitation_code.clone(),
                format!("{} {}", guest.first_name, guest.last_name),
                guest.category.as_str().to_string(),
                row.status.label().to_string(),
                adults,
                children,
                remarks,
                date,
            ],
        );
    }

    out.push('\n');
    out
}

pub fn guestbook_csv(messages: &[GuestbookMessage]) -> String {
    let mut out = String::new();
    push_record(&mut out, &["Auteur", "Message", "Statut", "Date"]);

    for message in messages {
        let status = if message.is_approved { "Approuvé" } else { "En attente" };
        push_record(
            &mut out,
            &[
                message.author_name.clone(),
                message.message.clone(),
                status.to_string(),
                format_date(&message.created_at),
            ],
        );
    }

    out.push('\n');
    out
}
