//! Guest DTOs - Data Transfer Objects for the guest directory

use crate::entities::{Guest, GuestCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GuestDTO {
    pub guest_id: i64,
    pub invitation_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: GuestCategory,
    pub num_adults: i32,
    pub num_children: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Guest> for GuestDTO {
    fn from(value: Guest) -> Self {
        Self {
            guest_id: value.guest_id,
            invitation_code: value.invitation_code,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            email: value.email,
            category: value.category,
            num_adults: value.num_adults,
            num_children: value.num_children,
            created_at: value.created_at,
        }
    }
}

/// DTO to insert a guest (without guest_id); the invitation code is already resolved
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateGuestDTO {
    pub invitation_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: GuestCategory,
    pub num_adults: i32,
    pub num_children: i32,
}

/// Partial update: every field but the invitation code
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateGuestDTO {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: Option<String>,

    /// `Some("")` clears the phone number
    #[validate(length(max = 40))]
    pub phone: Option<String>,

    /// `Some("")` clears the email
    #[validate(length(max = 254))]
    pub email: Option<String>,

    pub category: Option<GuestCategory>,

    #[validate(range(min = 1, max = 20, message = "Adults must be between 1 and 20"))]
    pub num_adults: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Children must be between 0 and 20"))]
    pub num_children: Option<i32>,
}

impl UpdateGuestDTO {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.category.is_none()
            && self.num_adults.is_none()
            && self.num_children.is_none()
    }
}

/// Query parameters of the guest list: /admin/guests?search=dupont
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GuestSearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Outcome of a CSV import
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImportReportDTO {
    pub imported: usize,
    pub skipped: usize,
    pub guests: Vec<GuestDTO>,
}
