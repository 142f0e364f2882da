//! User DTOs - Data Transfer Objects for console accounts

use crate::entities::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        // the password hash never leaves the server
        Self {
            id: value.user_id,
            email: value.email,
            is_admin: value.is_admin,
        }
    }
}

/// DTO to create an account (without user_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Sign-in body
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
}
