#![allow(dead_code)]

use axum_test::TestServer;
use rsvp_server::core::database::connect_in_memory;
use rsvp_server::core::{AppState, encode_jwt};
use rsvp_server::dtos::{CreateGuestDTO, CreateUserDTO};
use rsvp_server::entities::{Guest, GuestCategory, User};
use rsvp_server::repositories::Create;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "mariage2026";

/// Crea un AppState per i test, su un database in memoria nuovo
pub async fn create_test_state() -> Arc<AppState> {
    let pool = connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()))
}

/// Come `create_test_state`, con un prefisso diverso per i codici generati
pub async fn create_test_state_with_prefix(prefix: &str) -> Arc<AppState> {
    let pool = connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()).with_code_prefix(prefix))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = rsvp_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_account(state: &AppState, email: &str, password: &str, admin: bool) -> User {
    // low cost keeps the tests fast
    let hashed = bcrypt::hash(password, 4).expect("Failed to hash password");
    if admin {
        state
            .user
            .ensure_admin(email, &hashed)
            .await
            .expect("Failed to create admin")
    } else {
        state
            .user
            .create(&CreateUserDTO {
                email: email.to_string(),
                password: hashed,
            })
            .await
            .expect("Failed to create user")
    }
}

/// Creates the admin account and returns a valid token for it
pub async fn admin_token(state: &AppState) -> String {
    let admin = create_account(state, ADMIN_EMAIL, ADMIN_PASSWORD, true).await;
    encode_jwt(admin.email, admin.user_id, JWT_SECRET).expect("Failed to create JWT token")
}

/// Creates a regular (non-admin) account and returns a valid token for it
pub async fn user_token(state: &AppState, email: &str) -> String {
    let user = create_account(state, email, "password123", false).await;
    encode_jwt(user.email, user.user_id, JWT_SECRET).expect("Failed to create JWT token")
}

pub async fn seed_guest(state: &AppState, code: &str, first_name: &str, last_name: &str) -> Guest {
    state
        .guest
        .create(&CreateGuestDTO {
            invitation_code: code.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: None,
            email: None,
            category: GuestCategory::Family,
            num_adults: 2,
            num_children: 0,
        })
        .await
        .expect("Failed to seed guest")
}
