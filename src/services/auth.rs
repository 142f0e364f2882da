//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::auth::{TOKEN_COOKIE, TOKEN_TTL_HOURS};
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{CreateUserDTO, LoginDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Look the account up by email; unknown email → UNAUTHORIZED
    // 2. Verify the password against the stored bcrypt hash → UNAUTHORIZED if it does not match
    // 3. Sign a JWT with user id and email
    // 4. Return it both as HttpOnly cookie and as Authorization header, body = the user

    let user = match state.user.find_by_email(&body.email.trim().to_lowercase()).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password");
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let token = encode_jwt(user.email.clone(), user.user_id, &state.jwt_secret)?;

    let cookie_value = format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        TOKEN_COOKIE,
        token,
        TOKEN_TTL_HOURS * 60 * 60
    );

    let invalid_header = |_| AppError::internal_server_error("Failed to build auth headers");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie_value).map_err(invalid_header)?,
    );
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).map_err(invalid_header)?,
    );

    info!(user_id = user.user_id, "User logged in");
    Ok((StatusCode::OK, headers, Json(UserDTO::from(user))))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>,
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    // 1. Validate email format and password length
    // 2. Reject an email already registered with CONFLICT
    // 3. Hash the password and store a non-admin account

    let body = CreateUserDTO {
        email: body.email.trim().to_lowercase(),
        password: body.password,
    };
    body.validate()?;

    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let created_user = state
        .user
        .create(&CreateUserDTO {
            email: body.email,
            password: password_hash,
        })
        .await?;

    info!(user_id = created_user.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}
