use crate::core::{AppError, AppState};
use crate::entities::User;
use crate::repositories::Read;
use axum::extract::State;
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Name of the cookie set at login, read back when no Authorization header is sent
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of a token, in hours
pub const TOKEN_TTL_HOURS: i64 = 24;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub email: String,
}

#[instrument(skip(secret), fields(email = %email, id = %id))]
pub fn encode_jwt(email: String, id: i64, secret: &str) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(TOKEN_TTL_HOURS);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims { iat, exp, email, id };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        debug!("JWT token decoded for user {}", data.claims.id);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Token from `Authorization: Bearer <token>`, or else from the `token` cookie
fn extract_token(req: &Request) -> Option<String> {
    let headers = req.headers();

    if let Some(value) = headers.get(http::header::AUTHORIZATION) {
        let mut parts = value.to_str().ok()?.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
                Some(token.to_string())
            }
            _ => None,
        };
    }

    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, token)| token.to_string())
}

/// Rejects requests without a valid token and stores the signed-in `User`
/// in the request extensions.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");

    let token = extract_token(&req).ok_or_else(|| {
        warn!("Missing or malformed credentials");
        AppError::unauthorized("Please add the JWT token to the header")
    })?;

    let token_data = decode_jwt(&token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    // The account may have been removed since the token was issued
    let current_user = match state.user.read(&token_data.claims.id).await? {
        Some(user) => user,
        None => {
            warn!("User not found in database: {}", token_data.claims.id);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };

    debug!("User authenticated: {}", current_user.email);
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Lets through only admins. Runs after `authentication_middleware`.
#[instrument(skip(req, next))]
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response<Body>, AppError> {
    let current_user = req.extensions().get::<User>().ok_or_else(|| {
        warn!("User not found in request extensions");
        AppError::unauthorized("User not authenticated")
    })?;

    if !current_user.is_admin {
        warn!("User {} is not an admin", current_user.user_id);
        return Err(AppError::forbidden("Admin access required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn request_with(header: http::HeaderName, value: &str) -> Request {
        http::Request::builder()
            .header(header, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn token_round_trips_its_claims() {
        let token = encode_jwt("linda@example.com".to_string(), 7, SECRET).unwrap();

        let data = decode_jwt(&token, SECRET).unwrap();

        assert_eq!(data.claims.id, 7);
        assert_eq!(data.claims.email, "linda@example.com");
        assert_eq!(
            data.claims.exp - data.claims.iat,
            (TOKEN_TTL_HOURS * 3600) as usize
        );
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = encode_jwt("linda@example.com".to_string(), 7, "other").unwrap();
        assert!(decode_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn bearer_header_is_preferred() {
        let req = request_with(http::header::AUTHORIZATION, "Bearer abc.def");
        assert_eq!(extract_token(&req).as_deref(), Some("abc.def"));

        let req = request_with(http::header::AUTHORIZATION, "Basic abc");
        assert_eq!(extract_token(&req), None);
    }

    #[test]
    fn token_cookie_is_accepted() {
        let req = request_with(http::header::COOKIE, "theme=dark; token=abc.def");
        assert_eq!(extract_token(&req).as_deref(), Some("abc.def"));

        let req = request_with(http::header::COOKIE, "theme=dark");
        assert_eq!(extract_token(&req), None);
    }
}
