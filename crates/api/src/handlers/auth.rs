//! Handlers for the `/auth` resource.
//!
//! Token fields use camelCase (`accessToken`, `refreshToken`) on the wire.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use socialconnect_core::validation::{
    validate_username, IDENTIFIER_MIN_LENGTH, USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH,
};
use socialconnect_db::models::user::UserProfile;
use validator::Validate;

use crate::auth::session::{self, NewAccount};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::Ack;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = USERNAME_MIN_LENGTH, max = USERNAME_MAX_LENGTH, message = "must be 3-30 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    /// Length is checked by the session registry so the rule lives in one place.
    pub password: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub last_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or username.
    #[validate(length(min = IDENTIFIER_MIN_LENGTH, message = "must be at least 3 characters"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Request body for `POST /auth/token/refresh` and `POST /auth/logout`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Successful login: both tokens plus the caller's profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = session::register(
        state.store.as_ref(),
        NewAccount {
            email: input.email,
            username: input.username,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user: UserProfile::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email or username plus password.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = session::login(
        state.store.as_ref(),
        &state.config.jwt,
        &input.identifier,
        &input.password,
    )
    .await?;

    Ok(Json(LoginResponse {
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
        user: UserProfile::from(&outcome.user),
    }))
}

/// POST /api/v1/auth/token/refresh
///
/// Exchange a refresh token for a new access token. The refresh token is not
/// rotated; the client keeps using it until logout or expiry.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let access_token = session::refresh(
        state.store.as_ref(),
        &state.config.jwt,
        input.refresh_token.as_deref(),
    )
    .await?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// POST /api/v1/auth/logout
///
/// Always answers `{ "ok": true }`, even for an unreadable body.
pub async fn logout(State(state): State<AppState>, body: Bytes) -> Json<Ack> {
    let input: RefreshRequest = serde_json::from_slice(&body).unwrap_or_default();
    session::logout(state.store.as_ref(), input.refresh_token.as_deref()).await;
    Json(Ack::ok())
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<Ack>> {
    session::change_password(
        state.store.as_ref(),
        auth.user_id,
        &input.old_password,
        &input.new_password,
    )
    .await?;
    Ok(Json(Ack::ok()))
}
