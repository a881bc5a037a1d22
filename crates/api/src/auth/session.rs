//! Account and refresh-session lifecycle.
//!
//! A session is created at login, keyed by the SHA-256 digest of the refresh
//! token it was issued with. It is usable until it is blacklisted at logout
//! or its `expires_at` passes; neither state is ever reversed. Refreshing
//! does not rotate or extend the session.

use chrono::{Duration, Utc};
use socialconnect_core::credentials::LoginIdentifier;
use socialconnect_core::error::CoreError;
use socialconnect_core::roles::{normalize_role, ROLE_USER};
use socialconnect_core::types::DbId;
use socialconnect_db::models::session::{CreateSession, SessionState};
use socialconnect_db::models::user::{CreateUser, User};
use socialconnect_db::store::{StoreError, UQ_USERS_EMAIL, UQ_USERS_USERNAME};
use socialconnect_db::Store;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, validate_refresh_token,
    JwtConfig,
};
use crate::auth::password::{check_password_length, hash_password, verify_password};
use crate::error::{AppError, AppResult};

const EMAIL_TAKEN: &str = "Email already in use";
const USERNAME_TAKEN: &str = "Username already exists";

/// Input for [`register`]. Field formats are checked at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Tokens and profile returned by a successful [`login`].
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

fn token_error(err: jsonwebtoken::errors::Error) -> AppError {
    AppError::InternalError(format!("Token generation error: {err}"))
}

fn password_error(err: argon2::password_hash::Error) -> AppError {
    AppError::InternalError(format!("Password hashing error: {err}"))
}

/// Create a regular account.
///
/// Duplicate email or username is a `Conflict`, whether caught by the lookup
/// or by the store's unique constraint when two registrations race.
pub async fn register<S: Store + ?Sized>(store: &S, account: NewAccount) -> AppResult<User> {
    check_password_length(&account.password)?;

    if store.find_user_by_email(&account.email).await?.is_some() {
        return Err(CoreError::Conflict(EMAIL_TAKEN.into()).into());
    }
    if store
        .find_user_by_username(&account.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(USERNAME_TAKEN.into()).into());
    }

    let password_hash = hash_password(&account.password).map_err(password_error)?;
    let input = CreateUser {
        email: account.email,
        username: account.username,
        password_hash,
        role: ROLE_USER.to_string(),
        first_name: account.first_name,
        last_name: account.last_name,
    };

    let user = store.create_user(&input).await.map_err(|err| match err {
        StoreError::UniqueViolation(ref c) if c == UQ_USERS_EMAIL => {
            AppError::Core(CoreError::Conflict(EMAIL_TAKEN.into()))
        }
        StoreError::UniqueViolation(ref c) if c == UQ_USERS_USERNAME => {
            AppError::Core(CoreError::Conflict(USERNAME_TAKEN.into()))
        }
        other => other.into(),
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Authenticate by email or username and open a new session.
///
/// An unknown identifier and a wrong password produce the same error.
pub async fn login<S: Store + ?Sized>(
    store: &S,
    jwt: &JwtConfig,
    identifier: &str,
    password: &str,
) -> AppResult<LoginOutcome> {
    let found = match LoginIdentifier::parse(identifier) {
        LoginIdentifier::Email(email) => store.find_user_by_email(email).await?,
        LoginIdentifier::Username(username) => store.find_user_by_username(username).await?,
    };
    let Some(user) = found else {
        tracing::info!("Login failed: unknown identifier");
        return Err(CoreError::InvalidCredentials.into());
    };

    let valid = verify_password(password, &user.password_hash).map_err(password_error)?;
    if !valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    let role = normalize_role(&user.role);
    let access_token = generate_access_token(user.id, role, jwt).map_err(token_error)?;
    let refresh_token = generate_refresh_token(user.id, role, jwt).map_err(token_error)?;

    store
        .create_session(&CreateSession {
            user_id: user.id,
            token_hash: hash_refresh_token(&refresh_token),
            expires_at: Utc::now() + Duration::seconds(jwt.refresh_token_expiry_secs),
        })
        .await?;
    store.record_login(user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(LoginOutcome {
        access_token,
        refresh_token,
        user,
    })
}

/// Exchange a refresh token for a new access token.
///
/// The token must verify under the refresh secret and map to a session that
/// is neither blacklisted nor expired.
pub async fn refresh<S: Store + ?Sized>(
    store: &S,
    jwt: &JwtConfig,
    refresh_token: Option<&str>,
) -> AppResult<String> {
    let token = match refresh_token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(CoreError::MissingToken.into()),
    };

    let claims = validate_refresh_token(token, jwt).map_err(|err| {
        tracing::debug!(error = %err, "Refresh token failed verification");
        AppError::Core(CoreError::InvalidToken)
    })?;

    let session = store
        .find_session_by_token_hash(&hash_refresh_token(token))
        .await?
        .ok_or(AppError::Core(CoreError::InvalidToken))?;

    match session.state_at(Utc::now()) {
        SessionState::Active if session.user_id == claims.sub => {}
        state => {
            tracing::info!(session_id = session.id, ?state, "Refresh refused");
            return Err(CoreError::InvalidToken.into());
        }
    }

    generate_access_token(claims.sub, normalize_role(&claims.role), jwt).map_err(token_error)
}

/// Blacklist the session behind `refresh_token`, if any.
///
/// Never fails: unknown, malformed and already-revoked tokens are ignored,
/// and store failures are only logged.
pub async fn logout<S: Store + ?Sized>(store: &S, refresh_token: Option<&str>) {
    let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
        return;
    };

    match store.blacklist_session(&hash_refresh_token(token)).await {
        Ok(true) => tracing::info!("Session blacklisted"),
        Ok(false) => tracing::debug!("Logout with unknown refresh token"),
        Err(err) => tracing::warn!(error = %err, "Failed to blacklist session on logout"),
    }
}

/// Replace a user's password after checking the current one.
pub async fn change_password<S: Store + ?Sized>(
    store: &S,
    user_id: DbId,
    old_password: &str,
    new_password: &str,
) -> AppResult<()> {
    let user = store
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let valid = verify_password(old_password, &user.password_hash).map_err(password_error)?;
    if !valid {
        return Err(CoreError::Validation("Old password incorrect".into()).into());
    }
    check_password_length(new_password)?;

    let password_hash = hash_password(new_password).map_err(password_error)?;
    store.update_password(user_id, &password_hash).await?;

    tracing::info!(user_id, "Password changed");
    Ok(())
}
