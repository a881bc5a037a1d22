//! Handlers for the `/users` resource: profiles and follow edges.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use socialconnect_core::error::CoreError;
use socialconnect_core::types::DbId;
use socialconnect_core::validation::{validate_profile_visibility, BIO_MAX_LENGTH};
use socialconnect_db::models::user::{ProfileCounts, PublicUser, UpdateProfile, User, UserProfile};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::Ack;
use crate::social::graph;
use crate::state::AppState;

/// A profile projection plus its follower/following/post counters.
#[derive(Debug, Serialize)]
pub struct ProfileResponse<T: Serialize> {
    pub user: T,
    #[serde(flatten)]
    pub counts: ProfileCounts,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Request body for `PATCH /users/me`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = BIO_MAX_LENGTH, message = "must be at most 160 characters"))]
    pub bio: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub avatar_url: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub location: Option<String>,
    #[validate(custom(function = "validate_profile_visibility"))]
    pub profile_visibility: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            bio: req.bio,
            avatar_url: req.avatar_url,
            website: req.website,
            location: req.location,
            profile_visibility: req.profile_visibility,
        }
    }
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    state
        .store
        .find_user_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// GET /api/v1/users/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse<UserProfile>>> {
    let user = find_user(&state, auth.user_id).await?;
    let counts = state.store.profile_counts(user.id).await?;
    Ok(Json(ProfileResponse {
        user: UserProfile::from(&user),
        counts,
    }))
}

/// PATCH /api/v1/users/me
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .update_profile(auth.user_id, &input.into())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(UserResponse {
        user: UserProfile::from(&user),
    }))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<Json<ProfileResponse<PublicUser>>> {
    let user = find_user(&state, user_id).await?;
    let counts = state.store.profile_counts(user.id).await?;
    Ok(Json(ProfileResponse {
        user: PublicUser::from(&user),
        counts,
    }))
}

/// POST /api/v1/users/{user_id}/follow
pub async fn follow(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    graph::follow(state.store.as_ref(), auth.user_id, user_id).await?;
    Ok(Json(Ack::ok()))
}

/// DELETE /api/v1/users/{user_id}/follow
pub async fn unfollow(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    graph::unfollow(state.store.as_ref(), auth.user_id, user_id).await?;
    Ok(Json(Ack::ok()))
}
