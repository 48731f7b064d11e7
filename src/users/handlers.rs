use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        extractors::AuthUser,
        password::{hash_password, verify_password},
    },
    error::{ApiError, AppJson},
    state::AppState,
    users::{
        dto::{
            LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
            UpdateProfileRequest, UpdateProfileResponse,
        },
        validate,
    },
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(register).put(update_profile))
        .route("/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    validate::validate_registration(&payload)?;

    let hash = hash_password(&payload.password)?;
    let user_id = Uuid::new_v4();
    state
        .store
        .insert(user_id, &payload.phone, &payload.name, &hash)
        .await?;

    info!(user_id = %user_id, "account registered");
    Ok(Json(RegisterResponse { user_id }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let phone = payload.phone.trim();

    // Unknown phone and wrong password are indistinguishable to the caller.
    let user = match state.store.find_by_phone(phone).await? {
        Some(u) => u,
        None => {
            warn!("login for unknown phone");
            return Err(ApiError::Credentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::Credentials);
    }

    let token = state.keys.sign(&user.phone)?;

    // The token is withheld unless the counter update lands: the caller
    // sees all-or-nothing even though these are two store operations.
    state.store.increment_login_counter(&user.phone).await?;

    info!(user_id = %user.id, "login succeeded");
    Ok(Json(LoginResponse { token }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(phone): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .store
        .find_by_phone(&phone)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(ProfileResponse {
        name: user.name,
        phone: user.phone,
    }))
}

/// A caller can only update the record named by their own token's phone
/// claim; no caller-supplied identifier is trusted.
#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(phone): AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let patch = validate::validate_update(&payload)?;
    state.store.update_by_phone(&patch, &phone).await?;

    info!("profile updated");
    Ok(Json(UpdateProfileResponse {
        phone: patch.phone,
        name: patch.name,
    }))
}
