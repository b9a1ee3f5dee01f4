//! Signup, login, and current-user endpoints.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{issue_token, AppError, AppState, AuthUser};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Argon2id hash of a password, usable anywhere accounts are created.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("stored password hash is malformed: {e}");
            false
        }
    }
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<Value>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::bad_request("invalid email address"));
    }
    if req.password.len() < 6 {
        return Err(AppError::bad_request(
            "password must be at least 6 characters",
        ));
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("{e}");
        AppError::internal("failed to process password")
    })?;
    let user = state.db.create_user(name, &email, &hash)?;
    let token = issue_token(&user, &state.config)?;

    tracing::info!(user_id = user.id, "new user signed up");
    Ok(Json(json!({ "token": token, "user": user })))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let email = req.email.trim().to_lowercase();
    let user = state
        .db
        .get_user_by_email(&email)?
        .ok_or_else(|| AppError::unauthorized("invalid email or password"))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::unauthorized("invalid email or password"));
    }

    let token = issue_token(&user, &state.config)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .db
        .get_user(auth.id)?
        .ok_or_else(|| AppError::unauthorized("user no longer exists"))?;
    Ok(Json(json!({ "user": user })))
}
