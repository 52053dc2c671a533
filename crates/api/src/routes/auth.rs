//! Authentication routes — admin login, token verification and account
//! registration.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mandi_common::error::AppError;
use mandi_common::types::{AdminRole, AdminUser};

use crate::middleware::auth::{AuthUser, encode_jwt, hash_password, verify_password};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/register", post(register))
}

/// Request body for admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<AdminRole>,
}

/// POST /api/auth/login — verify credentials, return a JWT and the user.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim().to_ascii_lowercase();

    let user: Option<AdminUser> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.pool)
        .await?;

    // Same error for unknown email and wrong password
    let user = user.ok_or_else(|| AppError::Auth("Invalid email or password".to_string()))?;
    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Auth("Invalid email or password".to_string()));
    }

    let token = encode_jwt(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    tracing::info!(user_id = %user.id, email = %email, "Admin logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/verify — return the user behind the presented token.
async fn verify(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AdminUser>, AppError> {
    let user: AdminUser = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::Auth("Token user no longer exists".to_string()))?;

    Ok(Json(user))
}

/// POST /api/auth/register — create an admin account.
///
/// Open only while the users table is empty (first-run bootstrap);
/// afterwards an authenticated admin is required. The first account
/// becomes a superadmin.
async fn register(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AdminUser>, AppError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT count(*) FROM users")
        .fetch_one(&state.pool)
        .await?;

    if existing > 0 && auth.is_none() {
        return Err(AppError::Auth(
            "Registration requires an authenticated admin".to_string(),
        ));
    }

    let email = req.email.trim().to_ascii_lowercase();
    if !email.contains('@') {
        return Err(AppError::Validation("email is invalid".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let taken: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.pool)
        .await?;
    if taken.is_some() {
        return Err(AppError::Validation(format!(
            "An account for {} already exists",
            email
        )));
    }

    let role = if existing == 0 {
        AdminRole::Superadmin
    } else {
        req.role.unwrap_or(AdminRole::Admin)
    };

    let user: AdminUser = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(req.name.trim())
    .bind(hash_password(&req.password))
    .bind(role)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(user_id = %user.id, email = %email, role = %role, "Admin account created");

    Ok(Json(user))
}
