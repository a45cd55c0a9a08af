//! Handlers for the `/auth` resource (register, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bagline_core::error::CoreError;
use bagline_core::roles::Role;
use bagline_db::models::user::{CreateUser, UserResponse};
use bagline_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(alias = "name")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub nome: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(alias = "password")]
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub senha: String,
    /// Role label; defaults to `Operador`.
    #[serde(alias = "role", default)]
    pub tipo: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(alias = "password")]
    pub senha: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Emails are compared trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse>)> {
    input.nome = input.nome.trim().to_string();
    input.email = normalize_email(&input.email);
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let role = match input.tipo.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => Role::default(),
        Some(label) => Role::parse(label).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown role '{label}'")))
        })?,
    };

    if UserRepo::find_by_email(state.store(), &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.senha)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        state.store(),
        &CreateUser {
            name: input.nome,
            email: input.email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// POST /api/auth/login
///
/// Unknown email is a 404; a wrong password is a 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&input.email);
    let user = UserRepo::find_by_email(state.store(), &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: email.clone(),
            })
        })?;

    let password_valid = verify_password(&input.senha, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect password".into(),
        )));
    }

    let token = state
        .config
        .jwt
        .issue(user.id, &user.role)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    tracing::debug!(user_id = %auth.user_id, role = %auth.role, "Resolving current user");
    let user = UserRepo::find_by_id(state.store(), auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}
