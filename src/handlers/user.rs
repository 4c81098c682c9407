use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument, warn};

use crate::auth::jwt::sign_token;
use crate::auth::password::{hash_password, verify_password};
use crate::dtos::common::{optional_text, required_text};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterUserRequest, UserResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::{NewUser, ROLE_ADMIN, ROLE_STAFF};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

// POST /register
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let role = payload
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(ROLE_STAFF);
    if role != ROLE_ADMIN && role != ROLE_STAFF {
        return Err(AppError::validation("Invalid role"));
    }

    let username = required_text(&payload.username, "Username required")?;
    let email = required_text(&payload.email, "Email required")?;
    if !email.contains('@') {
        return Err(AppError::validation("Invalid email"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash_password(&payload.password, state.config.bcrypt_cost)?;

    let user = state
        .users
        .create(NewUser {
            username,
            email,
            mobile_no: optional_text(payload.mobile_no),
            password_hash,
            role: role.to_string(),
        })
        .await?;

    info!(id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /login
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let login = required_text(&payload.employee_id, "Employee ID required")?;
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = state
        .users
        .find_by_login(&login)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(login = %login, "Failed login attempt");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    if !user.is_active {
        return Err(AppError::forbidden("User inactive"));
    }

    let ttl_hours = state.config.token_ttl_hours;
    let token = sign_token(user.id, &user.role, &user.username, &state.config.jwt_secret, ttl_hours)?;

    info!(id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: ttl_hours.saturating_mul(60 * 60),
        user: UserResponse::from(user),
    }))
}

// GET /users/me
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .get(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}
