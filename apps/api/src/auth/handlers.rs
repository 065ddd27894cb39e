use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{RecruiterRow, UserRow};
use crate::state::AppState;

use super::password::{hash_password, verify_password};

fn duplicate_email(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation("This email is already registered".to_string())
        }
        other => AppError::Database(other),
    }
}

// ── candidates ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterCandidateRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub city: String,
    pub state: String,
}

#[derive(Serialize)]
pub struct RegisterCandidateResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /api/v1/auth/register/candidate
pub async fn handle_register_candidate(
    State(state): State<AppState>,
    Json(req): Json<RegisterCandidateRequest>,
) -> Result<(StatusCode, Json<RegisterCandidateResponse>), AppError> {
    if req.email.trim().is_empty() || req.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "email and full_name are required".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash, full_name, dob, phone, city, state)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.full_name)
    .bind(req.dob)
    .bind(&req.phone)
    .bind(&req.city)
    .bind(&req.state)
    .fetch_one(&state.db)
    .await
    .map_err(duplicate_email)?;

    tracing::info!("User created: {user_id}");
    Ok((
        StatusCode::CREATED,
        Json(RegisterCandidateResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct CandidateLoginResponse {
    pub message: String,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// POST /api/v1/auth/login/candidate
pub async fn handle_login_candidate(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CandidateLoginResponse>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No account found with this email".to_string()))?;

    verify_password(&req.password, &user.password_hash)?;

    tracing::info!("User logged in: {}", user.email);
    Ok(Json(CandidateLoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        email: user.email,
        full_name: user.full_name,
    }))
}

// ── recruiters ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRecruiterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub position: String,
    pub company_name: String,
    pub company_location: String,
}

#[derive(Serialize)]
pub struct RegisterRecruiterResponse {
    pub message: String,
    pub recruiter_id: Uuid,
}

/// POST /api/v1/auth/register/recruiter
pub async fn handle_register_recruiter(
    State(state): State<AppState>,
    Json(req): Json<RegisterRecruiterRequest>,
) -> Result<(StatusCode, Json<RegisterRecruiterResponse>), AppError> {
    if req.email.trim().is_empty() || req.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "email and company_name are required".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let recruiter_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO recruiters (email, password_hash, full_name, position, company_name, company_location)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.full_name)
    .bind(&req.position)
    .bind(&req.company_name)
    .bind(&req.company_location)
    .fetch_one(&state.db)
    .await
    .map_err(duplicate_email)?;

    tracing::info!("Recruiter created: {recruiter_id}");
    Ok((
        StatusCode::CREATED,
        Json(RegisterRecruiterResponse {
            message: "Recruiter created successfully".to_string(),
            recruiter_id,
        }),
    ))
}

#[derive(Serialize)]
pub struct RecruiterLoginResponse {
    pub message: String,
    pub recruiter_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub company_name: String,
}

/// POST /api/v1/auth/login/recruiter
pub async fn handle_login_recruiter(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<RecruiterLoginResponse>, AppError> {
    let recruiter = sqlx::query_as::<_, RecruiterRow>("SELECT * FROM recruiters WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No account found with this email".to_string()))?;

    verify_password(&req.password, &recruiter.password_hash)?;

    tracing::info!("Recruiter logged in: {}", recruiter.email);
    Ok(Json(RecruiterLoginResponse {
        message: "Login successful".to_string(),
        recruiter_id: recruiter.id,
        email: recruiter.email,
        full_name: recruiter.full_name,
        company_name: recruiter.company_name,
    }))
}
