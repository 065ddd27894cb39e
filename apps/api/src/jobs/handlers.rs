use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobPostingRow;
use crate::state::AppState;

use super::store::{
    create_job, delete_job, get_job, list_domain_posts, list_jobs_for_recruiter, set_job_status,
    CreateJobRequest, DomainPostEntry,
};

#[derive(Serialize)]
pub struct CreateJobResponse {
    pub message: String,
    pub job_id: Uuid,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let job_id = create_job(&state.db, &req).await?;
    tracing::info!("Job posting created: {job_id}");
    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            message: "Job posting created successfully".to_string(),
            job_id,
        }),
    ))
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobPostingRow>,
}

/// GET /api/v1/recruiters/:id/jobs
pub async fn handle_list_recruiter_jobs(
    State(state): State<AppState>,
    Path(recruiter_id): Path<Uuid>,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = list_jobs_for_recruiter(&state.db, recruiter_id).await?;
    Ok(Json(JobListResponse { jobs }))
}

#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobPostingRow,
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let job = get_job(&state.db, job_id).await?;
    Ok(Json(JobResponse { job }))
}

#[derive(Deserialize)]
pub struct JobStatusUpdate {
    pub is_active: bool,
}

/// PUT /api/v1/jobs/:id/status
pub async fn handle_set_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(req): Json<JobStatusUpdate>,
) -> Result<StatusCode, AppError> {
    set_job_status(&state.db, job_id, req.is_active).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_job(&state.db, job_id).await?;
    tracing::info!("Job posting {job_id} deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct DomainsResponse {
    pub domains: BTreeMap<String, Vec<DomainPostEntry>>,
}

/// GET /api/v1/domains
pub async fn handle_list_domains(
    State(state): State<AppState>,
) -> Result<Json<DomainsResponse>, AppError> {
    let domains = list_domain_posts(&state.db).await?;
    Ok(Json(DomainsResponse { domains }))
}
