use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::matches::StoredMatchRow;
use crate::state::AppState;

use super::rank::{find_matches, RankedMatch};

#[derive(Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub message: String,
    pub total_candidates: usize,
    pub matches: Vec<RankedMatch>,
}

/// POST /api/v1/jobs/:id/find-matches
pub async fn handle_find_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<FindMatchesResponse>, AppError> {
    let outcome = find_matches(&state.db, job_id).await?;
    Ok(Json(FindMatchesResponse {
        message: format!("Found {} matching candidates", outcome.matches.len()),
        total_candidates: outcome.total_candidates,
        matches: outcome.matches,
    }))
}

#[derive(Serialize)]
pub struct StoredMatchesResponse {
    pub total_matches: usize,
    pub matches: Vec<StoredMatchRow>,
}

/// GET /api/v1/jobs/:id/matches
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<StoredMatchesResponse>, AppError> {
    let matches = sqlx::query_as::<_, StoredMatchRow>(
        r#"
        SELECT cm.id, cm.job_posting_id, cm.user_id,
               cm.education_score, cm.experience_score, cm.skills_score, cm.projects_score,
               cm.education_weighted, cm.experience_weighted, cm.skills_weighted, cm.projects_weighted,
               cm.composite_score, cm.match_rank, cm.created_at,
               u.full_name, u.email, u.phone, u.city, u.state,
               p.qualification, p.cgpa, p.current_company, p.current_designation
        FROM candidate_matches cm
        INNER JOIN users u ON cm.user_id = u.id
        INNER JOIN profiles p ON u.id = p.user_id
        WHERE cm.job_posting_id = $1
        ORDER BY cm.match_rank ASC
        "#,
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(StoredMatchesResponse {
        total_matches: matches.len(),
        matches,
    }))
}
