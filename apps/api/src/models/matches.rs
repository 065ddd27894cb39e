use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored match record joined with candidate identity, as served by
/// `GET /api/v1/jobs/:id/matches` (ordered by `match_rank`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredMatchRow {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub user_id: Uuid,
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub projects_score: f64,
    pub education_weighted: f64,
    pub experience_weighted: f64,
    pub skills_weighted: f64,
    pub projects_weighted: f64,
    pub composite_score: f64,
    pub match_rank: i32,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub qualification: String,
    pub cgpa: Option<f64>,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
}
