use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate identity without the password hash, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub dob: NaiveDate,
    pub phone: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterRow {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub position: String,
    pub company_name: String,
    pub company_location: String,
    pub created_at: DateTime<Utc>,
}
