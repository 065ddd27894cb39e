use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPostingRow, MatchWeights, QualificationThreshold};

/// Recruiter-set thresholds. All optional; partial credit, not hard cutoffs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobThresholds {
    pub cgpa_min: Option<f64>,
    #[serde(default)]
    pub qualification_min: QualificationThreshold,
    pub experience_min_years: Option<f64>,
    pub experience_max_years: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub recruiter_id: Uuid,
    pub job_domain: String,
    pub job_post: String,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub weights: MatchWeights,
    #[serde(default)]
    pub thresholds: JobThresholds,
}

impl CreateJobRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_domain.trim().is_empty() {
            return Err(AppError::Validation("job_domain is required".to_string()));
        }
        if self.job_post.trim().is_empty() {
            return Err(AppError::Validation("job_post is required".to_string()));
        }
        self.weights.validate()?;
        if let (Some(min), Some(max)) = (
            self.thresholds.experience_min_years,
            self.thresholds.experience_max_years,
        ) {
            if min > max {
                return Err(AppError::Validation(
                    "experience_min_years must not exceed experience_max_years".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub async fn create_job(pool: &PgPool, req: &CreateJobRequest) -> Result<Uuid, AppError> {
    req.validate()?;

    let job_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO job_postings
            (recruiter_id, job_domain, job_post, job_title, job_description,
             location, salary_range,
             weight_education, weight_experience, weight_skills, weight_projects,
             cgpa_threshold, qualification_threshold,
             experience_min_years, experience_max_years)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING id
        "#,
    )
    .bind(req.recruiter_id)
    .bind(&req.job_domain)
    .bind(&req.job_post)
    .bind(req.job_title.as_deref().unwrap_or(&req.job_post))
    .bind(&req.job_description)
    .bind(&req.location)
    .bind(&req.salary_range)
    .bind(req.weights.education)
    .bind(req.weights.experience)
    .bind(req.weights.skills)
    .bind(req.weights.projects)
    .bind(req.thresholds.cgpa_min)
    .bind(req.thresholds.qualification_min.as_str())
    .bind(req.thresholds.experience_min_years)
    .bind(req.thresholds.experience_max_years)
    .fetch_one(pool)
    .await?;

    Ok(job_id)
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<JobPostingRow, AppError> {
    sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {job_id} not found")))
}

pub async fn list_jobs_for_recruiter(
    pool: &PgPool,
    recruiter_id: Uuid,
) -> Result<Vec<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        "SELECT * FROM job_postings WHERE recruiter_id = $1 ORDER BY posted_at DESC",
    )
    .bind(recruiter_id)
    .fetch_all(pool)
    .await?)
}

pub async fn set_job_status(
    pool: &PgPool,
    job_id: Uuid,
    is_active: bool,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE job_postings SET is_active = $1 WHERE id = $2")
        .bind(is_active)
        .bind(job_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job posting {job_id} not found")));
    }
    Ok(())
}

pub async fn delete_job(pool: &PgPool, job_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM job_postings WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job posting {job_id} not found")));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DomainPostEntry {
    pub post_name: String,
    pub weight_value: f64,
}

#[derive(Debug, FromRow)]
struct DomainPostRow {
    domain: String,
    post_name: String,
    weight_value: f64,
}

/// All known (domain, post, weight) rows grouped by domain, posts ordered by
/// descending weight within each domain.
pub async fn list_domain_posts(
    pool: &PgPool,
) -> Result<BTreeMap<String, Vec<DomainPostEntry>>, AppError> {
    let rows = sqlx::query_as::<_, DomainPostRow>(
        r#"
        SELECT domain, post_name, weight_value
        FROM domain_post_weights
        ORDER BY domain ASC, weight_value DESC, post_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: BTreeMap<String, Vec<DomainPostEntry>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.domain).or_default().push(DomainPostEntry {
            post_name: row.post_name,
            weight_value: row.weight_value,
        });
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateJobRequest {
        CreateJobRequest {
            recruiter_id: Uuid::new_v4(),
            job_domain: "cse-it".to_string(),
            job_post: "Data Scientist".to_string(),
            job_title: None,
            job_description: None,
            location: None,
            salary_range: None,
            weights: MatchWeights {
                education: 40.0,
                experience: 30.0,
                skills: 20.0,
                projects: 10.0,
            },
            thresholds: JobThresholds::default(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_domain_rejected() {
        let mut req = request();
        req.job_domain = "  ".to_string();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_weight_sum_rejected() {
        let mut req = request();
        req.weights.projects = 11.0;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_experience_range_rejected() {
        let mut req = request();
        req.thresholds.experience_min_years = Some(5.0);
        req.thresholds.experience_max_years = Some(2.0);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_thresholds_default_to_any_qualification() {
        let req: CreateJobRequest = serde_json::from_str(
            r#"{
                "recruiter_id": "c4b8e2a0-0000-0000-0000-000000000001",
                "job_domain": "cse-it",
                "job_post": "Data Scientist",
                "weights": {"education": 25, "experience": 25, "skills": 25, "projects": 25}
            }"#,
        )
        .unwrap();
        assert_eq!(
            req.thresholds.qualification_min,
            QualificationThreshold::Any
        );
        assert!(req.validate().is_ok());
    }
}
