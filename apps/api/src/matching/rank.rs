//! Ranking orchestrator — scores every candidate in a job's domain, ranks the
//! top 50, and replaces the job's stored match records atomically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::get_job;
use crate::models::profile::{CandidateBundle, ProjectRow, Qualification, SkillRow};

use super::engine::{score_candidate, JobCriteria, ScoreBreakdown};
use super::lookup::DomainLookups;

/// Matches persisted per job. Everything past this cut is discarded.
pub const MAX_MATCHES: usize = 50;

/// One scored candidate, before filtering and ranking.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub location: String,
    pub scores: ScoreBreakdown,
}

/// One entry of the final ranked result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub location: String,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
    pub rank: i32,
}

#[derive(Debug, Clone)]
pub struct FindMatchesOutcome {
    pub total_candidates: usize,
    pub matches: Vec<RankedMatch>,
}

/// Runs the full ranking pipeline for one job.
///
/// Concurrent runs for the same job are serialized by a per-job advisory
/// transaction lock around the delete-then-insert, so a failure (or a racing
/// run) can never leave a half-replaced record set.
pub async fn find_matches(pool: &PgPool, job_id: Uuid) -> Result<FindMatchesOutcome, AppError> {
    let job = get_job(pool, job_id).await?;
    let criteria = JobCriteria::from_row(&job);

    let candidates = load_candidate_bundles(pool, &job.job_domain).await?;
    let total_candidates = candidates.len();
    info!(
        "Scoring {} candidates in domain '{}' for job {}",
        total_candidates, job.job_domain, job_id
    );

    let lookups = DomainLookups::load(pool, &job.job_domain).await?;

    let scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|c| {
            let scores = score_candidate(&c, &criteria, &lookups);
            ScoredCandidate {
                user_id: c.user_id,
                location: format!("{}, {}", c.city, c.state),
                full_name: c.full_name,
                email: c.email,
                scores,
            }
        })
        .collect();

    let matches = rank_matches(scored);
    replace_match_records(pool, job_id, &matches).await?;

    info!("Persisted {} matches for job {}", matches.len(), job_id);
    Ok(FindMatchesOutcome {
        total_candidates,
        matches,
    })
}

/// Filters out zero composites, sorts by composite descending (ties broken by
/// user id ascending for reproducibility), truncates to the top 50, and
/// assigns 1-based ranks.
pub fn rank_matches(mut scored: Vec<ScoredCandidate>) -> Vec<RankedMatch> {
    scored.retain(|s| s.scores.composite_score > 0.0);
    scored.sort_by(|a, b| {
        b.scores
            .composite_score
            .total_cmp(&a.scores.composite_score)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    scored.truncate(MAX_MATCHES);
    scored
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedMatch {
            user_id: s.user_id,
            full_name: s.full_name,
            email: s.email,
            location: s.location,
            scores: s.scores,
            rank: (i + 1) as i32,
        })
        .collect()
}

#[derive(Debug, FromRow)]
struct CandidateHeadRow {
    user_id: Uuid,
    full_name: String,
    email: String,
    city: String,
    state: String,
    profile_id: Uuid,
    qualification: String,
    cgpa: Option<f64>,
}

#[derive(Debug, FromRow)]
struct ProfileSkillRow {
    profile_id: Uuid,
    skill_name: String,
    years_experience: Option<f64>,
}

#[derive(Debug, FromRow)]
struct ProfileCourseRow {
    profile_id: Uuid,
    course_name: String,
}

#[derive(Debug, FromRow)]
struct ProfileProjectRow {
    profile_id: Uuid,
    project_name: String,
    description: Option<String>,
    link: Option<String>,
}

/// Loads every candidate profile in the domain with its skills, courses, and
/// projects. Child tables are fetched in three batched queries rather than
/// per candidate.
async fn load_candidate_bundles(
    pool: &PgPool,
    domain: &str,
) -> Result<Vec<CandidateBundle>, AppError> {
    let heads = sqlx::query_as::<_, CandidateHeadRow>(
        r#"
        SELECT u.id AS user_id, u.full_name, u.email, u.city, u.state,
               p.id AS profile_id, p.qualification, p.cgpa
        FROM users u
        INNER JOIN profiles p ON p.user_id = u.id
        WHERE p.domain = $1
        "#,
    )
    .bind(domain)
    .fetch_all(pool)
    .await?;

    let profile_ids: Vec<Uuid> = heads.iter().map(|h| h.profile_id).collect();

    let mut skills_by_profile: HashMap<Uuid, Vec<SkillRow>> = HashMap::new();
    let mut courses_by_profile: HashMap<Uuid, Vec<String>> = HashMap::new();
    let mut projects_by_profile: HashMap<Uuid, Vec<ProjectRow>> = HashMap::new();

    if !profile_ids.is_empty() {
        let skills = sqlx::query_as::<_, ProfileSkillRow>(
            "SELECT profile_id, skill_name, years_experience FROM skills WHERE profile_id = ANY($1)",
        )
        .bind(&profile_ids)
        .fetch_all(pool)
        .await?;
        for s in skills {
            skills_by_profile.entry(s.profile_id).or_default().push(SkillRow {
                skill_name: s.skill_name,
                years_experience: s.years_experience,
            });
        }

        let courses = sqlx::query_as::<_, ProfileCourseRow>(
            "SELECT profile_id, course_name FROM courses WHERE profile_id = ANY($1)",
        )
        .bind(&profile_ids)
        .fetch_all(pool)
        .await?;
        for c in courses {
            courses_by_profile
                .entry(c.profile_id)
                .or_default()
                .push(c.course_name);
        }

        let projects = sqlx::query_as::<_, ProfileProjectRow>(
            "SELECT profile_id, project_name, description, link FROM projects WHERE profile_id = ANY($1)",
        )
        .bind(&profile_ids)
        .fetch_all(pool)
        .await?;
        for p in projects {
            projects_by_profile
                .entry(p.profile_id)
                .or_default()
                .push(ProjectRow {
                    project_name: p.project_name,
                    description: p.description,
                    link: p.link,
                });
        }
    }

    Ok(heads
        .into_iter()
        .map(|h| CandidateBundle {
            user_id: h.user_id,
            full_name: h.full_name,
            email: h.email,
            city: h.city,
            state: h.state,
            qualification: Qualification::parse(&h.qualification),
            cgpa: h.cgpa,
            skills: skills_by_profile.remove(&h.profile_id).unwrap_or_default(),
            courses: courses_by_profile.remove(&h.profile_id).unwrap_or_default(),
            projects: projects_by_profile.remove(&h.profile_id).unwrap_or_default(),
        })
        .collect())
}

/// Atomically replaces the job's match records: old rows are deleted and new
/// ones inserted inside one transaction, behind a per-job advisory lock.
async fn replace_match_records(
    pool: &PgPool,
    job_id: Uuid,
    matches: &[RankedMatch],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    // Serialize concurrent runs for the same job; released at COMMIT/ROLLBACK.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(job_id.to_string())
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM candidate_matches WHERE job_posting_id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

    for m in matches {
        sqlx::query(
            r#"
            INSERT INTO candidate_matches
                (job_posting_id, user_id,
                 education_score, experience_score, skills_score, projects_score,
                 education_weighted, experience_weighted, skills_weighted, projects_weighted,
                 composite_score, match_rank)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(job_id)
        .bind(m.user_id)
        .bind(m.scores.education_score)
        .bind(m.scores.experience_score)
        .bind(m.scores.skills_score)
        .bind(m.scores.projects_score)
        .bind(m.scores.education_weighted)
        .bind(m.scores.experience_weighted)
        .bind(m.scores.skills_weighted)
        .bind(m.scores.projects_weighted)
        .bind(m.scores.composite_score)
        .bind(m.rank)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
