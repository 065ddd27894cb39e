use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileRow, ProjectRow, Qualification, SkillRow};
use crate::models::user::UserView;

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    pub name: String,
    pub years_experience: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileRequest {
    pub user_id: Uuid,
    pub domain: String,
    pub qualification: Qualification,
    pub cgpa: Option<f64>,
    pub grad_year: i32,
    pub current_designation: Option<String>,
    pub current_company: Option<String>,
    pub current_ctc: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
}

impl CreateProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.domain.trim().is_empty() {
            return Err(AppError::Validation("domain is required".to_string()));
        }
        if let Some(cgpa) = self.cgpa {
            if !(0.0..=10.0).contains(&cgpa) {
                return Err(AppError::Validation(
                    "cgpa must be between 0 and 10".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Creates the profile and its skills, courses, and projects in one
/// transaction: either the whole profile lands or none of it does.
pub async fn create_profile(pool: &PgPool, req: &CreateProfileRequest) -> Result<Uuid, AppError> {
    req.validate()?;

    let mut tx = pool.begin().await?;

    let profile_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO profiles
            (user_id, domain, qualification, cgpa, grad_year,
             current_designation, current_company, current_ctc)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(req.user_id)
    .bind(&req.domain)
    .bind(req.qualification.as_str())
    .bind(req.cgpa)
    .bind(req.grad_year)
    .bind(&req.current_designation)
    .bind(&req.current_company)
    .bind(&req.current_ctc)
    .fetch_one(&mut *tx)
    .await?;

    for course in &req.courses {
        sqlx::query("INSERT INTO courses (profile_id, course_name) VALUES ($1, $2)")
            .bind(profile_id)
            .bind(course)
            .execute(&mut *tx)
            .await?;
    }

    for skill in &req.skills {
        sqlx::query(
            "INSERT INTO skills (profile_id, skill_name, years_experience) VALUES ($1, $2, $3)",
        )
        .bind(profile_id)
        .bind(&skill.name)
        .bind(skill.years_experience)
        .execute(&mut *tx)
        .await?;
    }

    for project in &req.projects {
        sqlx::query(
            "INSERT INTO projects (profile_id, project_name, description, link) VALUES ($1, $2, $3, $4)",
        )
        .bind(profile_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.link)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Profile {profile_id} created for user {}", req.user_id);

    Ok(profile_id)
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub profile: ProfileRow,
    pub courses: Vec<String>,
    pub skills: Vec<SkillRow>,
    pub projects: Vec<ProjectRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub profile: Option<ProfileDetail>,
}

/// Returns the user's identity plus their profile with all child rows, if a
/// profile exists.
pub async fn get_profile_view(pool: &PgPool, user_id: Uuid) -> Result<ProfileView, AppError> {
    let user = sqlx::query_as::<_, UserView>(
        "SELECT id, email, full_name, dob, phone, city, state FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let profile = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    let profile = match profile {
        Some(profile) => {
            let courses: Vec<String> = sqlx::query_scalar(
                "SELECT course_name FROM courses WHERE profile_id = $1",
            )
            .bind(profile.id)
            .fetch_all(pool)
            .await?;

            let skills = sqlx::query_as::<_, SkillRow>(
                "SELECT skill_name, years_experience FROM skills WHERE profile_id = $1",
            )
            .bind(profile.id)
            .fetch_all(pool)
            .await?;

            let projects = sqlx::query_as::<_, ProjectRow>(
                "SELECT project_name, description, link FROM projects WHERE profile_id = $1",
            )
            .bind(profile.id)
            .fetch_all(pool)
            .await?;

            Some(ProfileDetail {
                profile,
                courses,
                skills,
                projects,
            })
        }
        None => None,
    };

    Ok(ProfileView { user, profile })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProfileRequest {
        CreateProfileRequest {
            user_id: Uuid::new_v4(),
            domain: "cse-it".to_string(),
            qualification: Qualification::Bachelors,
            cgpa: Some(8.2),
            grad_year: 2022,
            current_designation: None,
            current_company: None,
            current_ctc: None,
            courses: vec![],
            skills: vec![],
            projects: vec![],
        }
    }

    #[test]
    fn test_valid_profile_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_domain_rejected() {
        let mut req = request();
        req.domain = String::new();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_out_of_scale_cgpa_rejected() {
        let mut req = request();
        req.cgpa = Some(11.0);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_missing_cgpa_is_allowed() {
        let mut req = request();
        req.cgpa = None;
        assert!(req.validate().is_ok());
    }
}
