use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::Qualification;

/// Recruiter-configured weights for the four scoring factors.
/// Must be non-negative and sum to exactly 100 (each weight is the number of
/// composite points a perfect sub-score contributes).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    pub education: f64,
    pub experience: f64,
    pub skills: f64,
    pub projects: f64,
}

impl MatchWeights {
    pub fn validate(&self) -> Result<(), AppError> {
        let named = [
            ("education", self.education),
            ("experience", self.experience),
            ("skills", self.skills),
            ("projects", self.projects),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!(
                    "weight '{name}' must be a non-negative number"
                )));
            }
        }
        let sum = self.education + self.experience + self.skills + self.projects;
        if (sum - 100.0).abs() > 1e-9 {
            return Err(AppError::Validation(format!(
                "weights must sum to 100, current sum: {sum}"
            )));
        }
        Ok(())
    }
}

/// Minimum-qualification threshold on a job posting. `Any` (also the fallback
/// for unrecognized stored values) always grants full qualification credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QualificationThreshold {
    #[default]
    Any,
    HighSchool,
    Bachelors,
    Masters,
    Phd,
}

impl QualificationThreshold {
    /// Ordinal the candidate must meet; 0 means no bar.
    pub fn min_level(self) -> u8 {
        match self {
            QualificationThreshold::Any => 0,
            QualificationThreshold::HighSchool => 1,
            QualificationThreshold::Bachelors => 2,
            QualificationThreshold::Masters => 3,
            QualificationThreshold::Phd => 4,
        }
    }

    pub fn parse(s: &str) -> Self {
        match Qualification::parse(s) {
            Some(Qualification::HighSchool) => QualificationThreshold::HighSchool,
            Some(Qualification::Bachelors) => QualificationThreshold::Bachelors,
            Some(Qualification::Masters) => QualificationThreshold::Masters,
            Some(Qualification::Phd) => QualificationThreshold::Phd,
            None => QualificationThreshold::Any,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualificationThreshold::Any => "any",
            QualificationThreshold::HighSchool => "high-school",
            QualificationThreshold::Bachelors => "bachelors",
            QualificationThreshold::Masters => "masters",
            QualificationThreshold::Phd => "phd",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub job_domain: String,
    pub job_post: String,
    pub job_title: String,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub weight_education: f64,
    pub weight_experience: f64,
    pub weight_skills: f64,
    pub weight_projects: f64,
    pub cgpa_threshold: Option<f64>,
    pub qualification_threshold: String,
    pub experience_min_years: Option<f64>,
    pub experience_max_years: Option<f64>,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
}

impl JobPostingRow {
    pub fn weights(&self) -> MatchWeights {
        MatchWeights {
            education: self.weight_education,
            experience: self.weight_experience,
            skills: self.weight_skills,
            projects: self.weight_projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_summing_to_100_are_valid() {
        let w = MatchWeights {
            education: 40.0,
            experience: 30.0,
            skills: 20.0,
            projects: 10.0,
        };
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_100_are_rejected() {
        let w = MatchWeights {
            education: 40.0,
            experience: 30.0,
            skills: 20.0,
            projects: 5.0,
        };
        assert!(matches!(w.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let w = MatchWeights {
            education: 110.0,
            experience: -10.0,
            skills: 0.0,
            projects: 0.0,
        };
        assert!(matches!(w.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_single_factor_weights_are_valid() {
        let w = MatchWeights {
            education: 0.0,
            experience: 0.0,
            skills: 100.0,
            projects: 0.0,
        };
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_threshold_parse_falls_back_to_any() {
        assert_eq!(QualificationThreshold::parse("any"), QualificationThreshold::Any);
        assert_eq!(
            QualificationThreshold::parse("nonsense"),
            QualificationThreshold::Any
        );
        assert_eq!(
            QualificationThreshold::parse("masters"),
            QualificationThreshold::Masters
        );
    }

    #[test]
    fn test_threshold_min_levels() {
        assert_eq!(QualificationThreshold::Any.min_level(), 0);
        assert_eq!(QualificationThreshold::Phd.min_level(), 4);
    }
}
