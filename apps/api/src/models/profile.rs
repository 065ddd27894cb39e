use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Candidate qualification ladder. Unrecognized database values map to `None`
/// on parse, which scores as level 0 (no qualification credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Qualification {
    HighSchool,
    Bachelors,
    Masters,
    Phd,
}

impl Qualification {
    pub fn level(self) -> u8 {
        match self {
            Qualification::HighSchool => 1,
            Qualification::Bachelors => 2,
            Qualification::Masters => 3,
            Qualification::Phd => 4,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high-school" => Some(Qualification::HighSchool),
            "bachelors" => Some(Qualification::Bachelors),
            "masters" => Some(Qualification::Masters),
            "phd" => Some(Qualification::Phd),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Qualification::HighSchool => "high-school",
            Qualification::Bachelors => "bachelors",
            Qualification::Masters => "masters",
            Qualification::Phd => "phd",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub domain: String,
    pub qualification: String,
    pub cgpa: Option<f64>,
    pub grad_year: i32,
    pub current_designation: Option<String>,
    pub current_company: Option<String>,
    pub current_ctc: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub skill_name: String,
    pub years_experience: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub project_name: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Everything the scoring engine needs to know about one candidate,
/// assembled by the ranking run from the profile and its child tables.
#[derive(Debug, Clone)]
pub struct CandidateBundle {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub qualification: Option<Qualification>,
    pub cgpa: Option<f64>,
    pub skills: Vec<SkillRow>,
    pub courses: Vec<String>,
    pub projects: Vec<ProjectRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_levels_are_ordered() {
        assert!(Qualification::HighSchool.level() < Qualification::Bachelors.level());
        assert!(Qualification::Bachelors.level() < Qualification::Masters.level());
        assert!(Qualification::Masters.level() < Qualification::Phd.level());
    }

    #[test]
    fn test_qualification_parse_round_trips() {
        for q in [
            Qualification::HighSchool,
            Qualification::Bachelors,
            Qualification::Masters,
            Qualification::Phd,
        ] {
            assert_eq!(Qualification::parse(q.as_str()), Some(q));
        }
    }

    #[test]
    fn test_unknown_qualification_parses_to_none() {
        assert_eq!(Qualification::parse("diploma"), None);
        assert_eq!(Qualification::parse(""), None);
    }

    #[test]
    fn test_qualification_serde_kebab_case() {
        let q: Qualification = serde_json::from_str(r#""high-school""#).unwrap();
        assert_eq!(q, Qualification::HighSchool);
        assert_eq!(serde_json::to_string(&Qualification::Phd).unwrap(), r#""phd""#);
    }
}
