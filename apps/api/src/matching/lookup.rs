//! Per-domain lookup tables used by the scoring engine.
//!
//! Both tables are prefetched once per ranking run so that scoring itself is
//! a pure in-memory computation. Fuzzy matches can hit several rows; rows are
//! ordered by descending weight then ascending name, and the first hit wins,
//! which makes the tie-break deterministic (highest weight, then name).

use sqlx::{FromRow, PgPool};

use crate::errors::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct PostWeight {
    pub post_name: String,
    pub weight_value: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct HierarchySkill {
    pub skill_name: String,
    pub weight_multiplier: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DomainLookups {
    pub post_weights: Vec<PostWeight>,
    pub skill_hierarchy: Vec<HierarchySkill>,
}

impl DomainLookups {
    pub async fn load(pool: &PgPool, domain: &str) -> Result<Self, AppError> {
        let post_weights = sqlx::query_as::<_, PostWeight>(
            r#"
            SELECT post_name, weight_value
            FROM domain_post_weights
            WHERE domain = $1
            ORDER BY weight_value DESC, post_name ASC
            "#,
        )
        .bind(domain)
        .fetch_all(pool)
        .await?;

        let skill_hierarchy = sqlx::query_as::<_, HierarchySkill>(
            r#"
            SELECT skill_name, weight_multiplier
            FROM skill_hierarchy
            WHERE domain = $1
            ORDER BY weight_multiplier DESC, skill_name ASC
            "#,
        )
        .bind(domain)
        .fetch_all(pool)
        .await?;

        Ok(DomainLookups {
            post_weights,
            skill_hierarchy,
        })
    }

    /// Weight of the best role match for a skill: the skill name must appear
    /// (case-insensitively) inside a post name for the domain.
    pub fn post_weight_for_skill(&self, skill_name: &str) -> Option<f64> {
        let needle = skill_name.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.post_weights
            .iter()
            .find(|pw| pw.post_name.to_lowercase().contains(&needle))
            .map(|pw| pw.weight_value)
    }

    /// Multiplier of the best hierarchy match for a skill. Containment goes
    /// both ways: "reactjs" matches the "react" hierarchy entry and vice versa.
    pub fn hierarchy_multiplier(&self, skill_name: &str) -> Option<f64> {
        let needle = skill_name.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.skill_hierarchy
            .iter()
            .find(|hs| {
                let entry = hs.skill_name.to_lowercase();
                needle.contains(&entry) || entry.contains(&needle)
            })
            .map(|hs| hs.weight_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> DomainLookups {
        // Ordered the way `load` orders rows: weight desc, name asc.
        DomainLookups {
            post_weights: vec![
                PostWeight {
                    post_name: "Data Scientist".to_string(),
                    weight_value: 10.0,
                },
                PostWeight {
                    post_name: "Data Engineer".to_string(),
                    weight_value: 8.0,
                },
                PostWeight {
                    post_name: "Backend Developer".to_string(),
                    weight_value: 6.0,
                },
            ],
            skill_hierarchy: vec![
                HierarchySkill {
                    skill_name: "python".to_string(),
                    weight_multiplier: 2.0,
                },
                HierarchySkill {
                    skill_name: "sql".to_string(),
                    weight_multiplier: 1.5,
                },
            ],
        }
    }

    #[test]
    fn test_post_weight_matches_substring_case_insensitive() {
        assert_eq!(lookups().post_weight_for_skill("data"), Some(10.0));
        assert_eq!(lookups().post_weight_for_skill("BACKEND"), Some(6.0));
    }

    #[test]
    fn test_post_weight_ambiguous_match_takes_highest_weight() {
        // "data" appears in both Data Scientist (10) and Data Engineer (8).
        assert_eq!(lookups().post_weight_for_skill("Data"), Some(10.0));
    }

    #[test]
    fn test_post_weight_no_match() {
        assert_eq!(lookups().post_weight_for_skill("cooking"), None);
        assert_eq!(lookups().post_weight_for_skill(""), None);
    }

    #[test]
    fn test_hierarchy_matches_both_directions() {
        // candidate skill contains hierarchy entry
        assert_eq!(lookups().hierarchy_multiplier("python3"), Some(2.0));
        // hierarchy entry contains candidate skill
        assert_eq!(lookups().hierarchy_multiplier("sq"), Some(1.5));
    }

    #[test]
    fn test_hierarchy_no_match() {
        assert_eq!(lookups().hierarchy_multiplier("golang"), None);
    }
}
