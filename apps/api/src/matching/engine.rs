//! Scoring engine — pure, per-candidate match scoring.
//!
//! `score_candidate` is a pure function of the candidate, the job criteria,
//! and the prefetched domain lookups; it performs no I/O and never fails.
//! Incomplete profiles (missing CGPA, qualification, skills, projects)
//! degrade to zero or partial credit for that factor, so one sparse profile
//! can never abort a ranking run.

use serde::{Deserialize, Serialize};

use crate::models::job::{JobPostingRow, MatchWeights, QualificationThreshold};
use crate::models::profile::CandidateBundle;

use super::lookup::DomainLookups;

/// Scoring inputs extracted from a job posting row.
#[derive(Debug, Clone)]
pub struct JobCriteria {
    pub domain: String,
    pub post: String,
    pub weights: MatchWeights,
    pub cgpa_min: Option<f64>,
    pub qualification_min: QualificationThreshold,
    pub experience_min_years: Option<f64>,
    pub experience_max_years: Option<f64>,
}

impl JobCriteria {
    pub fn from_row(row: &JobPostingRow) -> Self {
        JobCriteria {
            domain: row.job_domain.clone(),
            post: row.job_post.clone(),
            weights: row.weights(),
            cgpa_min: row.cgpa_threshold,
            qualification_min: QualificationThreshold::parse(&row.qualification_threshold),
            experience_min_years: row.experience_min_years,
            experience_max_years: row.experience_max_years,
        }
    }
}

/// Four raw sub-scores (each 0–10), their weighted contributions, and the
/// composite (0–100). All values are rounded to 2 decimals; the composite is
/// the rounded sum of the unrounded weighted contributions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub projects_score: f64,
    pub education_weighted: f64,
    pub experience_weighted: f64,
    pub skills_weighted: f64,
    pub projects_weighted: f64,
    pub composite_score: f64,
}

pub fn score_candidate(
    candidate: &CandidateBundle,
    job: &JobCriteria,
    lookups: &DomainLookups,
) -> ScoreBreakdown {
    let education = education_score(candidate, job);
    let experience = experience_score(candidate, job, lookups);
    let skills = skills_score(candidate, job, lookups);
    let projects = projects_score(candidate, job);

    // A perfect 10 sub-score with weight W contributes exactly W points.
    let education_weighted = education * job.weights.education / 10.0;
    let experience_weighted = experience * job.weights.experience / 10.0;
    let skills_weighted = skills * job.weights.skills / 10.0;
    let projects_weighted = projects * job.weights.projects / 10.0;
    let composite = education_weighted + experience_weighted + skills_weighted + projects_weighted;

    ScoreBreakdown {
        education_score: round2(education),
        experience_score: round2(experience),
        skills_score: round2(skills),
        projects_score: round2(projects),
        education_weighted: round2(education_weighted),
        experience_weighted: round2(experience_weighted),
        skills_weighted: round2(skills_weighted),
        projects_weighted: round2(projects_weighted),
        composite_score: round2(composite),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Education: CGPA component (0–5) + qualification component (0–5), capped at 10.
fn education_score(candidate: &CandidateBundle, job: &JobCriteria) -> f64 {
    let mut score = 0.0;

    match (job.cgpa_min, candidate.cgpa) {
        (Some(threshold), Some(cgpa)) if threshold > 0.0 => {
            if cgpa >= threshold {
                score += 5.0;
            } else {
                score += (cgpa / threshold) * 5.0;
            }
        }
        // No threshold set: score the CGPA against the 0–10 scale.
        (_, Some(cgpa)) => score += (cgpa / 10.0) * 5.0,
        _ => {}
    }

    let candidate_level = candidate.qualification.map_or(0, |q| q.level());
    let min_level = job.qualification_min.min_level();
    if min_level == 0 || candidate_level >= min_level {
        score += 5.0;
    } else if candidate_level > 0 {
        score += (f64::from(candidate_level) / f64::from(min_level)) * 5.0;
    }

    score.min(10.0)
}

/// Experience: best single-skill score against the domain's role weights,
/// capped at 10. No skills scores 0.
fn experience_score(
    candidate: &CandidateBundle,
    job: &JobCriteria,
    lookups: &DomainLookups,
) -> f64 {
    let mut best = 0.0_f64;

    for skill in &candidate.skills {
        let years = skill.years_experience.unwrap_or(0.0);

        let skill_score = match lookups.post_weight_for_skill(&skill.skill_name) {
            Some(weight) => match (job.experience_min_years, job.experience_max_years) {
                (Some(min), Some(max)) if min > 0.0 && max > 0.0 => {
                    if years >= min && years <= max {
                        weight
                    } else if years < min {
                        (years / min) * weight * 0.7
                    } else {
                        // Overqualification tapers 5% per excess year, floored at half.
                        weight * (1.0 - (years - max) * 0.05).max(0.5)
                    }
                }
                _ => (years * 2.0).min(weight),
            },
            // Skill not tied to any role in the domain: token credit only.
            None => (years * 0.5).min(0.5),
        };

        best = best.max(skill_score);
    }

    best.min(10.0)
}

/// Skills: average of hierarchy-multiplier credit across matched skills and
/// domain-relevant courses, scaled by 5, capped at 10.
fn skills_score(candidate: &CandidateBundle, job: &JobCriteria, lookups: &DomainLookups) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u32;

    for skill in &candidate.skills {
        if let Some(multiplier) = lookups.hierarchy_multiplier(&skill.skill_name) {
            sum += multiplier * 2.0;
            count += 1;
        }
    }

    let domain_stem = job
        .domain
        .split('-')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if !domain_stem.is_empty() {
        for course in &candidate.courses {
            if course.to_lowercase().contains(&domain_stem) {
                sum += 1.0;
                count += 1;
            }
        }
    }

    if count > 0 {
        ((sum / f64::from(count)) * 5.0).min(10.0)
    } else {
        0.0
    }
}

/// Projects: best per-project keyword relevance, capped at 10.
/// Domain keywords count double; post keywords shorter than 4 chars are noise.
fn projects_score(candidate: &CandidateBundle, job: &JobCriteria) -> f64 {
    if candidate.projects.is_empty() {
        return 0.0;
    }

    let domain_keywords: Vec<String> = job
        .domain
        .split('-')
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect();
    let post_lower = job.post.to_lowercase();
    let post_keywords: Vec<&str> = post_lower.split(' ').filter(|k| k.len() > 3).collect();

    let mut best = 0.0_f64;
    for project in &candidate.projects {
        let text = format!(
            "{} {}",
            project.project_name,
            project.description.as_deref().unwrap_or_default()
        )
        .to_lowercase();

        let mut relevance = 0.0;
        for keyword in &domain_keywords {
            if text.contains(keyword.as_str()) {
                relevance += 2.0;
            }
        }
        for keyword in &post_keywords {
            if text.contains(keyword) {
                relevance += 1.0;
            }
        }
        best = best.max(relevance);
    }

    best.min(10.0)
}
