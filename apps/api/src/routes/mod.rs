pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route(
            "/api/v1/auth/register/candidate",
            post(auth::handle_register_candidate),
        )
        .route(
            "/api/v1/auth/login/candidate",
            post(auth::handle_login_candidate),
        )
        .route(
            "/api/v1/auth/register/recruiter",
            post(auth::handle_register_recruiter),
        )
        .route(
            "/api/v1/auth/login/recruiter",
            post(auth::handle_login_recruiter),
        )
        // Candidate profiles
        .route("/api/v1/profiles", post(profiles::handle_create_profile))
        .route(
            "/api/v1/profiles/:user_id",
            get(profiles::handle_get_profile),
        )
        // Job postings
        .route("/api/v1/jobs", post(jobs::handle_create_job))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/status", put(jobs::handle_set_job_status))
        .route(
            "/api/v1/recruiters/:id/jobs",
            get(jobs::handle_list_recruiter_jobs),
        )
        .route("/api/v1/domains", get(jobs::handle_list_domains))
        // Matching
        .route(
            "/api/v1/jobs/:id/find-matches",
            post(matching::handle_find_matches),
        )
        .route("/api/v1/jobs/:id/matches", get(matching::handle_get_matches))
        .with_state(state)
}
