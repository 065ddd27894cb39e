use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

use super::store::{create_profile, get_profile_view, CreateProfileRequest, ProfileView};

#[derive(Serialize)]
pub struct CreateProfileResponse {
    pub message: String,
    pub profile_id: Uuid,
}

/// POST /api/v1/profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<CreateProfileResponse>), AppError> {
    let profile_id = create_profile(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateProfileResponse {
            message: "Profile created successfully".to_string(),
            profile_id,
        }),
    ))
}

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileView>, AppError> {
    let view = get_profile_view(&state.db, user_id).await?;
    Ok(Json(view))
}
