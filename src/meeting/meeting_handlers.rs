use crate::{
    error::Result,
    meeting::meeting_dto::CreateMeetingRequest,
    meeting::meeting_models::Meeting,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// Create a new meeting
#[utoipa::path(
    post,
    path = "/api/meetings",
    request_body = CreateMeetingRequest,
    responses(
        (status = 201, description = "Meeting created", body = Meeting),
        (status = 400, description = "Invalid payload or malformed date/time"),
        (status = 409, description = "Meeting id already exists")
    ),
    tag = "meetings"
)]
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(payload): Json<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<Meeting>)> {
    let meeting = state.meeting_service.create_meeting(payload).await?;

    Ok((StatusCode::CREATED, Json(meeting)))
}

/// List all meetings
#[utoipa::path(
    get,
    path = "/api/meetings",
    responses(
        (status = 200, description = "List of meetings", body = Vec<Meeting>)
    ),
    tag = "meetings"
)]
pub async fn get_meetings(State(state): State<AppState>) -> Result<Json<Vec<Meeting>>> {
    let meetings = state.meeting_service.list_meetings().await?;

    Ok(Json(meetings))
}

/// List meetings that include the given participant
#[utoipa::path(
    get,
    path = "/api/meetings/participant/{user_id}",
    params(
        ("user_id" = String, Path, description = "Participant identifier")
    ),
    responses(
        (status = 200, description = "Meetings for the participant", body = Vec<Meeting>)
    ),
    tag = "meetings"
)]
pub async fn get_meetings_by_participant(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Meeting>>> {
    let meetings = state.meeting_service.meetings_for_participant(&user_id).await?;

    Ok(Json(meetings))
}
