use crate::{
    error::Result,
    notification::notification_dto::CreateNotificationRequest,
    notification::notification_models::Notification,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// Create a notification for a user
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 400, description = "Invalid payload")
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>)> {
    payload.validate()?;

    let notification = state
        .notification_repository
        .create(&payload.user_id, &payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// List notifications for a user, newest first
#[utoipa::path(
    get,
    path = "/api/notifications/{user_id}",
    params(
        ("user_id" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "List of notifications", body = Vec<Notification>)
    ),
    tag = "notifications"
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Notification>>> {
    let notifications = state
        .notification_repository
        .find_all_by_user(&user_id)
        .await?;

    Ok(Json(notifications))
}
