use crate::{
    meeting::{self, CreateMeetingRequest, Meeting},
    notification::{self, CreateNotificationRequest, Notification},
    state::AppState,
};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        meeting::meeting_handlers::create_meeting,
        meeting::meeting_handlers::get_meetings,
        meeting::meeting_handlers::get_meetings_by_participant,
        notification::notification_handlers::create_notification,
        notification::notification_handlers::get_notifications,
    ),
    components(
        schemas(
            CreateMeetingRequest,
            CreateNotificationRequest,
            Meeting,
            Notification,
        )
    ),
    tags(
        (name = "meetings", description = "Meeting management endpoints"),
        (name = "notifications", description = "Notification endpoints")
    )
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/api/meetings",
            post(meeting::create_meeting).get(meeting::get_meetings),
        )
        .route(
            "/api/meetings/participant/:user_id",
            get(meeting::get_meetings_by_participant),
        )
        .route("/api/notifications", post(notification::create_notification))
        .route(
            "/api/notifications/:user_id",
            get(notification::get_notifications),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
