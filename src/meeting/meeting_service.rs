use crate::error::{AppError, Result};
use crate::meeting::meeting_dto::CreateMeetingRequest;
use crate::meeting::meeting_models::Meeting;
use crate::meeting::meeting_repository::MeetingRepository;
use crate::scheduler::imminence::parse_start_instant;
use validator::Validate;

/// Service layer for meeting-related business logic.
#[derive(Clone)]
pub struct MeetingService {
    repo: MeetingRepository,
}

impl MeetingService {
    pub fn new(repo: MeetingRepository) -> Self {
        Self { repo }
    }

    pub async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        self.repo.find_all().await
    }

    pub async fn meetings_for_participant(&self, user_id: &str) -> Result<Vec<Meeting>> {
        self.repo.find_by_participant(user_id).await
    }

    /// Creates a meeting. Malformed `date`/`time` is rejected here so the
    /// store never holds a record the scheduler cannot evaluate.
    pub async fn create_meeting(&self, payload: CreateMeetingRequest) -> Result<Meeting> {
        payload.validate()?;

        parse_start_instant(&payload.date, &payload.time)
            .map_err(AppError::BadRequest)?;

        match self.repo.create(&payload).await {
            Err(AppError::Database(e)) if is_unique_violation(&e) => Err(AppError::Conflict(
                format!("Meeting with id '{}' already exists", payload.id),
            )),
            other => other,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
