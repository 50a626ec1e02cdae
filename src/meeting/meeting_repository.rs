use crate::error::Result;
use sqlx::PgPool;

use super::meeting_dto::CreateMeetingRequest;
use super::meeting_models::Meeting;

#[derive(Clone)]
pub struct MeetingRepository {
    pool: PgPool,
}

impl MeetingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Meeting>> {
        let meetings = sqlx::query_as::<_, Meeting>(
            "SELECT * FROM meetings ORDER BY date, time"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings)
    }

    pub async fn find_by_participant(&self, user_id: &str) -> Result<Vec<Meeting>> {
        let meetings = sqlx::query_as::<_, Meeting>(
            "SELECT * FROM meetings WHERE $1 = ANY(participants) ORDER BY date, time"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings)
    }

    pub async fn create(&self, payload: &CreateMeetingRequest) -> Result<Meeting> {
        let meeting = sqlx::query_as::<_, Meeting>(
            "INSERT INTO meetings (id, name, date, time, participants, participant_names, url, creator)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
        .bind(&payload.id)
        .bind(&payload.name)
        .bind(&payload.date)
        .bind(&payload.time)
        .bind(&payload.participants)
        .bind(&payload.participant_names)
        .bind(&payload.url)
        .bind(&payload.creator)
        .fetch_one(&self.pool)
        .await?;

        Ok(meeting)
    }
}
