use crate::error::Result;
use sqlx::PgPool;

use super::notification_models::Notification;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn create(&self, user_id: &str, message: &str) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, message)
             VALUES ($1, $2)
             RETURNING *"
        )
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Inserts a notification keyed by `dispatch_key`, doing nothing if a row
    /// with that key already exists. Returns whether a row was created.
    /// The unique index on `dispatch_key` serializes concurrent writers.
    pub async fn create_if_absent(
        &self,
        dispatch_key: &str,
        user_id: &str,
        message: &str,
    ) -> Result<bool> {
        let inserted: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO notifications (user_id, message, dispatch_key)
             VALUES ($1, $2, $3)
             ON CONFLICT (dispatch_key) DO NOTHING
             RETURNING id"
        )
        .bind(user_id)
        .bind(message)
        .bind(dispatch_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }
}
