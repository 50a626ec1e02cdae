use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::meeting::meeting_models::Meeting;
use crate::meeting::meeting_repository::MeetingRepository;
use crate::notification::notification_repository::NotificationRepository;

/// Transient store failure. The scheduler retries on the next tick rather
/// than inside the cycle.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError(err.to_string())
    }
}

impl From<crate::error::AppError> for StoreError {
    fn from(err: crate::error::AppError) -> Self {
        StoreError(err.to_string())
    }
}

/// Read side consumed by the scheduler loop.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Meeting>, StoreError>;
}

/// Write side consumed by the dispatcher. `create_if_absent` must be atomic
/// per key so concurrent writers for one (meeting, participant, window)
/// collapse to a single row.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_if_absent(
        &self,
        dispatch_key: &str,
        user_id: &str,
        message: &str,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
impl<T: MeetingStore + ?Sized> MeetingStore for Arc<T> {
    async fn list_all(&self) -> Result<Vec<Meeting>, StoreError> {
        (**self).list_all().await
    }
}

#[async_trait]
impl<T: NotificationStore + ?Sized> NotificationStore for Arc<T> {
    async fn create_if_absent(
        &self,
        dispatch_key: &str,
        user_id: &str,
        message: &str,
    ) -> Result<bool, StoreError> {
        (**self).create_if_absent(dispatch_key, user_id, message).await
    }
}

#[async_trait]
impl MeetingStore for MeetingRepository {
    async fn list_all(&self) -> Result<Vec<Meeting>, StoreError> {
        Ok(self.find_all().await?)
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create_if_absent(
        &self,
        dispatch_key: &str,
        user_id: &str,
        message: &str,
    ) -> Result<bool, StoreError> {
        Ok(NotificationRepository::create_if_absent(self, dispatch_key, user_id, message).await?)
    }
}
