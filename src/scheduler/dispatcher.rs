use chrono::NaiveDateTime;
use futures::future::join_all;
use std::collections::HashSet;

use crate::meeting::meeting_models::Meeting;

use super::store::{NotificationStore, StoreError};

/// Idempotency key for one (meeting, participant, window) triple. The window
/// is identified by the meeting's parsed start instant, so rescheduling a
/// meeting opens a fresh window and participants are notified again.
pub fn dispatch_key(meeting_id: &str, participant_id: &str, starts_at: NaiveDateTime) -> String {
    format!(
        "{}:{}:{}",
        meeting_id,
        participant_id,
        starts_at.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Notification text, deterministic over the meeting's name, time and url.
pub fn start_message(meeting: &Meeting) -> String {
    format!(
        "Meeting \"{}\" is starting at {}. Join: {}",
        meeting.name, meeting.time, meeting.url
    )
}

#[derive(Debug)]
pub struct DispatchFailure {
    pub meeting_id: String,
    pub participant_id: String,
    pub error: StoreError,
}

/// Result of dispatching one imminent meeting. Suppressed writes are rows
/// that already existed for the key, not errors.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub created: usize,
    pub suppressed: usize,
    pub failures: Vec<DispatchFailure>,
}

pub struct Dispatcher<N> {
    notifications: N,
}

impl<N: NotificationStore> Dispatcher<N> {
    pub fn new(notifications: N) -> Self {
        Self { notifications }
    }

    /// Writes one notification per distinct participant of `meeting`.
    /// Writes run concurrently; each is independent, so one participant's
    /// failure never blocks the others. Duplicate participant ids collapse
    /// to a single notification (first occurrence wins).
    pub async fn dispatch(&self, meeting: &Meeting, starts_at: NaiveDateTime) -> DispatchOutcome {
        let message = start_message(meeting);

        let mut seen = HashSet::new();
        let participants: Vec<&str> = meeting
            .participants
            .iter()
            .map(String::as_str)
            .filter(|p| seen.insert(*p))
            .collect();

        let writes = participants.into_iter().map(|participant| {
            let key = dispatch_key(&meeting.id, participant, starts_at);
            let message = &message;
            async move {
                let result = self
                    .notifications
                    .create_if_absent(&key, participant, message)
                    .await;
                (participant, result)
            }
        });

        let mut outcome = DispatchOutcome::default();
        for (participant, result) in join_all(writes).await {
            match result {
                Ok(true) => outcome.created += 1,
                Ok(false) => outcome.suppressed += 1,
                Err(error) => outcome.failures.push(DispatchFailure {
                    meeting_id: meeting.id.clone(),
                    participant_id: participant.to_string(),
                    error,
                }),
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::store::testing::{meeting, FakeNotificationStore};
    use std::sync::Arc;

    fn starts_at() -> NaiveDateTime {
        "2025-08-15T10:03:00".parse().unwrap()
    }

    #[test]
    fn dispatch_key_is_deterministic() {
        let a = dispatch_key("m1", "u1", starts_at());
        let b = dispatch_key("m1", "u1", starts_at());
        assert_eq!(a, b);
        assert_eq!(a, "m1:u1:2025-08-15T10:03:00");
    }

    #[test]
    fn dispatch_key_distinguishes_participants_and_windows() {
        let base = dispatch_key("m1", "u1", starts_at());
        assert_ne!(base, dispatch_key("m1", "u2", starts_at()));
        assert_ne!(base, dispatch_key("m2", "u1", starts_at()));
        assert_ne!(
            base,
            dispatch_key("m1", "u1", "2025-08-15T11:03:00".parse().unwrap())
        );
    }

    #[test]
    fn message_contains_name_time_and_url() {
        let m = meeting("m1", "2025-08-15", "10:03:00", &["u1"]);
        let message = start_message(&m);
        assert!(message.contains(&m.name));
        assert!(message.contains("10:03:00"));
        assert!(message.contains(&m.url));
    }

    #[tokio::test]
    async fn notifies_each_participant_once() {
        let store = Arc::new(FakeNotificationStore::default());
        let dispatcher = Dispatcher::new(store.clone());
        let m = meeting("m1", "2025-08-15", "10:03:00", &["u1", "u2", "u3"]);

        let outcome = dispatcher.dispatch(&m, starts_at()).await;

        assert_eq!(outcome.created, 3);
        assert_eq!(outcome.suppressed, 0);
        assert!(outcome.failures.is_empty());
        let mut users = store.users_notified();
        users.sort();
        assert_eq!(users, vec!["u1", "u2", "u3"]);
    }

    #[tokio::test]
    async fn duplicate_participants_get_a_single_notification() {
        let store = Arc::new(FakeNotificationStore::default());
        let dispatcher = Dispatcher::new(store.clone());
        let m = meeting("m1", "2025-08-15", "10:03:00", &["u1", "u1", "u2"]);

        let outcome = dispatcher.dispatch(&m, starts_at()).await;

        assert_eq!(outcome.created, 2);
        assert_eq!(store.row_count(), 2);
    }

    #[tokio::test]
    async fn empty_participants_is_a_no_op() {
        let store = Arc::new(FakeNotificationStore::default());
        let dispatcher = Dispatcher::new(store.clone());
        let m = meeting("m1", "2025-08-15", "10:03:00", &[]);

        let outcome = dispatcher.dispatch(&m, starts_at()).await;

        assert_eq!(outcome.created, 0);
        assert!(outcome.failures.is_empty());
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn redispatch_within_same_window_is_suppressed() {
        let store = Arc::new(FakeNotificationStore::default());
        let dispatcher = Dispatcher::new(store.clone());
        let m = meeting("m1", "2025-08-15", "10:03:00", &["u1", "u2"]);

        let first = dispatcher.dispatch(&m, starts_at()).await;
        let second = dispatcher.dispatch(&m, starts_at()).await;

        assert_eq!(first.created, 2);
        assert_eq!(second.created, 0);
        assert_eq!(second.suppressed, 2);
        assert_eq!(store.row_count(), 2);
    }

    #[tokio::test]
    async fn one_failing_participant_does_not_block_the_others() {
        let store = Arc::new(FakeNotificationStore::failing_for(["u2"]));
        let dispatcher = Dispatcher::new(store.clone());
        let m = meeting("m1", "2025-08-15", "10:03:00", &["u1", "u2", "u3"]);

        let outcome = dispatcher.dispatch(&m, starts_at()).await;

        assert_eq!(outcome.created, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].participant_id, "u2");
        let mut users = store.users_notified();
        users.sort();
        assert_eq!(users, vec!["u1", "u3"]);
    }
}
