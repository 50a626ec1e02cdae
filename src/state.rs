use crate::meeting::meeting_repository::MeetingRepository;
use crate::meeting::meeting_service::MeetingService;
use crate::notification::notification_repository::NotificationRepository;

#[derive(Clone)]
pub struct AppState {
    pub meeting_repository: MeetingRepository,
    pub notification_repository: NotificationRepository,
    pub meeting_service: MeetingService,
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    /// Seconds between scheduler scans.
    pub scheduler_tick_seconds: u64,
    /// Size of the "starting soon" window in minutes.
    pub notify_window_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()),
            scheduler_tick_seconds: std::env::var("SCHEDULER_TICK_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("SCHEDULER_TICK_SECONDS must be a number"),
            notify_window_minutes: std::env::var("NOTIFY_WINDOW_MINUTES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("NOTIFY_WINDOW_MINUTES must be a number"),
        }
    }
}
