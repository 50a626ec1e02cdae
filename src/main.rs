mod db;
mod error;
mod meeting;
mod notification;
mod routes;
mod scheduler;
mod state;

use db::{create_pool, run_migrations};
use meeting::{MeetingRepository, MeetingService};
use notification::NotificationRepository;
use routes::create_router;
use scheduler::{AutoStartScheduler, SchedulerConfig, SystemClock};
use state::{AppState, Config};
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,meeting_scheduler=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories and services
    let meeting_repository = MeetingRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());
    let meeting_service = MeetingService::new(meeting_repository.clone());

    // Start the auto-start notification scheduler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let auto_start = AutoStartScheduler::new(
        SystemClock,
        meeting_repository.clone(),
        notification_repository.clone(),
        SchedulerConfig {
            tick: Duration::from_secs(config.scheduler_tick_seconds),
            window: chrono::Duration::minutes(config.notify_window_minutes),
        },
    );
    let scheduler_handle = tokio::spawn(auto_start.run(shutdown_rx));

    // Create application state
    let state = AppState {
        meeting_repository,
        notification_repository,
        meeting_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let an in-flight scheduler cycle finish before exiting
    let _ = shutdown_tx.send(true);
    scheduler_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
