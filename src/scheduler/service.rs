use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::clock::Clock;
use super::dispatcher::Dispatcher;
use super::imminence::evaluate;
use super::store::{MeetingStore, NotificationStore, StoreError};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval between scans.
    pub tick: Duration,
    /// "Starting soon" window.
    pub window: chrono::Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(60),
            window: chrono::Duration::minutes(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum CycleError {
    /// Fetching the meeting list failed; there is nothing to evaluate, so the
    /// whole cycle is abandoned and retried on the next tick.
    #[error("meeting store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(Debug, Default, PartialEq)]
pub struct CycleSummary {
    pub scanned: usize,
    pub imminent: usize,
    pub notified: usize,
    pub suppressed: usize,
    pub failed: usize,
    pub anomalies: usize,
}

/// Background scan-and-notify loop. Periodically reads all meetings, filters
/// the ones inside the notification window and writes one notification per
/// participant through the idempotent dispatch path.
pub struct AutoStartScheduler<C, M, N> {
    clock: C,
    meetings: M,
    dispatcher: Dispatcher<N>,
    config: SchedulerConfig,
}

impl<C, M, N> AutoStartScheduler<C, M, N>
where
    C: Clock,
    M: MeetingStore,
    N: NotificationStore,
{
    pub fn new(clock: C, meetings: M, notifications: N, config: SchedulerConfig) -> Self {
        Self {
            clock,
            meetings,
            dispatcher: Dispatcher::new(notifications),
            config,
        }
    }

    /// Runs until `shutdown` flips to true. Cycles never overlap: the next
    /// tick is only polled after the previous cycle finished, and ticks that
    /// fired in the meantime are skipped. On shutdown an in-flight cycle
    /// runs to completion before the loop exits.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Auto-start scheduler running (tick {:?}, window {} min)",
            self.config.tick,
            self.config.window.num_minutes()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(summary) => info!(
                            "Cycle complete: {} scanned, {} imminent, {} notified, {} suppressed, {} failed, {} anomalies",
                            summary.scanned,
                            summary.imminent,
                            summary.notified,
                            summary.suppressed,
                            summary.failed,
                            summary.anomalies,
                        ),
                        // A failed cycle never halts the loop; retried next tick.
                        Err(e) => error!("Cycle aborted: {}", e),
                    }
                }
                _ = shutdown.changed() => {
                    info!("Auto-start scheduler shutting down");
                    break;
                }
            }
        }
    }

    /// One scan-evaluate-dispatch cycle at the clock's current instant.
    pub async fn run_cycle(&self) -> Result<CycleSummary, CycleError> {
        let meetings = self.meetings.list_all().await?;
        let now = self.clock.now();

        let mut summary = CycleSummary {
            scanned: meetings.len(),
            ..Default::default()
        };

        let evaluation = evaluate(now, self.config.window, meetings);
        summary.imminent = evaluation.imminent.len();
        summary.anomalies = evaluation.anomalies.len();

        for anomaly in &evaluation.anomalies {
            warn!("Skipping meeting {}: {}", anomaly.meeting_id, anomaly.reason);
        }

        for imminent in &evaluation.imminent {
            let outcome = self
                .dispatcher
                .dispatch(&imminent.meeting, imminent.starts_at)
                .await;

            for failure in &outcome.failures {
                warn!(
                    "Failed to notify {} for meeting {}: {}",
                    failure.participant_id, failure.meeting_id, failure.error
                );
            }

            summary.notified += outcome.created;
            summary.suppressed += outcome.suppressed;
            summary.failed += outcome.failures.len();
        }

        Ok(summary)
    }
}
