//! Auto-start notification scheduler: a background loop that scans meetings
//! on a fixed cadence and notifies participants of the ones starting soon,
//! at most once per (meeting, participant, window).

// Declare submodules
pub mod clock;
pub mod dispatcher;
pub mod imminence;
pub mod service;
pub mod store;

// Re-export public items
pub use clock::{Clock, SystemClock};
pub use dispatcher::{dispatch_key, start_message, DispatchOutcome, Dispatcher};
pub use imminence::{evaluate, parse_start_instant, Anomaly, Evaluation};
pub use service::{AutoStartScheduler, CycleError, CycleSummary, SchedulerConfig};
pub use store::{MeetingStore, NotificationStore, StoreError};
