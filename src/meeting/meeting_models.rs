use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A scheduled meeting. `date` and `time` are kept as the client-supplied
/// strings (`YYYY-MM-DD` / `HH:MM[:SS]`) and together denote a single
/// wall-clock start instant; there is no timezone normalization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub participants: Vec<String>,
    /// Display names parallel to `participants`; not authoritative for scheduling.
    pub participant_names: Vec<String>,
    pub url: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
}
