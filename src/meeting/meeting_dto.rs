use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    /// Client-supplied unique meeting id.
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub participant_names: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub creator: String,
}
