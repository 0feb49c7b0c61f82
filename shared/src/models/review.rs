//! Review Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// Review attached to a completed booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update review payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewPayload {
    pub rating: u8,
    pub comment: String,
}
