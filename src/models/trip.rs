use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::DateInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Destination and date range, as written by both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Body of `POST /trips` and `PUT /trips/{tripId}` before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBody {
    pub destination: Option<String>,
    pub starts_at: Option<DateInput>,
    pub ends_at: Option<DateInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripIdResponse {
    pub trip_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    pub trip: Trip,
}
