use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::DateInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    #[sqlx(rename = "occurs_at")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub title: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityBody {
    pub title: Option<String>,
    pub date: Option<DateInput>,
}

/// One calendar day of a trip and the activities planned on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: DateTime<Utc>,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarResponse {
    pub activities: Vec<DayBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityIdResponse {
    pub activity_id: String,
}
