use tracing::{debug, info};

use crate::{
    error::AppError,
    models::activity::{Activity, ActivityBody, DayBucket, NewActivity},
    services::{calendar::build_calendar, store::TripStore},
    validation::{min_len, parse_date, required, ValidationErrors},
};

pub const INVALID_ACTIVITY_DATE: &str = "Invalid activity date";

const MIN_TITLE_LEN: usize = 4;

pub fn parse_activity_body(body: ActivityBody) -> Result<NewActivity, AppError> {
    let mut errors = ValidationErrors::new();
    let title = errors.check(
        "title",
        required(body.title).and_then(|t| min_len(t, MIN_TITLE_LEN)),
    );
    let date = errors.check("date", parse_date(body.date));

    match (title, date) {
        (Some(title), Some(date)) if errors.is_empty() => Ok(NewActivity { title, date }),
        _ => Err(errors.into()),
    }
}

/// Adds an activity to a trip; its date must fall within the trip's range.
pub async fn create_activity(
    store: &dyn TripStore,
    trip_id: &str,
    activity: &NewActivity,
) -> Result<Activity, AppError> {
    let trip = store
        .find_trip_by_id(trip_id)
        .await?
        .ok_or_else(AppError::trip_not_found)?;

    if activity.date < trip.starts_at || activity.date > trip.ends_at {
        debug!(%trip_id, date = %activity.date, "activity outside trip range");
        return Err(AppError::InvalidArgument(INVALID_ACTIVITY_DATE.into()));
    }

    let created = store.create_activity(trip_id, activity).await?;
    info!(%trip_id, activity_id = %created.id, "activity created");
    Ok(created)
}

/// The trip's activities grouped per day of the trip.
pub async fn list_activities(
    store: &dyn TripStore,
    trip_id: &str,
) -> Result<Vec<DayBucket>, AppError> {
    let (trip, activities) = store
        .find_trip_with_activities(trip_id)
        .await?
        .ok_or_else(AppError::trip_not_found)?;

    Ok(build_calendar(trip.starts_at, trip.ends_at, &activities))
}
