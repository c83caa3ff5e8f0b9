use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    clock::Clock,
    error::AppError,
    models::trip::{Trip, TripBody, TripDetails},
    services::store::TripStore,
    validation::{min_len, parse_date, required, ValidationErrors},
};

pub const INVALID_START_DATE: &str = "Invalid trip start date";
pub const INVALID_END_DATE: &str = "Invalid trip end date";

const MIN_DESTINATION_LEN: usize = 4;

pub fn parse_trip_body(body: TripBody) -> Result<TripDetails, AppError> {
    let mut errors = ValidationErrors::new();
    let destination = errors.check(
        "destination",
        required(body.destination).and_then(|d| min_len(d, MIN_DESTINATION_LEN)),
    );
    let starts_at = errors.check("startsAt", parse_date(body.starts_at));
    let ends_at = errors.check("endsAt", parse_date(body.ends_at));

    match (destination, starts_at, ends_at) {
        (Some(destination), Some(starts_at), Some(ends_at)) if errors.is_empty() => {
            Ok(TripDetails {
                destination,
                starts_at,
                ends_at,
            })
        }
        _ => Err(errors.into()),
    }
}

/// The start may not lie before the current instant and the end may not
/// precede the start.
pub fn check_trip_dates(
    clock: &dyn Clock,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<(), AppError> {
    if starts_at < clock.now() {
        debug!(%starts_at, "rejecting trip start in the past");
        return Err(AppError::InvalidArgument(INVALID_START_DATE.into()));
    }
    if ends_at < starts_at {
        debug!(%starts_at, %ends_at, "rejecting trip ending before it starts");
        return Err(AppError::InvalidArgument(INVALID_END_DATE.into()));
    }
    Ok(())
}

pub async fn create_trip(
    store: &dyn TripStore,
    clock: &dyn Clock,
    details: &TripDetails,
) -> Result<Trip, AppError> {
    check_trip_dates(clock, details.starts_at, details.ends_at)?;
    let trip = store.create_trip(details).await?;
    info!(trip_id = %trip.id, destination = %trip.destination, "trip created");
    Ok(trip)
}

pub async fn get_trip(store: &dyn TripStore, trip_id: &str) -> Result<Trip, AppError> {
    store
        .find_trip_by_id(trip_id)
        .await?
        .ok_or_else(AppError::trip_not_found)
}

/// Validates and applies new trip details, returning the trip id.
///
/// The start date is always checked against the current instant, even when
/// it is unchanged, so a trip that has already begun can no longer be edited.
pub async fn update_trip(
    store: &dyn TripStore,
    clock: &dyn Clock,
    trip_id: &str,
    details: &TripDetails,
) -> Result<String, AppError> {
    if store.find_trip_by_id(trip_id).await?.is_none() {
        return Err(AppError::trip_not_found());
    }
    check_trip_dates(clock, details.starts_at, details.ends_at)?;

    store.update_trip(trip_id, details).await?;
    info!(%trip_id, "trip updated");
    Ok(trip_id.to_string())
}
