use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::{
    error::AppError,
    extract::{ApiJson, TripId},
    models::activity::{ActivityBody, ActivityIdResponse, CalendarResponse},
    services::activities,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/trips/:trip_id/activities",
        get(list_activities).post(create_activity),
    )
}

async fn list_activities(
    State(state): State<AppState>,
    TripId(trip_id): TripId,
) -> Result<Json<CalendarResponse>, AppError> {
    let activities = activities::list_activities(state.store.as_ref(), &trip_id).await?;
    Ok(Json(CalendarResponse { activities }))
}

async fn create_activity(
    State(state): State<AppState>,
    TripId(trip_id): TripId,
    ApiJson(body): ApiJson<ActivityBody>,
) -> Result<(StatusCode, Json<ActivityIdResponse>), AppError> {
    let activity = activities::parse_activity_body(body)?;
    let created = activities::create_activity(state.store.as_ref(), &trip_id, &activity).await?;
    Ok((
        StatusCode::CREATED,
        Json(ActivityIdResponse {
            activity_id: created.id,
        }),
    ))
}
