use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::AppError,
    extract::{ApiJson, TripId},
    models::trip::{TripBody, TripIdResponse, TripResponse},
    services::trips,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", post(create_trip))
        .route("/trips/:trip_id", get(get_trip).put(update_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TripBody>,
) -> Result<(StatusCode, Json<TripIdResponse>), AppError> {
    let details = trips::parse_trip_body(body)?;
    let trip = trips::create_trip(state.store.as_ref(), state.clock.as_ref(), &details).await?;
    Ok((StatusCode::CREATED, Json(TripIdResponse { trip_id: trip.id })))
}

async fn get_trip(
    State(state): State<AppState>,
    TripId(trip_id): TripId,
) -> Result<Json<TripResponse>, AppError> {
    let trip = trips::get_trip(state.store.as_ref(), &trip_id).await?;
    Ok(Json(TripResponse { trip }))
}

async fn update_trip(
    State(state): State<AppState>,
    TripId(trip_id): TripId,
    ApiJson(body): ApiJson<TripBody>,
) -> Result<Json<TripIdResponse>, AppError> {
    let details = trips::parse_trip_body(body)?;
    let trip_id =
        trips::update_trip(state.store.as_ref(), state.clock.as_ref(), &trip_id, &details).await?;
    Ok(Json(TripIdResponse { trip_id }))
}
