use std::sync::Arc;

use crate::{clock::Clock, db::DbPool, services::store::TripStore};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub store: Arc<dyn TripStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DbPool, store: Arc<dyn TripStore>, clock: Arc<dyn Clock>) -> Self {
        Self { db, store, clock }
    }
}
