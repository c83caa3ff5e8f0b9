use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        activity::{Activity, NewActivity},
        trip::{Trip, TripDetails},
    },
};

/// Persistence for trips and their activities.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn create_trip(&self, details: &TripDetails) -> Result<Trip, AppError>;

    async fn find_trip_by_id(&self, trip_id: &str) -> Result<Option<Trip>, AppError>;

    /// The trip plus its activities, ordered by date ascending.
    async fn find_trip_with_activities(
        &self,
        trip_id: &str,
    ) -> Result<Option<(Trip, Vec<Activity>)>, AppError>;

    /// Writes destination and both dates in a single statement.
    async fn update_trip(&self, trip_id: &str, details: &TripDetails) -> Result<(), AppError>;

    async fn create_activity(
        &self,
        trip_id: &str,
        activity: &NewActivity,
    ) -> Result<Activity, AppError>;
}

#[derive(Clone)]
pub struct SqliteTripStore {
    db: DbPool,
}

impl SqliteTripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TripStore for SqliteTripStore {
    async fn create_trip(&self, details: &TripDetails) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"INSERT INTO trips (id, destination, starts_at, ends_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)
               RETURNING id, destination, starts_at, ends_at, created_at"#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&details.destination)
        .bind(details.starts_at)
        .bind(details.ends_at)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(trip)
    }

    async fn find_trip_by_id(&self, trip_id: &str) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, destination, starts_at, ends_at, created_at FROM trips WHERE id = ?1",
        )
        .bind(trip_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(trip)
    }

    async fn find_trip_with_activities(
        &self,
        trip_id: &str,
    ) -> Result<Option<(Trip, Vec<Activity>)>, AppError> {
        let Some(trip) = self.find_trip_by_id(trip_id).await? else {
            return Ok(None);
        };
        let activities = sqlx::query_as::<_, Activity>(
            r#"SELECT id, trip_id, title, occurs_at FROM activities
               WHERE trip_id = ?1
               ORDER BY occurs_at ASC, rowid ASC"#,
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(Some((trip, activities)))
    }

    async fn update_trip(&self, trip_id: &str, details: &TripDetails) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET destination = ?1, starts_at = ?2, ends_at = ?3 WHERE id = ?4")
            .bind(&details.destination)
            .bind(details.starts_at)
            .bind(details.ends_at)
            .bind(trip_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn create_activity(
        &self,
        trip_id: &str,
        activity: &NewActivity,
    ) -> Result<Activity, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"INSERT INTO activities (id, trip_id, title, occurs_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)
               RETURNING id, trip_id, title, occurs_at"#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(trip_id)
        .bind(&activity.title)
        .bind(activity.date)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone};

    use super::*;
    use crate::db::test_pool;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, d, h, 0, 0).unwrap()
    }

    fn lisbon() -> TripDetails {
        TripDetails {
            destination: "Lisbon".into(),
            starts_at: at(1, 0),
            ends_at: at(4, 0),
        }
    }

    #[tokio::test]
    async fn trip_round_trips_through_sqlite() {
        let store = SqliteTripStore::new(test_pool().await);
        let created = store.create_trip(&lisbon()).await.unwrap();

        let found = store.find_trip_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.starts_at, at(1, 0));
        assert!(store.find_trip_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn activities_come_back_sorted_by_date() {
        let store = SqliteTripStore::new(test_pool().await);
        let trip = store.create_trip(&lisbon()).await.unwrap();
        for (title, date) in [("Tram 28", at(2, 15)), ("Belem tower", at(1, 9)), ("Fado night", at(2, 9))] {
            store
                .create_activity(&trip.id, &NewActivity { title: title.into(), date })
                .await
                .unwrap();
        }

        let (_, activities) = store.find_trip_with_activities(&trip.id).await.unwrap().unwrap();
        let titles: Vec<_> = activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Belem tower", "Fado night", "Tram 28"]);
        assert!(activities.iter().all(|a| a.trip_id == trip.id));
    }

    #[tokio::test]
    async fn update_overwrites_all_three_fields() {
        let store = SqliteTripStore::new(test_pool().await);
        let trip = store.create_trip(&lisbon()).await.unwrap();
        let details = TripDetails {
            destination: "Porto".into(),
            starts_at: at(10, 0),
            ends_at: at(12, 0),
        };
        store.update_trip(&trip.id, &details).await.unwrap();

        let found = store.find_trip_by_id(&trip.id).await.unwrap().unwrap();
        assert_eq!(found.destination, "Porto");
        assert_eq!((found.starts_at, found.ends_at), (at(10, 0), at(12, 0)));
        assert_eq!(found.created_at, trip.created_at);
    }
}
