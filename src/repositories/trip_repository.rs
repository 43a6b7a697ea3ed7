use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::{TripRecord, TripSnapshot};
use crate::utils::errors::AppError;

/// Fila de la tabla trip_records
#[derive(Debug, sqlx::FromRow)]
pub struct TripRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TripRow {
    pub fn to_snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            id: Some(self.id),
            destination: self.destination.clone(),
            start_date: self.start_date.format("%Y-%m-%d").to_string(),
            end_date: self
                .end_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            description: self.description.clone(),
        }
    }
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, vehicle_id: Uuid, trip: &TripRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO trip_records (id, vehicle_id, destination, start_date, end_date, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(trip.id())
        .bind(vehicle_id)
        .bind(trip.destination())
        .bind(trip.start_date())
        .bind(trip.end_date())
        .bind(trip.description())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<TripRow>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(
            "SELECT * FROM trip_records WHERE vehicle_id = $1 ORDER BY start_date DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trip_records WHERE id = $1 AND vehicle_id = $2")
            .bind(id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
