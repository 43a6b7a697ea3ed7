use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::{MaintenanceRecord, MaintenanceSnapshot};
use crate::utils::errors::AppError;

/// Fila de la tabla maintenance_records
#[derive(Debug, sqlx::FromRow)]
pub struct MaintenanceRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub service_type: String,
    pub cost: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRow {
    /// Representación cruda para la frontera de rehidratación
    pub fn to_snapshot(&self) -> MaintenanceSnapshot {
        MaintenanceSnapshot {
            id: Some(self.id),
            date: self.date.format("%Y-%m-%d").to_string(),
            service_type: self.service_type.clone(),
            cost: self.cost.to_f64().unwrap_or(0.0),
            description: self.description.clone(),
        }
    }
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        vehicle_id: Uuid,
        record: &MaintenanceRecord,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, date, service_type, cost, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(record.id())
        .bind(vehicle_id)
        .bind(record.date())
        .bind(record.service_type())
        .bind(record.cost())
        .bind(record.description())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRow>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenance_records WHERE vehicle_id = $1 ORDER BY date DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM maintenance_records WHERE id = $1 AND vehicle_id = $2")
                .bind(id)
                .bind(vehicle_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
