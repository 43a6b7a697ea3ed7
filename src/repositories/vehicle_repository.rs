use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{Rehydrated, Vehicle, VehicleKind, VehicleSnapshot};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::AppError;

/// Fila de la tabla vehicles (schema canónico: el estado transitorio se
/// persiste para todas las variantes)
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub tipo: String,
    pub model: String,
    pub color: String,
    pub max_speed: f64,
    pub is_running: bool,
    pub speed: f64,
    pub turbo_engaged: bool,
    pub cargo_capacity: Option<f64>,
    pub current_load: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vehículo cargado del almacenamiento, ya rehidratado
pub struct StoredVehicle {
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rehydrated: Rehydrated,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, owner_id: Uuid, vehicle: &Vehicle) -> Result<(), AppError> {
        let (turbo_engaged, cargo_capacity, current_load) = kind_columns(vehicle.kind());

        sqlx::query(
            r#"
            INSERT INTO vehicles
                (id, owner_id, tipo, model, color, max_speed, is_running, speed,
                 turbo_engaged, cargo_capacity, current_load, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            "#,
        )
        .bind(vehicle.id())
        .bind(owner_id)
        .bind(vehicle.kind().label())
        .bind(vehicle.model())
        .bind(vehicle.color())
        .bind(vehicle.max_speed())
        .bind(vehicle.is_running())
        .bind(vehicle.speed())
        .bind(turbo_engaged)
        .bind(cargo_capacity)
        .bind(current_load)
        .bind(vehicle.image())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persiste el estado actual del vehículo (campos descriptivos y
    /// transitorios; los historiales viven en sus propias tablas)
    pub async fn save_state(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        let (turbo_engaged, cargo_capacity, current_load) = kind_columns(vehicle.kind());

        sqlx::query(
            r#"
            UPDATE vehicles
            SET model = $2, color = $3, max_speed = $4, is_running = $5, speed = $6,
                turbo_engaged = $7, cargo_capacity = $8, current_load = $9, image = $10,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vehicle.id())
        .bind(vehicle.model())
        .bind(vehicle.color())
        .bind(vehicle.max_speed())
        .bind(vehicle.is_running())
        .bind(vehicle.speed())
        .bind(turbo_engaged)
        .bind(cargo_capacity)
        .bind(current_load)
        .bind(vehicle.image())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_row(&self, id: Uuid) -> Result<Option<VehicleRow>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_rows_by_owner(&self, owner_id: Uuid) -> Result<Vec<VehicleRow>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Carga y rehidrata un vehículo completo (con sus historiales)
    pub async fn load(&self, id: Uuid) -> Result<Option<StoredVehicle>, AppError> {
        let row = match self.find_row(id).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        let maintenance = MaintenanceRepository::new(self.pool.clone())
            .list_by_vehicle(row.id)
            .await?;
        let trips = TripRepository::new(self.pool.clone())
            .list_by_vehicle(row.id)
            .await?;

        let owner_id = row.owner_id;
        let created_at = row.created_at;
        let updated_at = row.updated_at;

        let mut snapshot = row_to_snapshot(row)?;
        snapshot.maintenance_history = maintenance.iter().map(|r| r.to_snapshot()).collect();
        snapshot.trip_history = trips.iter().map(|t| t.to_snapshot()).collect();

        let rehydrated = Vehicle::rehydrate(snapshot)
            .map_err(|e| AppError::Internal(format!("veículo {} corrompido: {}", id, e)))?;
        if !rehydrated.dropped.is_empty() {
            log::warn!(
                "⚠️ Veículo {}: {} registro(s) descartado(s) na rehidratação",
                id,
                rehydrated.dropped.len()
            );
        }

        Ok(Some(StoredVehicle {
            owner_id,
            created_at,
            updated_at,
            rehydrated,
        }))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // los historiales caen en cascada (FK ON DELETE CASCADE)
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Descompone la variante en las columnas específicas del schema
fn kind_columns(kind: &VehicleKind) -> (bool, Option<f64>, f64) {
    match kind {
        VehicleKind::Car => (false, None, 0.0),
        VehicleKind::SportsCar { turbo_engaged } => (*turbo_engaged, None, 0.0),
        VehicleKind::Truck {
            cargo_capacity,
            current_load,
        } => (false, Some(*cargo_capacity), *current_load),
    }
}

/// Reconstruye el snapshot a partir de la fila (sin historiales)
fn row_to_snapshot(row: VehicleRow) -> Result<VehicleSnapshot, AppError> {
    let kind = match row.tipo.as_str() {
        "Carro" => VehicleKind::Car,
        "CarroEsportivo" => VehicleKind::SportsCar {
            turbo_engaged: row.turbo_engaged,
        },
        "Caminhao" => VehicleKind::Truck {
            cargo_capacity: row.cargo_capacity.ok_or_else(|| {
                AppError::Internal(format!("caminhão {} sem capacidade de carga", row.id))
            })?,
            current_load: row.current_load,
        },
        other => {
            return Err(AppError::Internal(format!(
                "tipo de veículo desconhecido: {}",
                other
            )))
        }
    };

    Ok(VehicleSnapshot {
        id: Some(row.id),
        kind,
        model: row.model,
        color: row.color,
        max_speed: Some(row.max_speed),
        is_running: row.is_running,
        speed: row.speed,
        image: row.image,
        maintenance_history: Vec::new(),
        trip_history: Vec::new(),
    })
}
