//! Sincronización de vehículos
//!
//! Colaborador de persistencia invocado tras cada mutación de historial.
//! Best-effort: un fallo se registra pero no se propaga a la operación
//! que lo disparó (el estado en memoria ya es consistente).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

#[async_trait]
pub trait VehicleSync: Send + Sync {
    async fn sync_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError>;
}

/// Sincronización respaldada por la tabla vehicles
pub struct RepositorySync {
    repository: VehicleRepository,
}

impl RepositorySync {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }
}

#[async_trait]
impl VehicleSync for RepositorySync {
    async fn sync_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        self.repository.save_state(vehicle).await
    }
}

/// Dispara la sincronización sin propagar el fallo al llamador
pub async fn sync_best_effort(sync: &dyn VehicleSync, vehicle: &Vehicle) {
    if let Err(e) = sync.sync_vehicle(vehicle).await {
        log::warn!("⚠️ Falha ao sincronizar veículo {}: {}", vehicle.id(), e);
    }
}
