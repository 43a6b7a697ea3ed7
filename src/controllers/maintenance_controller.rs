use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceHistoryResponse, MaintenanceResponse,
};
use crate::dto::ApiResponse;
use crate::models::effects::EffectsLog;
use crate::models::maintenance::MaintenanceRecord;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::{StoredVehicle, VehicleRepository};
use crate::services::sync_service::{sync_best_effort, RepositorySync};
use crate::utils::errors::{AppError, AppResult};

pub struct MaintenanceController {
    vehicles: VehicleRepository,
    records: MaintenanceRepository,
    sync: RepositorySync,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            records: MaintenanceRepository::new(pool.clone()),
            sync: RepositorySync::new(pool),
        }
    }

    async fn fetch_owned(&self, vehicle_id: Uuid, owner_id: Uuid) -> AppResult<StoredVehicle> {
        let stored = self
            .vehicles
            .load(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if stored.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Este veículo não pertence à sua garagem".to_string(),
            ));
        }
        Ok(stored)
    }

    pub async fn add(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> AppResult<ApiResponse<MaintenanceResponse>> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;

        // la construcción valida fecha/tipo/costo (fail fast)
        let record = MaintenanceRecord::new(
            &request.date,
            &request.service_type,
            request.cost,
            request.description.as_deref().unwrap_or(""),
        )?;
        let response = MaintenanceResponse::from_record(&record);

        let mut fx = EffectsLog::new();
        vehicle.add_maintenance(record.clone(), &mut fx);
        self.records.insert(vehicle_id, &record).await?;

        if fx.updated {
            sync_best_effort(&self.sync, &vehicle).await;
        }

        Ok(ApiResponse::success_with_message(
            response,
            "Manutenção registrada!".to_string(),
        ))
    }

    pub async fn list(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<MaintenanceHistoryResponse> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;
        let vehicle = stored.rehydrated.vehicle;

        Ok(MaintenanceHistoryResponse {
            historico: vehicle
                .past_maintenance()
                .into_iter()
                .map(MaintenanceResponse::from_record)
                .collect(),
            agendadas: vehicle
                .upcoming_maintenance()
                .into_iter()
                .map(MaintenanceResponse::from_record)
                .collect(),
        })
    }

    pub async fn remove(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        record_id: Uuid,
    ) -> AppResult<()> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;

        let mut fx = EffectsLog::new();
        if !vehicle.remove_maintenance(record_id, &mut fx) {
            return Err(AppError::NotFound(
                "Registro de manutenção não encontrado".to_string(),
            ));
        }
        self.records.delete(record_id, vehicle_id).await?;

        if fx.updated {
            sync_best_effort(&self.sync, &vehicle).await;
        }
        Ok(())
    }
}
