use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleActionRequest, VehicleActionResponse,
    VehicleDetailResponse,
};
use crate::dto::ApiResponse;
use crate::models::effects::EffectsLog;
use crate::models::vehicle::{Vehicle, VehicleSnapshot};
use crate::repositories::vehicle_repository::{StoredVehicle, VehicleRepository};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    /// Carga el vehículo verificando que pertenece al usuario
    async fn fetch_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<StoredVehicle> {
        let stored = self
            .repository
            .load(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        if stored.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Este veículo não pertence à sua garagem".to_string(),
            ));
        }
        Ok(stored)
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleSnapshot>> {
        let vehicle = Vehicle::new(
            request.kind,
            &request.model,
            &request.color,
            request.max_speed,
            request.image,
        )?;

        self.repository.insert(owner_id, &vehicle).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.snapshot(),
            "Veículo adicionado à garagem!".to_string(),
        ))
    }

    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<VehicleSnapshot>> {
        let rows = self.repository.list_rows_by_owner(owner_id).await?;

        let mut vehicles = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(stored) = self.repository.load(row.id).await? {
                vehicles.push(stored.rehydrated.vehicle.snapshot());
            }
        }
        Ok(vehicles)
    }

    pub async fn get(&self, id: Uuid, owner_id: Uuid) -> AppResult<VehicleDetailResponse> {
        let stored = self.fetch_owned(id, owner_id).await?;
        Ok(VehicleDetailResponse {
            veiculo: stored.rehydrated.vehicle.snapshot(),
            registros_descartados: stored.rehydrated.dropped.len(),
            adicionado_em: stored.created_at,
            atualizado_em: stored.updated_at,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleSnapshot>> {
        let stored = self.fetch_owned(id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;

        vehicle.update_details(
            request.model.as_deref(),
            request.color.as_deref(),
            request.max_speed,
            request.image,
        )?;

        self.repository.save_state(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.snapshot(),
            "Veículo atualizado com sucesso".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        self.fetch_owned(id, owner_id).await?;
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Ejecuta una acción de dominio: rehidrata, opera, persiste y devuelve
    /// el resultado con los efectos acumulados. Las precondiciones violadas
    /// no son errores HTTP: llegan como `executada: false` más alertas.
    pub async fn execute(
        &self,
        id: Uuid,
        owner_id: Uuid,
        action: VehicleActionRequest,
    ) -> AppResult<ApiResponse<VehicleActionResponse>> {
        let stored = self.fetch_owned(id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;
        let mut fx = EffectsLog::new();

        let executada = match action {
            VehicleActionRequest::Start => vehicle.start(&mut fx),
            VehicleActionRequest::Stop => vehicle.stop(&mut fx),
            VehicleActionRequest::Accelerate { incremento } => {
                vehicle.accelerate(incremento, &mut fx)
            }
            VehicleActionRequest::Brake { incremento } => vehicle.brake(incremento, &mut fx),
            VehicleActionRequest::Honk => vehicle.honk(&mut fx),
            VehicleActionRequest::EngageTurbo => vehicle.engage_turbo(&mut fx),
            VehicleActionRequest::DisengageTurbo => vehicle.disengage_turbo(&mut fx),
            VehicleActionRequest::Load { peso } => vehicle.load(peso, &mut fx),
            VehicleActionRequest::Unload { peso } => vehicle.unload(peso, &mut fx),
        };

        if executada {
            // lectura-modificación-escritura por vehículo; el modelo no
            // trae locking propio
            self.repository.save_state(&vehicle).await?;
        }

        Ok(ApiResponse::success(VehicleActionResponse {
            executada,
            veiculo: vehicle.snapshot(),
            alertas: fx.alerts,
            sons: fx.cues,
        }))
    }
}
