use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::trip_dto::{CreateTripRequest, TripResponse};
use crate::dto::ApiResponse;
use crate::models::effects::EffectsLog;
use crate::models::trip::TripRecord;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::{StoredVehicle, VehicleRepository};
use crate::services::sync_service::{sync_best_effort, RepositorySync};
use crate::utils::errors::{AppError, AppResult};

pub struct TripController {
    vehicles: VehicleRepository,
    trips: TripRepository,
    sync: RepositorySync,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
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
        request: CreateTripRequest,
    ) -> AppResult<ApiResponse<TripResponse>> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;

        let trip = TripRecord::new(
            &request.destination,
            &request.start_date,
            request.end_date.as_deref(),
            request.description.as_deref(),
        )?;
        let response = TripResponse::from_record(&trip);

        let mut fx = EffectsLog::new();
        vehicle.add_trip(trip.clone(), &mut fx);
        self.trips.insert(vehicle_id, &trip).await?;

        if fx.updated {
            sync_best_effort(&self.sync, &vehicle).await;
        }

        Ok(ApiResponse::success_with_message(
            response,
            "Viagem registrada!".to_string(),
        ))
    }

    pub async fn list(&self, vehicle_id: Uuid, owner_id: Uuid) -> AppResult<Vec<TripResponse>> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;

        Ok(stored
            .rehydrated
            .vehicle
            .trip_history()
            .iter()
            .map(TripResponse::from_record)
            .collect())
    }

    pub async fn remove(&self, vehicle_id: Uuid, owner_id: Uuid, trip_id: Uuid) -> AppResult<()> {
        let stored = self.fetch_owned(vehicle_id, owner_id).await?;
        let mut vehicle = stored.rehydrated.vehicle;

        let mut fx = EffectsLog::new();
        if !vehicle.remove_trip(trip_id, &mut fx) {
            return Err(AppError::NotFound("Viagem não encontrada".to_string()));
        }
        self.trips.delete(trip_id, vehicle_id).await?;

        if fx.updated {
            sync_best_effort(&self.sync, &vehicle).await;
        }
        Ok(())
    }
}
