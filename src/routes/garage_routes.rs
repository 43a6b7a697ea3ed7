use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::controllers::trip_controller::TripController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceHistoryResponse, MaintenanceResponse,
};
use crate::dto::trip_dto::{CreateTripRequest, TripResponse};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleActionRequest, VehicleActionResponse,
    VehicleDetailResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::vehicle::VehicleSnapshot;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de la garagem: todas las rutas exigen JWT y verifican la
/// propiedad del vehículo.
pub fn create_garage_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/acoes", post(execute_action))
        .route("/:id/manutencoes", post(add_maintenance).get(list_maintenance))
        .route("/:id/manutencoes/:record_id", delete(remove_maintenance))
        .route("/:id/viagens", post(add_trip).get(list_trips))
        .route("/:id/viagens/:trip_id", delete(remove_trip))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleSnapshot>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleSnapshot>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get(id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleSnapshot>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Veículo removido da garagem"
    })))
}

async fn execute_action(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(action): Json<VehicleActionRequest>,
) -> Result<Json<ApiResponse<VehicleActionResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.execute(id, user.user_id, action).await?;
    Ok(Json(response))
}

async fn add_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.add(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceHistoryResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list(id, user.user_id).await?;
    Ok(Json(response))
}

async fn remove_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, record_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    controller.remove(id, user.user_id, record_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de manutenção removido"
    })))
}

async fn add_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.add(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_trips(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list(id, user.user_id).await?;
    Ok(Json(response))
}

async fn remove_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, trip_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TripController::new(state.pool.clone());
    controller.remove(id, user.user_id, trip_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viagem removida"
    })))
}
