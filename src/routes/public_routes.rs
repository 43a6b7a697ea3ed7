use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::services::content_service::{
    featured_vehicles, is_valid_kind_label, maintenance_tips, FeaturedVehicle, MaintenanceTip,
};
use crate::services::weather_service::{WeatherResponse, WeatherService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_city;

pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .route("/dicas", get(list_tips))
        .route("/destaques", get(list_featured))
        .route("/tempo/:cidade", get(get_weather))
}

#[derive(Debug, Deserialize)]
struct TipsQuery {
    tipo: Option<String>,
}

async fn list_tips(Query(query): Query<TipsQuery>) -> Result<Json<Vec<MaintenanceTip>>, AppError> {
    if let Some(tipo) = &query.tipo {
        if !is_valid_kind_label(tipo) {
            return Err(AppError::BadRequest(format!(
                "Tipo de veículo desconhecido: {}",
                tipo
            )));
        }
    }
    Ok(Json(maintenance_tips(query.tipo.as_deref())))
}

async fn list_featured() -> Json<Vec<FeaturedVehicle>> {
    Json(featured_vehicles())
}

async fn get_weather(
    State(state): State<AppState>,
    Path(cidade): Path<String>,
) -> Result<Json<WeatherResponse>, AppError> {
    validate_city(&cidade)
        .map_err(|_| AppError::BadRequest(format!("Nome de cidade inválido: {}", cidade)))?;

    let api_key = state.config.openweather_api_key.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Serviço de clima não configurado".to_string())
    })?;

    let service = WeatherService::new(
        api_key,
        state.config.openweather_base_url.clone(),
        state.http_client.clone(),
    );
    let response = service.current_weather(&cidade).await?;
    Ok(Json(response))
}
