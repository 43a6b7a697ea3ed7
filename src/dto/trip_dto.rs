use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::trip::TripRecord;

// Request para registrar una viagem
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    #[serde(alias = "destino")]
    pub destination: String,
    #[serde(alias = "dataInicio")]
    pub start_date: String,
    #[serde(default, alias = "dataFim")]
    pub end_date: Option<String>,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
}

// Response de una viagem
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: Uuid,
    pub destination: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TripResponse {
    pub fn from_record(trip: &TripRecord) -> Self {
        let snapshot = trip.to_snapshot();
        Self {
            id: trip.id(),
            destination: snapshot.destination,
            start_date: snapshot.start_date,
            end_date: snapshot.end_date,
            description: snapshot.description,
        }
    }
}
