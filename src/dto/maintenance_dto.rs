use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::maintenance::MaintenanceRecord;

// Request para registrar una manutención
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    #[serde(alias = "data")]
    pub date: String,
    #[serde(alias = "tipo")]
    pub service_type: String,
    #[serde(alias = "custo")]
    pub cost: f64,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
}

// Response de un registro de manutención
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub date: String,
    pub service_type: String,
    pub cost: f64,
    pub description: String,
    /// Texto de exhibición listo para la UI
    pub formatted: String,
    /// `true` si está agendada para el futuro
    pub agendada: bool,
}

impl MaintenanceResponse {
    pub fn from_record(record: &MaintenanceRecord) -> Self {
        let snapshot = record.to_snapshot();
        Self {
            id: record.id(),
            date: snapshot.date,
            service_type: snapshot.service_type,
            cost: snapshot.cost,
            description: snapshot.description,
            formatted: record.format(),
            agendada: record.is_future_scheduled(),
        }
    }
}

// Historial particionado en pasadas y agendadas
#[derive(Debug, Serialize)]
pub struct MaintenanceHistoryResponse {
    pub historico: Vec<MaintenanceResponse>,
    pub agendadas: Vec<MaintenanceResponse>,
}
