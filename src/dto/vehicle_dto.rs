use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::effects::{Alert, SoundCue};
use crate::models::vehicle::{VehicleKind, VehicleSnapshot};

// Request para agregar un vehículo a la garagem. La variante llega con el
// discriminador `tipo` (Carro | CarroEsportivo | Caminhao); el Caminhao
// exige `capacidadeCarga`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[serde(flatten)]
    pub kind: VehicleKind,
    #[serde(alias = "modelo")]
    pub model: String,
    #[serde(alias = "cor")]
    pub color: String,
    #[serde(default, alias = "velocidadeMaxima")]
    pub max_speed: Option<f64>,
    #[serde(default, alias = "imagem")]
    pub image: Option<String>,
}

// Request para actualizar los campos descriptivos de un vehículo
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(default, alias = "modelo")]
    pub model: Option<String>,
    #[serde(default, alias = "cor")]
    pub color: Option<String>,
    #[serde(default, alias = "velocidadeMaxima")]
    pub max_speed: Option<f64>,
    #[serde(default, alias = "imagem")]
    pub image: Option<String>,
}

// Acción de dominio sobre un vehículo, discriminada por `acao`
#[derive(Debug, Deserialize)]
#[serde(tag = "acao")]
pub enum VehicleActionRequest {
    #[serde(rename = "ligar")]
    Start,
    #[serde(rename = "desligar")]
    Stop,
    #[serde(rename = "acelerar")]
    Accelerate {
        #[serde(default)]
        incremento: Option<f64>,
    },
    #[serde(rename = "frear")]
    Brake {
        #[serde(default)]
        incremento: Option<f64>,
    },
    #[serde(rename = "buzinar")]
    Honk,
    #[serde(rename = "ativarTurbo")]
    EngageTurbo,
    #[serde(rename = "desativarTurbo")]
    DisengageTurbo,
    #[serde(rename = "carregar")]
    Load { peso: f64 },
    #[serde(rename = "descarregar")]
    Unload { peso: f64 },
}

// Resultado de una acción: éxito booleano, estado nuevo y efectos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleActionResponse {
    pub executada: bool,
    pub veiculo: VehicleSnapshot,
    pub alertas: Vec<Alert>,
    pub sons: Vec<SoundCue>,
}

// Response de detalle: snapshot más los registros descartados al rehidratar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub veiculo: VehicleSnapshot,
    pub registros_descartados: usize,
    pub adicionado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}
