//! Efectos del dominio
//!
//! El núcleo nunca toca la capa de presentación directamente: cada
//! operación recibe un sink de efectos e emite alertas, sonidos y la señal
//! de sincronización a través de él. Así el modelo se testea sin UI y el
//! handler HTTP decide qué hacer con los efectos acumulados.

use serde::Serialize;

/// Severidad de una alerta transitoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Success,
}

/// Vocabulario fijo de señales sonoras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Ignition,
    Shutdown,
    Accelerate,
    Brake,
    Horn,
    Error,
}

/// Alerta transitoria para la capa de presentación
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub message: String,
    pub severity: AlertSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

/// Sink de efectos que reciben las operaciones del vehículo
pub trait VehicleEffects {
    fn alert(&mut self, message: &str, severity: AlertSeverity, duration_ms: Option<u32>);

    fn play_cue(&mut self, cue: SoundCue);

    /// El historial del vehículo cambió: los colaboradores usan esta señal
    /// para refrescar la UI y sincronizar la persistencia (best-effort; el
    /// estado en memoria ya es consistente cuando se emite).
    fn vehicle_updated(&mut self);
}

/// Sink que acumula los efectos para devolverlos en la respuesta HTTP
#[derive(Debug, Default)]
pub struct EffectsLog {
    pub alerts: Vec<Alert>,
    pub cues: Vec<SoundCue>,
    pub updated: bool,
}

impl EffectsLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleEffects for EffectsLog {
    fn alert(&mut self, message: &str, severity: AlertSeverity, duration_ms: Option<u32>) {
        self.alerts.push(Alert {
            message: message.to_string(),
            severity,
            duration_ms,
        });
    }

    fn play_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    fn vehicle_updated(&mut self) {
        self.updated = true;
    }
}

/// Sink nulo para cuando los efectos no interesan
#[derive(Debug, Default)]
pub struct NullEffects;

impl VehicleEffects for NullEffects {
    fn alert(&mut self, _message: &str, _severity: AlertSeverity, _duration_ms: Option<u32>) {}

    fn play_cue(&mut self, _cue: SoundCue) {}

    fn vehicle_updated(&mut self) {}
}
