//! Modelo de Vehicle
//!
//! Núcleo del dominio: el vehículo polimórfico (Carro, CarroEsportivo,
//! Caminhao) con su máquina de estados de ignición/velocidad, el turbo,
//! la carga del camión y los historiales de manutención y viajes. Toda
//! mutación pasa por las operaciones de este módulo; los campos nunca se
//! asignan desde afuera.
//!
//! Las violaciones de precondición (acelerar apagado, doble ignición,
//! sobrecarga) no lanzan error: se reportan por el sink de efectos y la
//! operación devuelve `false`.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::effects::{AlertSeverity, SoundCue, VehicleEffects};
use super::maintenance::{MaintenanceRecord, MaintenanceSnapshot};
use super::trip::{TripRecord, TripSnapshot};
use super::DomainError;

/// Velocidades máximas por defecto (km/h) por variante
const DEFAULT_MAX_SPEED_CAR: f64 = 180.0;
const DEFAULT_MAX_SPEED_SPORTS_CAR: f64 = 250.0;
const DEFAULT_MAX_SPEED_TRUCK: f64 = 120.0;

/// Incrementos por defecto de acelerar (km/h) por variante
const DEFAULT_ACCELERATION_CAR: f64 = 10.0;
const DEFAULT_ACCELERATION_SPORTS_CAR: f64 = 20.0;
const DEFAULT_ACCELERATION_TRUCK: f64 = 5.0;

/// Incrementos por defecto de frenar (km/h)
const DEFAULT_BRAKE: f64 = 20.0;
const DEFAULT_BRAKE_SPORTS_CAR: f64 = 25.0;

/// Multiplicador del turbo y velocidad mínima para mantenerlo activo
const TURBO_MULTIPLIER: f64 = 1.5;
const TURBO_MIN_SPEED: f64 = 30.0;

/// Piso del factor de carga de los camiones
const MIN_LOAD_FACTOR: f64 = 0.3;

/// Duración de la alerta de la bocina
const HONK_ALERT_MS: u32 = 2000;

/// Variante del vehículo con su estado específico. El vocabulario del
/// discriminador (`tipo`) es el contrato con el cliente y con la columna
/// `tipo` del schema: `Carro | CarroEsportivo | Caminhao`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum VehicleKind {
    #[serde(rename = "Carro")]
    Car,
    #[serde(rename = "CarroEsportivo")]
    SportsCar {
        #[serde(default, rename = "turboAtivado")]
        turbo_engaged: bool,
    },
    #[serde(rename = "Caminhao")]
    Truck {
        #[serde(rename = "capacidadeCarga")]
        cargo_capacity: f64,
        #[serde(default, rename = "cargaAtual")]
        current_load: f64,
    },
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Carro",
            VehicleKind::SportsCar { .. } => "CarroEsportivo",
            VehicleKind::Truck { .. } => "Caminhao",
        }
    }

    fn default_max_speed(&self) -> f64 {
        match self {
            VehicleKind::Car => DEFAULT_MAX_SPEED_CAR,
            VehicleKind::SportsCar { .. } => DEFAULT_MAX_SPEED_SPORTS_CAR,
            VehicleKind::Truck { .. } => DEFAULT_MAX_SPEED_TRUCK,
        }
    }

    fn default_acceleration(&self) -> f64 {
        match self {
            VehicleKind::Car => DEFAULT_ACCELERATION_CAR,
            VehicleKind::SportsCar { .. } => DEFAULT_ACCELERATION_SPORTS_CAR,
            VehicleKind::Truck { .. } => DEFAULT_ACCELERATION_TRUCK,
        }
    }

    fn default_brake(&self) -> f64 {
        match self {
            VehicleKind::SportsCar { .. } => DEFAULT_BRAKE_SPORTS_CAR,
            _ => DEFAULT_BRAKE,
        }
    }

    /// Multiplicador aplicado al incremento de aceleración: turbo 1.5x,
    /// camiones penalizados por la carga hasta un piso de 0.3.
    fn acceleration_factor(&self) -> f64 {
        match self {
            VehicleKind::Car => 1.0,
            VehicleKind::SportsCar { turbo_engaged } => {
                if *turbo_engaged {
                    TURBO_MULTIPLIER
                } else {
                    1.0
                }
            }
            VehicleKind::Truck {
                cargo_capacity,
                current_load,
            } => {
                if *cargo_capacity > 0.0 {
                    (1.0 - (current_load / cargo_capacity) * 0.7).max(MIN_LOAD_FACTOR)
                } else {
                    1.0
                }
            }
        }
    }

    /// Validación estructural de la variante. `allow_overload` se usa en
    /// la rehidratación: una sobrecarga almacenada se preserva para que la
    /// guardia de ignición pueda observarla.
    fn validate(&self, allow_overload: bool) -> Result<(), DomainError> {
        if let VehicleKind::Truck {
            cargo_capacity,
            current_load,
        } = self
        {
            if !cargo_capacity.is_finite() || *cargo_capacity <= 0.0 {
                return Err(DomainError::Validation(
                    "a capacidade de carga deve ser um número positivo".to_string(),
                ));
            }
            if !current_load.is_finite() || *current_load < 0.0 {
                return Err(DomainError::Validation(
                    "a carga atual não pode ser negativa".to_string(),
                ));
            }
            if !allow_overload && current_load > cargo_capacity {
                return Err(DomainError::Validation(
                    "a carga atual excede a capacidade do caminhão".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: Uuid,
    kind: VehicleKind,
    model: String,
    color: String,
    max_speed: f64,
    is_running: bool,
    speed: f64,
    image: Option<String>,
    maintenance_history: Vec<MaintenanceRecord>,
    trip_history: Vec<TripRecord>,
}

impl Vehicle {
    /// Construye un vehículo nuevo (apagado, parado, historiales vacíos)
    pub fn new(
        kind: VehicleKind,
        model: &str,
        color: &str,
        max_speed: Option<f64>,
        image: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::with_id(Uuid::new_v4(), kind, model, color, max_speed, image)
    }

    pub fn with_id(
        id: Uuid,
        kind: VehicleKind,
        model: &str,
        color: &str,
        max_speed: Option<f64>,
        image: Option<String>,
    ) -> Result<Self, DomainError> {
        let model = required_text(model, "o modelo do veículo é obrigatório")?;
        let color = required_text(color, "a cor do veículo é obrigatória")?;
        kind.validate(false)?;
        if matches!(
            kind,
            VehicleKind::SportsCar {
                turbo_engaged: true
            }
        ) {
            // el turbo solo existe con el motor en marcha; un vehículo
            // recién construido siempre nace apagado
            return Err(DomainError::Validation(
                "o turbo não pode estar ativo em um veículo desligado".to_string(),
            ));
        }

        let max_speed = match max_speed {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            Some(value) => {
                return Err(DomainError::Validation(format!(
                    "velocidade máxima inválida: {}",
                    value
                )))
            }
            None => kind.default_max_speed(),
        };

        Ok(Self {
            id,
            kind,
            model,
            color,
            max_speed,
            is_running: false,
            speed: 0.0,
            image,
            maintenance_history: Vec::new(),
            trip_history: Vec::new(),
        })
    }

    pub fn car(model: &str, color: &str) -> Result<Self, DomainError> {
        Self::new(VehicleKind::Car, model, color, None, None)
    }

    pub fn sports_car(model: &str, color: &str) -> Result<Self, DomainError> {
        Self::new(
            VehicleKind::SportsCar {
                turbo_engaged: false,
            },
            model,
            color,
            None,
            None,
        )
    }

    pub fn truck(model: &str, color: &str, cargo_capacity: f64) -> Result<Self, DomainError> {
        Self::new(
            VehicleKind::Truck {
                cargo_capacity,
                current_load: 0.0,
            },
            model,
            color,
            None,
            None,
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn maintenance_history(&self) -> &[MaintenanceRecord] {
        &self.maintenance_history
    }

    pub fn trip_history(&self) -> &[TripRecord] {
        &self.trip_history
    }

    /// Actualiza los campos descriptivos (no el estado de marcha)
    pub fn update_details(
        &mut self,
        model: Option<&str>,
        color: Option<&str>,
        max_speed: Option<f64>,
        image: Option<String>,
    ) -> Result<(), DomainError> {
        if let Some(value) = model {
            self.model = required_text(value, "o modelo do veículo é obrigatório")?;
        }
        if let Some(value) = color {
            self.color = required_text(value, "a cor do veículo é obrigatória")?;
        }
        if let Some(value) = max_speed {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::Validation(format!(
                    "velocidade máxima inválida: {}",
                    value
                )));
            }
            self.max_speed = value;
            // la velocidad nunca queda por encima del nuevo tope
            self.speed = self.speed.min(value);
        }
        if let Some(value) = image {
            self.image = Some(value);
        }
        Ok(())
    }

    /// Ligar. Camiones sobrecargados no arrancan (guardia contra estado
    /// corrupto rehidratado).
    pub fn start(&mut self, fx: &mut dyn VehicleEffects) -> bool {
        if let VehicleKind::Truck {
            cargo_capacity,
            current_load,
        } = &self.kind
        {
            if current_load > cargo_capacity {
                fx.alert(
                    "Caminhão sobrecarregado! Descarregue antes de ligar.",
                    AlertSeverity::Error,
                    None,
                );
                fx.play_cue(SoundCue::Error);
                return false;
            }
        }
        if self.is_running {
            fx.alert(
                &format!("{} já está ligado!", self.model),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        self.is_running = true;
        fx.play_cue(SoundCue::Ignition);
        fx.alert(
            &format!("{} ligado!", self.model),
            AlertSeverity::Success,
            None,
        );
        true
    }

    /// Desligar. Solo con el vehículo parado; en el esportivo el turbo se
    /// limpia incondicionalmente después de la transición.
    pub fn stop(&mut self, fx: &mut dyn VehicleEffects) -> bool {
        if !self.is_running {
            fx.alert(
                &format!("{} já está desligado!", self.model),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        if self.speed > 0.0 {
            fx.alert(
                "Pare o veículo antes de desligar!",
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        self.is_running = false;
        fx.play_cue(SoundCue::Shutdown);
        fx.alert(
            &format!("{} desligado!", self.model),
            AlertSeverity::Success,
            None,
        );
        if let VehicleKind::SportsCar { turbo_engaged } = &mut self.kind {
            *turbo_engaged = false;
        }
        true
    }

    /// Acelerar. El incremento por defecto depende de la variante; el
    /// efectivo se escala por turbo o factor de carga y la velocidad nunca
    /// pasa del tope.
    pub fn accelerate(&mut self, delta: Option<f64>, fx: &mut dyn VehicleEffects) -> bool {
        if !self.is_running {
            fx.alert(
                &format!("Ligue {} antes de acelerar!", self.model),
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        let delta = delta
            .unwrap_or_else(|| self.kind.default_acceleration())
            .max(0.0);
        let effective = delta * self.kind.acceleration_factor();
        let new_speed = (self.speed + effective).min(self.max_speed);
        if new_speed == self.speed {
            fx.alert(
                &format!(
                    "{} já está na velocidade máxima ({} km/h)!",
                    self.model, self.max_speed
                ),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        self.speed = new_speed;
        fx.play_cue(SoundCue::Accelerate);
        true
    }

    /// Frear. Nunca baja de 0; en el esportivo, frenar por debajo del
    /// umbral con turbo activo lo desactiva automáticamente.
    pub fn brake(&mut self, delta: Option<f64>, fx: &mut dyn VehicleEffects) -> bool {
        if self.speed <= 0.0 {
            fx.alert(
                &format!("{} já está parado!", self.model),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        let delta = delta.unwrap_or_else(|| self.kind.default_brake()).max(0.0);
        self.speed = (self.speed - delta).max(0.0);
        fx.play_cue(SoundCue::Brake);
        if let VehicleKind::SportsCar { turbo_engaged } = &mut self.kind {
            if *turbo_engaged && self.speed < TURBO_MIN_SPEED {
                *turbo_engaged = false;
                fx.alert(
                    "Turbo desativado automaticamente (velocidade baixa).",
                    AlertSeverity::Info,
                    None,
                );
            }
        }
        true
    }

    /// Buzinar: siempre funciona, cada variante con su sonido
    pub fn honk(&self, fx: &mut dyn VehicleEffects) -> bool {
        fx.play_cue(SoundCue::Horn);
        let sound = match self.kind {
            VehicleKind::Car => "Beep beep!",
            VehicleKind::SportsCar { .. } => "Vrum vrum!",
            VehicleKind::Truck { .. } => "Fom fom!",
        };
        fx.alert(
            &format!("{}: {}", self.model, sound),
            AlertSeverity::Info,
            Some(HONK_ALERT_MS),
        );
        true
    }

    /// Ativar turbo (solo CarroEsportivo, solo en marcha)
    pub fn engage_turbo(&mut self, fx: &mut dyn VehicleEffects) -> bool {
        if !matches!(self.kind, VehicleKind::SportsCar { .. }) {
            fx.alert(
                &format!("{} não possui turbo!", self.model),
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        if !self.is_running {
            fx.alert(
                "Ligue o carro antes de ativar o turbo!",
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        if let VehicleKind::SportsCar { turbo_engaged } = &mut self.kind {
            if *turbo_engaged {
                fx.alert("Turbo já está ativado!", AlertSeverity::Warning, None);
                return false;
            }
            *turbo_engaged = true;
        }
        fx.alert("Turbo ativado!", AlertSeverity::Success, None);
        true
    }

    /// Desativar turbo: no-op silencioso si no estaba activo
    pub fn disengage_turbo(&mut self, fx: &mut dyn VehicleEffects) -> bool {
        if let VehicleKind::SportsCar { turbo_engaged } = &mut self.kind {
            if *turbo_engaged {
                *turbo_engaged = false;
                fx.alert("Turbo desativado.", AlertSeverity::Info, None);
                return true;
            }
        }
        false
    }

    /// Carregar (solo Caminhao). Un peso que excedería la capacidad se
    /// rechaza sin alterar la carga.
    pub fn load(&mut self, weight: f64, fx: &mut dyn VehicleEffects) -> bool {
        let (cargo_capacity, current_load) = match &mut self.kind {
            VehicleKind::Truck {
                cargo_capacity,
                current_load,
            } => (*cargo_capacity, current_load),
            _ => {
                fx.alert(
                    &format!("{} não transporta carga!", self.model),
                    AlertSeverity::Error,
                    None,
                );
                fx.play_cue(SoundCue::Error);
                return false;
            }
        };
        if !weight.is_finite() || weight <= 0.0 {
            fx.alert(
                "Informe um peso válido para carregar!",
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        if *current_load + weight > cargo_capacity {
            let free = cargo_capacity - *current_load;
            fx.alert(
                &format!("Carga excede a capacidade! Espaço livre: {:.1} kg.", free),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        *current_load += weight;
        let total = *current_load;
        fx.alert(
            &format!("Carregados {:.1} kg. Carga atual: {:.1} kg.", weight, total),
            AlertSeverity::Success,
            None,
        );
        true
    }

    /// Descarregar (solo Caminhao)
    pub fn unload(&mut self, weight: f64, fx: &mut dyn VehicleEffects) -> bool {
        let current_load = match &mut self.kind {
            VehicleKind::Truck { current_load, .. } => current_load,
            _ => {
                fx.alert(
                    &format!("{} não transporta carga!", self.model),
                    AlertSeverity::Error,
                    None,
                );
                fx.play_cue(SoundCue::Error);
                return false;
            }
        };
        if !weight.is_finite() || weight <= 0.0 {
            fx.alert(
                "Informe um peso válido para descarregar!",
                AlertSeverity::Error,
                None,
            );
            fx.play_cue(SoundCue::Error);
            return false;
        }
        if weight > *current_load {
            let excess = weight - *current_load;
            fx.alert(
                &format!(
                    "Não há carga suficiente! Tentou descarregar {:.1} kg a mais.",
                    excess
                ),
                AlertSeverity::Warning,
                None,
            );
            return false;
        }
        *current_load -= weight;
        let total = *current_load;
        fx.alert(
            &format!(
                "Descarregados {:.1} kg. Carga atual: {:.1} kg.",
                weight, total
            ),
            AlertSeverity::Success,
            None,
        );
        true
    }

    /// Añade un registro de manutención manteniendo el historial ordenado
    /// por fecha descendente, y dispara la notificación de actualización.
    pub fn add_maintenance(&mut self, record: MaintenanceRecord, fx: &mut dyn VehicleEffects) {
        self.maintenance_history.push(record);
        self.maintenance_history
            .sort_by(|a, b| b.date().cmp(&a.date()));
        fx.vehicle_updated();
    }

    pub fn remove_maintenance(&mut self, record_id: Uuid, fx: &mut dyn VehicleEffects) -> bool {
        let before = self.maintenance_history.len();
        self.maintenance_history
            .retain(|record| record.id() != record_id);
        let removed = self.maintenance_history.len() != before;
        if removed {
            fx.vehicle_updated();
        }
        removed
    }

    pub fn add_trip(&mut self, trip: TripRecord, fx: &mut dyn VehicleEffects) {
        self.trip_history.push(trip);
        fx.vehicle_updated();
    }

    pub fn remove_trip(&mut self, trip_id: Uuid, fx: &mut dyn VehicleEffects) -> bool {
        let before = self.trip_history.len();
        self.trip_history.retain(|trip| trip.id() != trip_id);
        let removed = self.trip_history.len() != before;
        if removed {
            fx.vehicle_updated();
        }
        removed
    }

    /// Manutenciones pasadas o del día de hoy
    pub fn past_maintenance(&self) -> Vec<&MaintenanceRecord> {
        self.past_maintenance_on(Utc::now().date_naive())
    }

    pub fn past_maintenance_on(&self, today: NaiveDate) -> Vec<&MaintenanceRecord> {
        self.maintenance_history
            .iter()
            .filter(|record| !record.is_future_on(today))
            .collect()
    }

    /// Manutenciones agendadas para el futuro
    pub fn upcoming_maintenance(&self) -> Vec<&MaintenanceRecord> {
        self.upcoming_maintenance_on(Utc::now().date_naive())
    }

    pub fn upcoming_maintenance_on(&self, today: NaiveDate) -> Vec<&MaintenanceRecord> {
        self.maintenance_history
            .iter()
            .filter(|record| record.is_future_on(today))
            .collect()
    }

    /// Representación serializada completa del vehículo
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: Some(self.id),
            kind: self.kind.clone(),
            model: self.model.clone(),
            color: self.color.clone(),
            max_speed: Some(self.max_speed),
            is_running: self.is_running,
            speed: self.speed,
            image: self.image.clone(),
            maintenance_history: self
                .maintenance_history
                .iter()
                .map(MaintenanceRecord::to_snapshot)
                .collect(),
            trip_history: self
                .trip_history
                .iter()
                .map(TripRecord::to_snapshot)
                .collect(),
        }
    }

    /// Rehidrata un vehículo desde su representación almacenada.
    ///
    /// Frontera de parse explícita: o devuelve una entidad válida (más los
    /// sub-registros descartados con su motivo) o falla, nunca un objeto
    /// parcialmente válido. Registros de historial malformados se
    /// descartan; el estado transitorio fuera de rango se sanea, salvo la
    /// sobrecarga del camión, que se preserva para la guardia de ignición.
    pub fn rehydrate(snapshot: VehicleSnapshot) -> Result<Rehydrated, DomainError> {
        let VehicleSnapshot {
            id,
            kind,
            model,
            color,
            max_speed,
            is_running,
            speed,
            image,
            maintenance_history,
            trip_history,
        } = snapshot;

        let model = required_text(&model, "o modelo do veículo é obrigatório")?;
        let color = required_text(&color, "a cor do veículo é obrigatória")?;
        kind.validate(true)?;

        let kind = match kind {
            // el turbo jamás queda activo con el motor apagado
            VehicleKind::SportsCar { turbo_engaged } => VehicleKind::SportsCar {
                turbo_engaged: turbo_engaged && is_running,
            },
            other => other,
        };

        let max_speed = match max_speed {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            Some(value) => {
                return Err(DomainError::InvalidArgument(format!(
                    "velocidade máxima inválida: {}",
                    value
                )))
            }
            None => kind.default_max_speed(),
        };
        let speed = if speed.is_finite() {
            speed.clamp(0.0, max_speed)
        } else {
            0.0
        };

        let mut vehicle = Vehicle {
            id: id.unwrap_or_else(Uuid::new_v4),
            kind,
            model,
            color,
            max_speed,
            is_running,
            speed,
            image,
            maintenance_history: Vec::new(),
            trip_history: Vec::new(),
        };

        let mut dropped = Vec::new();
        for raw in &maintenance_history {
            match MaintenanceRecord::from_snapshot(raw) {
                Ok(record) => vehicle.maintenance_history.push(record),
                Err(reason) => dropped.push(format!(
                    "manutenção '{}' em '{}': {}",
                    raw.service_type, raw.date, reason
                )),
            }
        }
        vehicle
            .maintenance_history
            .sort_by(|a, b| b.date().cmp(&a.date()));

        for raw in &trip_history {
            match TripRecord::from_snapshot(raw) {
                Ok(trip) => vehicle.trip_history.push(trip),
                Err(reason) => dropped.push(format!(
                    "viagem '{}' em '{}': {}",
                    raw.destination, raw.start_date, reason
                )),
            }
        }

        Ok(Rehydrated { vehicle, dropped })
    }
}

/// Resultado de la rehidratación: la entidad válida más los motivos de los
/// sub-registros descartados
#[derive(Debug)]
pub struct Rehydrated {
    pub vehicle: Vehicle,
    pub dropped: Vec<String>,
}

/// Payload serializado del vehículo: formato de la API y de rehidratación.
/// Los alias aceptan los nombres de campo del cliente legado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub kind: VehicleKind,
    #[serde(alias = "modelo")]
    pub model: String,
    #[serde(alias = "cor")]
    pub color: String,
    #[serde(default, alias = "velocidadeMaxima")]
    pub max_speed: Option<f64>,
    #[serde(default, alias = "ligado")]
    pub is_running: bool,
    #[serde(default, alias = "velocidade")]
    pub speed: f64,
    #[serde(default, alias = "imagem", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, alias = "historicoManutencao")]
    pub maintenance_history: Vec<MaintenanceSnapshot>,
    #[serde(default, alias = "historicoViagens")]
    pub trip_history: Vec<TripSnapshot>,
}

fn required_text(value: &str, message: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::effects::{Alert, EffectsLog};

    fn last_alert(fx: &EffectsLog) -> &Alert {
        fx.alerts.last().expect("esperaba al menos una alerta")
    }

    #[test]
    fn construccion_exige_modelo_y_color() {
        assert!(Vehicle::car("  ", "Prata").is_err());
        assert!(Vehicle::car("Fusca", "").is_err());
        let car = Vehicle::car("Fusca", "Azul").unwrap();
        assert!(!car.is_running());
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.max_speed(), 180.0);
    }

    #[test]
    fn camion_exige_capacidad_positiva() {
        assert!(Vehicle::truck("Scania R450", "Branco", 0.0).is_err());
        assert!(Vehicle::truck("Scania R450", "Branco", -10.0).is_err());
        assert!(Vehicle::truck("Scania R450", "Branco", f64::NAN).is_err());
        assert!(Vehicle::truck("Scania R450", "Branco", 5000.0).is_ok());
    }

    #[test]
    fn ligar_dos_veces_avisa_y_no_cambia_estado() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(car.start(&mut fx));
        assert_eq!(fx.cues, vec![SoundCue::Ignition]);

        let mut fx = EffectsLog::new();
        assert!(!car.start(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
        assert!(car.is_running());
    }

    #[test]
    fn desligar_sin_ligar_avisa_sin_cambiar_estado() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(!car.stop(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
        assert!(!car.is_running());
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn desligar_en_movimiento_es_error() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        car.start(&mut fx);
        car.accelerate(None, &mut fx);
        let mut fx = EffectsLog::new();
        assert!(!car.stop(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Error);
        assert!(car.is_running());
    }

    #[test]
    fn acelerar_apagado_es_error() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(!car.accelerate(Some(10.0), &mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Error);
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn velocidad_respeta_los_limites_en_toda_secuencia() {
        let mut car = Vehicle::new(VehicleKind::Car, "Uno", "Verde", Some(35.0), None).unwrap();
        let mut fx = crate::models::effects::NullEffects;
        car.start(&mut fx);
        for _ in 0..10 {
            car.accelerate(None, &mut fx);
            assert!(car.speed() >= 0.0 && car.speed() <= car.max_speed());
        }
        assert_eq!(car.speed(), 35.0);
        for _ in 0..10 {
            car.brake(Some(12.5), &mut fx);
            assert!(car.speed() >= 0.0 && car.speed() <= car.max_speed());
        }
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn acelerar_en_el_tope_es_idempotente() {
        let mut car = Vehicle::new(VehicleKind::Car, "Uno", "Verde", Some(20.0), None).unwrap();
        let mut fx = EffectsLog::new();
        car.start(&mut fx);
        assert!(car.accelerate(Some(20.0), &mut fx));
        assert_eq!(car.speed(), 20.0);

        let mut fx = EffectsLog::new();
        assert!(!car.accelerate(Some(10.0), &mut fx));
        assert_eq!(car.speed(), 20.0);
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
        assert!(fx.cues.is_empty());
    }

    #[test]
    fn frenar_nunca_baja_de_cero() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        car.start(&mut fx);
        car.accelerate(Some(15.0), &mut fx);
        assert!(car.brake(Some(500.0), &mut fx));
        assert_eq!(car.speed(), 0.0);

        let mut fx = EffectsLog::new();
        assert!(!car.brake(None, &mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
    }

    #[test]
    fn delta_negativo_se_trata_como_cero() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        car.start(&mut fx);
        // acelerar con delta negativo no mueve la aguja: se reporta no-op
        assert!(!car.accelerate(Some(-50.0), &mut fx));
        assert_eq!(car.speed(), 0.0);
        car.accelerate(Some(30.0), &mut fx);
        assert!(car.brake(Some(-10.0), &mut fx));
        assert_eq!(car.speed(), 30.0);
    }

    #[test]
    fn incrementos_por_defecto_dependen_de_la_variante() {
        let mut fx = EffectsLog::new();

        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        car.start(&mut fx);
        car.accelerate(None, &mut fx);
        assert_eq!(car.speed(), 10.0);

        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        sports.start(&mut fx);
        sports.accelerate(None, &mut fx);
        assert_eq!(sports.speed(), 20.0);

        let mut truck = Vehicle::truck("Scania R450", "Branco", 1000.0).unwrap();
        truck.start(&mut fx);
        truck.accelerate(None, &mut fx);
        assert_eq!(truck.speed(), 5.0);
    }

    #[test]
    fn turbo_exige_motor_en_marcha() {
        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(!sports.engage_turbo(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Error);

        sports.start(&mut fx);
        assert!(sports.engage_turbo(&mut fx));
        // doble activación avisa
        let mut fx = EffectsLog::new();
        assert!(!sports.engage_turbo(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
    }

    #[test]
    fn turbo_multiplica_la_aceleracion() {
        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        sports.start(&mut fx);
        sports.engage_turbo(&mut fx);
        assert!(sports.accelerate(Some(20.0), &mut fx));
        // 20 * 1.5 = 30
        assert_eq!(sports.speed(), 30.0);
    }

    #[test]
    fn frenar_bajo_el_umbral_desactiva_el_turbo() {
        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        sports.start(&mut fx);
        sports.engage_turbo(&mut fx);
        sports.accelerate(Some(20.0), &mut fx);
        assert_eq!(sports.speed(), 30.0);

        let mut fx = EffectsLog::new();
        assert!(sports.brake(Some(25.0), &mut fx));
        assert_eq!(sports.speed(), 5.0);
        assert!(matches!(
            sports.kind(),
            VehicleKind::SportsCar {
                turbo_engaged: false
            }
        ));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Info);
    }

    #[test]
    fn turbo_nunca_queda_activo_tras_desligar() {
        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        sports.start(&mut fx);
        sports.engage_turbo(&mut fx);
        assert!(sports.stop(&mut fx));
        assert!(!sports.is_running());
        assert!(matches!(
            sports.kind(),
            VehicleKind::SportsCar {
                turbo_engaged: false
            }
        ));
    }

    #[test]
    fn desactivar_turbo_inactivo_es_noop_silencioso() {
        let mut sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(!sports.disengage_turbo(&mut fx));
        assert!(fx.alerts.is_empty());

        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        assert!(!car.disengage_turbo(&mut fx));
    }

    #[test]
    fn turbo_en_vehiculo_comun_es_error() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        car.start(&mut fx);
        let mut fx = EffectsLog::new();
        assert!(!car.engage_turbo(&mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Error);
    }

    #[test]
    fn escenario_de_carga_del_camion() {
        let mut truck = Vehicle::truck("Scania R450", "Branco", 1000.0).unwrap();
        let mut fx = EffectsLog::new();

        assert!(truck.load(800.0, &mut fx));
        assert!(matches!(
            truck.kind(),
            VehicleKind::Truck { current_load, .. } if *current_load == 800.0
        ));

        // excede por 100: rechazado, carga intacta
        let mut fx = EffectsLog::new();
        assert!(!truck.load(300.0, &mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
        assert!(last_alert(&fx).message.contains("200.0"));
        assert!(matches!(
            truck.kind(),
            VehicleKind::Truck { current_load, .. } if *current_load == 800.0
        ));

        assert!(truck.unload(800.0, &mut fx));
        assert!(matches!(
            truck.kind(),
            VehicleKind::Truck { current_load, .. } if *current_load == 0.0
        ));
    }

    #[test]
    fn carga_siempre_dentro_de_los_limites() {
        let mut truck = Vehicle::truck("Volvo FH", "Azul", 500.0).unwrap();
        let mut fx = EffectsLog::new();
        let weights = [120.0, -5.0, 300.0, 200.0, 80.0, 0.0];
        for weight in weights {
            truck.load(weight, &mut fx);
            truck.unload(weight / 2.0, &mut fx);
            if let VehicleKind::Truck {
                cargo_capacity,
                current_load,
            } = truck.kind()
            {
                assert!(*current_load >= 0.0 && current_load <= cargo_capacity);
            }
        }
    }

    #[test]
    fn descargar_mas_de_lo_cargado_avisa_con_el_exceso() {
        let mut truck = Vehicle::truck("Volvo FH", "Azul", 500.0).unwrap();
        let mut fx = EffectsLog::new();
        truck.load(100.0, &mut fx);

        let mut fx = EffectsLog::new();
        assert!(!truck.unload(150.0, &mut fx));
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Warning);
        assert!(last_alert(&fx).message.contains("50.0"));
    }

    #[test]
    fn carga_en_vehiculo_comun_es_error() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        assert!(!car.load(100.0, &mut fx));
        assert!(!car.unload(100.0, &mut fx));
        assert_eq!(fx.cues, vec![SoundCue::Error, SoundCue::Error]);
    }

    #[test]
    fn factor_de_carga_penaliza_la_aceleracion() {
        let mut truck = Vehicle::truck("Scania R450", "Branco", 1000.0).unwrap();
        let mut fx = EffectsLog::new();
        truck.load(1000.0, &mut fx);
        truck.start(&mut fx);
        // factor en plena carga: max(0.3, 1 - 0.7) = 0.3
        assert!(truck.accelerate(Some(10.0), &mut fx));
        assert!((truck.speed() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn camion_vacio_acelera_sin_penalidad() {
        let mut truck = Vehicle::truck("Scania R450", "Branco", 1000.0).unwrap();
        let mut fx = EffectsLog::new();
        truck.start(&mut fx);
        assert!(truck.accelerate(Some(10.0), &mut fx));
        assert_eq!(truck.speed(), 10.0);
    }

    #[test]
    fn buzinar_siempre_funciona() {
        let car = Vehicle::car("Fusca", "Azul").unwrap();
        let mut fx = EffectsLog::new();
        assert!(car.honk(&mut fx));
        assert_eq!(fx.cues, vec![SoundCue::Horn]);
        assert_eq!(last_alert(&fx).duration_ms, Some(2000));
    }

    #[test]
    fn historial_queda_ordenado_por_fecha_descendente() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        for date in ["2026-02-01", "2025-11-20", "2026-07-15", "2026-01-05"] {
            let record = MaintenanceRecord::new(date, "Revisão", 100.0, "").unwrap();
            car.add_maintenance(record, &mut fx);
            let dates: Vec<_> = car
                .maintenance_history()
                .iter()
                .map(|record| record.date())
                .collect();
            let mut sorted = dates.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            assert_eq!(dates, sorted);
        }
        assert!(fx.updated);
        assert_eq!(car.maintenance_history().len(), 4);
    }

    #[test]
    fn particion_de_manutenciones_pasadas_y_futuras() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        for date in ["2026-03-09", "2026-03-10", "2026-03-11", "2026-04-01"] {
            car.add_maintenance(
                MaintenanceRecord::new(date, "Revisão", 50.0, "").unwrap(),
                &mut fx,
            );
        }
        assert_eq!(car.past_maintenance_on(today).len(), 2);
        assert_eq!(car.upcoming_maintenance_on(today).len(), 2);
    }

    #[test]
    fn quitar_registros_por_id() {
        let mut car = Vehicle::car("Gol", "Vermelho").unwrap();
        let mut fx = EffectsLog::new();
        let record = MaintenanceRecord::new("2026-03-10", "Revisão", 50.0, "").unwrap();
        let record_id = record.id();
        car.add_maintenance(record, &mut fx);
        assert!(car.remove_maintenance(record_id, &mut fx));
        assert!(!car.remove_maintenance(record_id, &mut fx));
        assert!(car.maintenance_history().is_empty());
    }

    #[test]
    fn rehidratacion_descarta_registros_malformados() {
        let snapshot = VehicleSnapshot {
            id: None,
            kind: VehicleKind::Car,
            model: "Fusca".to_string(),
            color: "Azul".to_string(),
            max_speed: None,
            is_running: false,
            speed: 0.0,
            image: None,
            maintenance_history: vec![
                MaintenanceSnapshot {
                    id: None,
                    date: "2026-03-10".to_string(),
                    service_type: "Revisão".to_string(),
                    cost: 100.0,
                    description: String::new(),
                },
                MaintenanceSnapshot {
                    id: None,
                    date: "fecha-rota".to_string(),
                    service_type: "Revisão".to_string(),
                    cost: 100.0,
                    description: String::new(),
                },
                MaintenanceSnapshot {
                    id: None,
                    date: "2026-04-01".to_string(),
                    service_type: String::new(),
                    cost: 100.0,
                    description: String::new(),
                },
            ],
            trip_history: vec![],
        };
        let rehydrated = Vehicle::rehydrate(snapshot).unwrap();
        assert_eq!(rehydrated.vehicle.maintenance_history().len(), 1);
        assert_eq!(rehydrated.dropped.len(), 2);
    }

    #[test]
    fn rehidratacion_sanea_el_estado_transitorio() {
        let snapshot = VehicleSnapshot {
            id: None,
            kind: VehicleKind::SportsCar {
                turbo_engaged: true,
            },
            model: "Ferrari F8".to_string(),
            color: "Vermelho".to_string(),
            max_speed: Some(250.0),
            // apagado: el turbo almacenado se limpia
            is_running: false,
            speed: 400.0,
            image: None,
            maintenance_history: vec![],
            trip_history: vec![],
        };
        let rehydrated = Vehicle::rehydrate(snapshot).unwrap();
        assert!(matches!(
            rehydrated.vehicle.kind(),
            VehicleKind::SportsCar {
                turbo_engaged: false
            }
        ));
        // velocidad recortada al tope
        assert_eq!(rehydrated.vehicle.speed(), 250.0);
    }

    #[test]
    fn camion_sobrecargado_rehidratado_no_arranca() {
        let snapshot = VehicleSnapshot {
            id: None,
            kind: VehicleKind::Truck {
                cargo_capacity: 1000.0,
                current_load: 1500.0,
            },
            model: "Scania R450".to_string(),
            color: "Branco".to_string(),
            max_speed: None,
            is_running: false,
            speed: 0.0,
            image: None,
            maintenance_history: vec![],
            trip_history: vec![],
        };
        // la sobrecarga almacenada se preserva y la guardia la rechaza
        let mut truck = Vehicle::rehydrate(snapshot).unwrap().vehicle;
        let mut fx = EffectsLog::new();
        assert!(!truck.start(&mut fx));
        assert!(!truck.is_running());
        assert_eq!(last_alert(&fx).severity, AlertSeverity::Error);
    }

    #[test]
    fn rehidratacion_rechaza_vehiculo_sin_modelo() {
        let snapshot = VehicleSnapshot {
            id: None,
            kind: VehicleKind::Car,
            model: "  ".to_string(),
            color: "Azul".to_string(),
            max_speed: None,
            is_running: false,
            speed: 0.0,
            image: None,
            maintenance_history: vec![],
            trip_history: vec![],
        };
        assert!(Vehicle::rehydrate(snapshot).is_err());
    }

    #[test]
    fn snapshot_serializa_el_discriminador_esperado() {
        let truck = Vehicle::truck("Scania R450", "Branco", 5000.0).unwrap();
        let json = serde_json::to_value(truck.snapshot()).unwrap();
        assert_eq!(json["tipo"], "Caminhao");
        assert_eq!(json["capacidadeCarga"], 5000.0);

        let sports = Vehicle::sports_car("Ferrari F8", "Vermelho").unwrap();
        let json = serde_json::to_value(sports.snapshot()).unwrap();
        assert_eq!(json["tipo"], "CarroEsportivo");
        assert_eq!(json["turboAtivado"], false);
    }

    #[test]
    fn snapshot_acepta_los_alias_del_cliente_legado() {
        let json = serde_json::json!({
            "tipo": "Caminhao",
            "modelo": "Mercedes Actros",
            "cor": "Cinza",
            "capacidadeCarga": 8000.0,
            "cargaAtual": 1200.0,
            "velocidadeMaxima": 110.0,
            "ligado": true,
            "velocidade": 60.0,
            "historicoManutencao": [],
            "historicoViagens": []
        });
        let snapshot: VehicleSnapshot = serde_json::from_value(json).unwrap();
        let vehicle = Vehicle::rehydrate(snapshot).unwrap().vehicle;
        assert_eq!(vehicle.model(), "Mercedes Actros");
        assert!(vehicle.is_running());
        assert_eq!(vehicle.speed(), 60.0);
        assert!(matches!(
            vehicle.kind(),
            VehicleKind::Truck { current_load, .. } if *current_load == 1200.0
        ));
    }
}
