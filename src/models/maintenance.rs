//! Registro de manutención
//!
//! Valor inmutable que representa un evento de servicio del vehículo. La
//! validación ocurre una única vez en la construcción; después de eso el
//! registro no puede mutarse. Cada registro pertenece exclusivamente al
//! historial del vehículo que lo contiene.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    id: Uuid,
    date: NaiveDate,
    service_type: String,
    cost: Decimal,
    description: String,
}

impl MaintenanceRecord {
    /// Construye un registro validando fecha, tipo y costo. Falla sin
    /// producir un objeto parcial.
    pub fn new(
        date_input: &str,
        service_type: &str,
        cost: f64,
        description: &str,
    ) -> Result<Self, DomainError> {
        Self::with_id(Uuid::new_v4(), date_input, service_type, cost, description)
    }

    pub fn with_id(
        id: Uuid,
        date_input: &str,
        service_type: &str,
        cost: f64,
        description: &str,
    ) -> Result<Self, DomainError> {
        let date = parse_service_date(date_input)?;

        let service_type = service_type.trim();
        if service_type.is_empty() {
            return Err(DomainError::Validation(
                "o tipo de serviço é obrigatório".to_string(),
            ));
        }

        if !cost.is_finite() {
            return Err(DomainError::Validation(format!(
                "custo de manutenção inválido: {}",
                cost
            )));
        }
        let cost = Decimal::from_f64_retain(cost).ok_or_else(|| {
            DomainError::Validation(format!("custo de manutenção inválido: {}", cost))
        })?;
        if cost < Decimal::ZERO {
            return Err(DomainError::Validation(
                "o custo da manutenção não pode ser negativo".to_string(),
            ));
        }

        Ok(Self {
            id,
            date,
            service_type: service_type.to_string(),
            cost,
            description: description.trim().to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Texto de exhibición: `dd/mm/aaaa - Tipo (R$ custo)[ - Desc: ...]`
    pub fn format(&self) -> String {
        let mut text = format!(
            "{} - {} (R$ {:.2})",
            self.date.format("%d/%m/%Y"),
            self.service_type,
            self.cost
        );
        if !self.description.is_empty() {
            text.push_str(&format!(" - Desc: {}", self.description));
        }
        text
    }

    /// `true` solo si la fecha es estrictamente posterior al día calendario
    /// UTC actual.
    pub fn is_future_scheduled(&self) -> bool {
        self.is_future_on(Utc::now().date_naive())
    }

    pub fn is_future_on(&self, today: NaiveDate) -> bool {
        self.date > today
    }

    pub fn to_snapshot(&self) -> MaintenanceSnapshot {
        MaintenanceSnapshot {
            id: Some(self.id),
            date: self.date.format("%Y-%m-%d").to_string(),
            service_type: self.service_type.clone(),
            cost: self.cost.to_f64().unwrap_or(0.0),
            description: self.description.clone(),
        }
    }

    pub fn from_snapshot(snapshot: &MaintenanceSnapshot) -> Result<Self, DomainError> {
        Self::with_id(
            snapshot.id.unwrap_or_else(Uuid::new_v4),
            &snapshot.date,
            &snapshot.service_type,
            snapshot.cost,
            &snapshot.description,
        )
    }
}

/// Representación serializada cruda de un registro de manutención. Es la
/// frontera de parse: entradas malformadas se descartan al rehidratar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "data")]
    pub date: String,
    #[serde(alias = "tipo")]
    pub service_type: String,
    #[serde(default, alias = "custo")]
    pub cost: f64,
    #[serde(default, alias = "descricao")]
    pub description: String,
}

/// Normaliza la entrada al día calendario UTC: acepta `YYYY-MM-DD` o
/// RFC3339 (la hora y el offset se descartan tras convertir a UTC).
fn parse_service_date(input: &str) -> Result<NaiveDate, DomainError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(DomainError::Validation(
            "a data da manutenção é obrigatória".to_string(),
        ));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc).date_naive());
    }
    Err(DomainError::Validation(format!(
        "data de manutenção inválida: '{}'",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construye_registro_valido() {
        let record =
            MaintenanceRecord::new("2026-03-10", "Troca de óleo", 150.0, "Óleo sintético")
                .unwrap();
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(record.service_type(), "Troca de óleo");
        assert_eq!(record.cost(), Decimal::new(150, 0));
        assert_eq!(record.description(), "Óleo sintético");
    }

    #[test]
    fn normaliza_fecha_rfc3339_al_dia_utc() {
        // 23:30 del día 9 en UTC-3 ya es día 10 en UTC
        let record =
            MaintenanceRecord::new("2026-03-09T23:30:00-03:00", "Revisão", 0.0, "").unwrap();
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn rechaza_fecha_invalida() {
        assert!(MaintenanceRecord::new("10/03/2026", "Revisão", 10.0, "").is_err());
        assert!(MaintenanceRecord::new("", "Revisão", 10.0, "").is_err());
        assert!(MaintenanceRecord::new("no-es-fecha", "Revisão", 10.0, "").is_err());
    }

    #[test]
    fn rechaza_tipo_vacio_y_costo_invalido() {
        assert!(MaintenanceRecord::new("2026-03-10", "   ", 10.0, "").is_err());
        assert!(MaintenanceRecord::new("2026-03-10", "Revisão", -1.0, "").is_err());
        assert!(MaintenanceRecord::new("2026-03-10", "Revisão", f64::NAN, "").is_err());
        assert!(MaintenanceRecord::new("2026-03-10", "Revisão", f64::INFINITY, "").is_err());
    }

    #[test]
    fn clasificacion_futura_es_estricta() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let record = MaintenanceRecord::new("2026-03-10", "Revisão", 10.0, "").unwrap();
        // hoy no es futuro; mañana sí
        assert!(!record.is_future_on(today));
        let tomorrow = MaintenanceRecord::new("2026-03-11", "Revisão", 10.0, "").unwrap();
        assert!(tomorrow.is_future_on(today));
        let yesterday = MaintenanceRecord::new("2026-03-09", "Revisão", 10.0, "").unwrap();
        assert!(!yesterday.is_future_on(today));
    }

    #[test]
    fn formatea_con_y_sin_descripcion() {
        let with_desc =
            MaintenanceRecord::new("2026-03-10", "Troca de óleo", 150.5, "Filtro novo").unwrap();
        assert_eq!(
            with_desc.format(),
            "10/03/2026 - Troca de óleo (R$ 150.50) - Desc: Filtro novo"
        );

        let without_desc = MaintenanceRecord::new("2026-03-10", "Revisão", 80.0, "  ").unwrap();
        assert_eq!(without_desc.format(), "10/03/2026 - Revisão (R$ 80.00)");
    }

    #[test]
    fn snapshot_preserva_los_campos() {
        let record = MaintenanceRecord::new("2026-03-10", "Alinhamento", 99.5, "Dianteiro").unwrap();
        let snapshot = record.to_snapshot();
        assert_eq!(snapshot.date, "2026-03-10");
        let back = MaintenanceRecord::from_snapshot(&snapshot).unwrap();
        assert_eq!(back, record);
    }
}
