//! Registro de viaje
//!
//! Viaje planeado o realizado de un vehículo. Sin comportamiento propio
//! más allá del almacenamiento: se valida al construir y se guarda en el
//! historial del vehículo.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    id: Uuid,
    destination: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    description: Option<String>,
}

impl TripRecord {
    pub fn new(
        destination: &str,
        start_date_input: &str,
        end_date_input: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, DomainError> {
        Self::with_id(
            Uuid::new_v4(),
            destination,
            start_date_input,
            end_date_input,
            description,
        )
    }

    pub fn with_id(
        id: Uuid,
        destination: &str,
        start_date_input: &str,
        end_date_input: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, DomainError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(DomainError::Validation(
                "o destino da viagem é obrigatório".to_string(),
            ));
        }

        let start_date = parse_trip_date(start_date_input, "a data de início")?;
        let end_date = match end_date_input.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(parse_trip_date(raw, "a data de fim")?),
            None => None,
        };
        if let Some(end) = end_date {
            if end < start_date {
                return Err(DomainError::Validation(
                    "a data de fim não pode ser anterior à data de início".to_string(),
                ));
            }
        }

        let description = description
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self {
            id,
            destination: destination.to_string(),
            start_date,
            end_date,
            description,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn to_snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            id: Some(self.id),
            destination: self.destination.clone(),
            start_date: self.start_date.format("%Y-%m-%d").to_string(),
            end_date: self
                .end_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            description: self.description.clone(),
        }
    }

    pub fn from_snapshot(snapshot: &TripSnapshot) -> Result<Self, DomainError> {
        Self::with_id(
            snapshot.id.unwrap_or_else(Uuid::new_v4),
            &snapshot.destination,
            &snapshot.start_date,
            snapshot.end_date.as_deref(),
            snapshot.description.as_deref(),
        )
    }
}

/// Representación serializada cruda de un viaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "destino")]
    pub destination: String,
    #[serde(alias = "dataInicio")]
    pub start_date: String,
    #[serde(default, alias = "dataFim", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, alias = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn parse_trip_date(input: &str, field: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::Validation(format!("{} da viagem é inválida: '{}'", field, input.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construye_viaje_valido() {
        let trip = TripRecord::new(
            "Praia Grande",
            "2026-01-10",
            Some("2026-01-15"),
            Some("Férias de verão"),
        )
        .unwrap();
        assert_eq!(trip.destination(), "Praia Grande");
        assert_eq!(
            trip.start_date(),
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
        );
        assert_eq!(
            trip.end_date(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
        );
    }

    #[test]
    fn rechaza_destino_vacio_y_fechas_invalidas() {
        assert!(TripRecord::new("  ", "2026-01-10", None, None).is_err());
        assert!(TripRecord::new("Campos do Jordão", "10/01/2026", None, None).is_err());
        assert!(TripRecord::new("Campos do Jordão", "", None, None).is_err());
    }

    #[test]
    fn rechaza_fin_anterior_al_inicio() {
        let result = TripRecord::new("Ubatuba", "2026-01-10", Some("2026-01-05"), None);
        assert!(result.is_err());
    }

    #[test]
    fn fin_y_descripcion_vacios_se_tratan_como_ausentes() {
        let trip = TripRecord::new("Ubatuba", "2026-01-10", Some("  "), Some("")).unwrap();
        assert_eq!(trip.end_date(), None);
        assert_eq!(trip.description(), None);
    }
}
