//! Modelos del sistema
//!
//! Este módulo contiene el modelo de dominio de la garagem (vehículos,
//! manutenciones, viajes, efectos) y los modelos que mapean al schema
//! PostgreSQL.

pub mod effects;
pub mod maintenance;
pub mod trip;
pub mod user;
pub mod vehicle;

use thiserror::Error;

/// Errores del modelo de dominio
///
/// `Validation` cubre fallos de construcción (fail fast, nunca se produce
/// un objeto parcial). `InvalidArgument` cubre entradas estructuralmente
/// inválidas en la frontera de rehidratación. Las violaciones de
/// precondición operacionales NO pasan por aquí: se reportan vía el sink
/// de alertas y un retorno booleano.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidArgument(String),
}
