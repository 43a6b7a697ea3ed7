//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! en las fronteras HTTP.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Nombres de ciudad: letras (con acentos), espacios y separadores comunes
    static ref CITY_NAME: Regex = Regex::new(r"^[\p{L}][\p{L} .'\-]{1,79}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar nombre de ciudad para el proxy de clima
pub fn validate_city(value: &str) -> Result<(), ValidationError> {
    if !CITY_NAME.is_match(value.trim()) {
        let mut error = ValidationError::new("city");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("abc").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_city() {
        assert!(validate_city("São Paulo").is_ok());
        assert!(validate_city("Porto Alegre").is_ok());
        assert!(validate_city("X").is_err());
        assert!(validate_city("city; DROP TABLE").is_err());
        assert!(validate_city("").is_err());
    }
}
