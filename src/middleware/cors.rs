//! Middleware de CORS
//!
//! La política depende del entorno: permisiva en desarrollo, orígenes
//! explícitos en producción.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::EnvironmentConfig;

/// Capa de CORS según el entorno configurado
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if config.is_production() && !config.cors_origins.is_empty() {
        cors_with_origins(&config.cors_origins)
    } else {
        // desarrollo: cualquier origen
        CorsLayer::very_permissive()
    }
}

fn cors_with_origins(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
}
