//! Proxy de clima (OpenWeatherMap)
//!
//! La API key vive solo en el servidor; el cliente consulta
//! `/api/public/tempo/:cidade` y recibe la respuesta ya resumida.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::errors::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Respuesta resumida para el cliente
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub cidade: String,
    pub temperatura: f64,
    pub sensacao_termica: f64,
    pub umidade: f64,
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icone: Option<String>,
    pub vento: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: String,
    main: OpenWeatherMain,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
    wind: OpenWeatherWind,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

pub struct WeatherService {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl WeatherService {
    pub fn new(api_key: String, base_url: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url,
            client,
        }
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherResponse, AppError> {
        log::info!("🌤️ Consultando clima para: {}", city);

        let url = build_weather_url(&self.base_url, city, &self.api_key);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("User-Agent", "GaragemInteligente/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Erro consultando o clima: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Cidade '{}' não encontrada",
                city
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Clima falló con status {}: {}", status, body);
            return Err(AppError::ExternalApi(format!(
                "Serviço de clima respondeu {}",
                status
            )));
        }

        let payload: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Resposta de clima inválida: {}", e)))?;

        let condition = payload.weather.first();
        Ok(WeatherResponse {
            cidade: payload.name,
            temperatura: payload.main.temp,
            sensacao_termica: payload.main.feels_like,
            umidade: payload.main.humidity,
            descricao: condition
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "sem descrição".to_string()),
            icone: condition.and_then(|c| c.icon.clone()),
            vento: payload.wind.speed,
        })
    }
}

fn build_weather_url(base_url: &str, city: &str, api_key: &str) -> String {
    format!(
        "{}/weather?q={}&appid={}&units=metric&lang=pt_br",
        base_url,
        urlencoding::encode(city.trim()),
        api_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construye_la_url_con_la_ciudad_codificada() {
        let url = build_weather_url(
            "https://api.openweathermap.org/data/2.5",
            "São Paulo",
            "abc123",
        );
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/weather?q=S%C3%A3o%20Paulo"));
        assert!(url.contains("appid=abc123"));
        assert!(url.contains("units=metric"));
        assert!(url.contains("lang=pt_br"));
    }

    #[test]
    fn parsea_la_respuesta_de_openweather() {
        let raw = r#"{
            "name": "Curitiba",
            "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 81 },
            "weather": [ { "description": "nublado", "icon": "04d" } ],
            "wind": { "speed": 3.6 }
        }"#;
        let parsed: OpenWeatherResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.name, "Curitiba");
        assert_eq!(parsed.main.humidity, 81.0);
        assert_eq!(parsed.weather[0].description, "nublado");
    }
}
