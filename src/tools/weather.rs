//! Built-in `getWeather` tool backed by the Open-Meteo forecast API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::ToolExecutor;
use crate::core::config::Settings;
use crate::core::errors::ApiError;
use crate::llm::ToolDescriptor;

/// Static city → (latitude, longitude) table. Read-only configuration.
static CITY_COORDS: &[(&str, f64, f64)] = &[
    ("wroclaw", 51.1079, 17.0385),
    ("warsaw", 52.2297, 21.0122),
    ("krakow", 50.0647, 19.9450),
    ("gdansk", 54.3520, 18.6466),
    ("berlin", 52.5200, 13.4050),
    ("paris", 48.8566, 2.3522),
    ("rome", 41.9028, 12.4964),
    ("london", 51.5074, -0.1278),
];

const SUPPORTED_CITIES_HINT: &str =
    "Try: Wroclaw, Warsaw, Krakow, Gdansk, Berlin, Paris, Rome, London.";

#[derive(Clone)]
pub struct WeatherTool {
    base_url: String,
    client: Client,
}

impl WeatherTool {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.weather_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: "getWeather".to_string(),
            description: "Get a 7-day daily forecast for a city (°C).".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City name in English or common transliteration (e.g., Wroclaw, Warsaw, Berlin).",
                    }
                },
                "required": ["city"],
                "additionalProperties": false,
            }),
        }
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: DailyForecast,
}

#[derive(Deserialize, Default)]
struct DailyForecast {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
}

fn lookup_coords(key: &str) -> Option<(f64, f64)> {
    CITY_COORDS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, lat, lon)| (*lat, *lon))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[async_trait]
impl ToolExecutor for WeatherTool {
    /// Unknown cities and upstream HTTP failures return guidance strings,
    /// not errors; the model folds them into its final answer.
    async fn execute(&self, args: &Value) -> Result<String, ApiError> {
        let city = args.get("city").and_then(|v| v.as_str()).unwrap_or("");
        let key = city.trim().to_lowercase();

        let Some((lat, lon)) = lookup_coords(&key) else {
            return Ok(format!(
                "I don't know coordinates for \"{}\". {}",
                city, SUPPORTED_CITIES_HINT
            ));
        };

        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily=temperature_2m_min,temperature_2m_max,weathercode&timezone=auto&forecast_days=7",
            self.base_url, lat, lon
        );

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Weather(e.to_string()))?;

        let display_city = capitalize(&key);
        if !res.status().is_success() {
            return Ok(format!(
                "Failed to fetch weather for {} (HTTP {}).",
                display_city,
                res.status().as_u16()
            ));
        }

        let data: ForecastResponse = res
            .json()
            .await
            .map_err(|e| ApiError::Weather(format!("malformed forecast response: {}", e)))?;

        let daily = data.daily;
        if daily.time.is_empty() {
            return Ok(format!("No forecast data available for {}.", display_city));
        }

        let lines: Vec<String> = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let lo = daily.temperature_2m_min.get(i).copied().unwrap_or(f64::NAN);
                let hi = daily.temperature_2m_max.get(i).copied().unwrap_or(f64::NAN);
                format!("{}: min {}°C, max {}°C", date, lo, hi)
            })
            .collect();

        Ok(format!(
            "7-day forecast for {}:\n{}",
            display_city,
            lines.join("\n")
        ))
    }
}
