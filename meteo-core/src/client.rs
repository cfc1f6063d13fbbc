use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyForecast, GeocodeResult, WeatherSnapshot},
};

/// Open-Meteo forecast API endpoint.
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Open-Meteo geocoding API endpoint.
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Current-condition fields requested from the forecast API.
const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m,\
                              apparent_temperature,pressure_msl,visibility,uv_index";

/// Daily aggregate fields requested from the forecast API.
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,\
     wind_speed_10m_max";

/// Client for the Open-Meteo forecast and geocoding APIs.
///
/// Stateless between calls: each fetch is a single outbound request with no
/// retry and no caching, producing a fresh [`WeatherSnapshot`].
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            forecast_url: FORECAST_URL.to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at alternative endpoints (stub servers in tests).
    pub fn with_endpoints(
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
        }
    }

    /// Fetch current conditions and the 7-day forecast for a coordinate pair.
    ///
    /// Coordinates are passed through unvalidated; out-of-range values are
    /// rejected upstream and surface as [`WeatherError::Upstream`]. The
    /// provider resolves the timezone itself (`timezone=auto`).
    pub async fn fetch_current_and_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(latitude, longitude, "requesting current conditions and 7-day forecast");

        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("forecast_days", "7"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(status.to_string()));
        }

        let body = res.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;

        parsed.try_into()
    }

    /// Resolve a free-text place name to up to 10 geocoding matches.
    ///
    /// Result names are requested in Italian. Zero upstream matches yield an
    /// empty vector, not an error.
    pub async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, WeatherError> {
        tracing::debug!(query, "geocoding place name");

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", query),
                ("count", "10"),
                ("language", "it"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(status.to_string()));
        }

        let body = res.text().await?;
        let parsed: GeocodingResponse = serde_json::from_str(&body)?;

        let results = parsed
            .results
            .into_iter()
            .map(|entry| GeocodeResult {
                latitude: entry.latitude,
                longitude: entry.longitude,
                name: entry.name,
                country: entry.country.unwrap_or_default(),
                timezone: entry.timezone.unwrap_or_else(|| "UTC".to_string()),
            })
            .collect();

        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: f64,
    longitude: f64,
    timezone: String,
    current: RawCurrent,
    daily: RawDaily,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    weather_code: i32,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: f64,
    #[serde(rename = "relative_humidity_2m")]
    humidity: u8,
    #[serde(rename = "apparent_temperature")]
    feels_like: f64,
    #[serde(rename = "pressure_msl")]
    pressure: f64,
    visibility: f64,
    uv_index: f64,
    time: String,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    weather_code: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<f64>,
    #[serde(rename = "precipitation_probability_max")]
    precipitation_probability: Vec<u8>,
    #[serde(rename = "wind_speed_10m_max")]
    wind_speed_max: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    /// Absent entirely when the query has no matches.
    #[serde(default)]
    results: Vec<RawGeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeEntry {
    latitude: f64,
    longitude: f64,
    name: String,
    country: Option<String>,
    timezone: Option<String>,
}

impl TryFrom<ForecastResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(raw: ForecastResponse) -> Result<Self, Self::Error> {
        let daily = DailyForecast {
            time: raw.daily.time,
            weather_code: raw.daily.weather_code,
            temperature_max_c: raw.daily.temperature_max,
            temperature_min_c: raw.daily.temperature_min,
            precipitation_probability_pct: raw.daily.precipitation_probability,
            wind_speed_max_kmh: raw.daily.wind_speed_max,
        };

        if !daily.is_aligned() {
            return Err(WeatherError::MalformedResponse(
                "daily sequences have mismatched lengths".to_string(),
            ));
        }

        Ok(WeatherSnapshot {
            latitude: raw.latitude,
            longitude: raw.longitude,
            timezone: raw.timezone,
            current: CurrentConditions {
                temperature_c: raw.current.temperature,
                weather_code: raw.current.weather_code,
                wind_speed_kmh: raw.current.wind_speed,
                humidity_pct: raw.current.humidity,
                pressure_hpa: raw.current.pressure,
                visibility_m: raw.current.visibility,
                feels_like_c: raw.current.feels_like,
                uv_index: raw.current.uv_index,
                time: raw.current.time,
            },
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn forecast_client(server: &MockServer) -> WeatherClient {
        WeatherClient::with_endpoints(
            format!("{}/v1/forecast", server.uri()),
            format!("{}/v1/search", server.uri()),
        )
    }

    fn forecast_payload() -> serde_json::Value {
        json!({
            "latitude": 45.46,
            "longitude": 9.18,
            "timezone": "Europe/Rome",
            "current": {
                "time": "2026-02-02T14:30",
                "temperature_2m": 7.4,
                "weather_code": 61,
                "wind_speed_10m": 14.8,
                "relative_humidity_2m": 82,
                "apparent_temperature": 5.1,
                "pressure_msl": 1017.3,
                "visibility": 24140.0,
                "uv_index": 1.2
            },
            "daily": {
                "time": [
                    "2026-02-02", "2026-02-03", "2026-02-04", "2026-02-05",
                    "2026-02-06", "2026-02-07", "2026-02-08"
                ],
                "weather_code": [61, 3, 0, 2, 45, 71, 95],
                "temperature_2m_max": [8.2, 9.1, 10.4, 9.8, 7.6, 4.2, 6.9],
                "temperature_2m_min": [3.1, 2.8, 1.9, 3.4, 2.2, -0.6, 1.1],
                "precipitation_probability_max": [85, 30, 5, 15, 20, 70, 90],
                "wind_speed_10m_max": [22.1, 15.4, 9.8, 12.6, 11.0, 18.7, 31.2]
            }
        })
    }

    #[tokio::test]
    async fn forecast_request_carries_expected_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "45.46"))
            .and(query_param("longitude", "9.18"))
            .and(query_param("current", CURRENT_FIELDS))
            .and(query_param("daily", DAILY_FIELDS))
            .and(query_param("timezone", "auto"))
            .and(query_param("forecast_days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let snapshot = client.fetch_current_and_forecast(45.46, 9.18).await.unwrap();

        assert_eq!(snapshot.timezone, "Europe/Rome");
        assert_eq!(snapshot.current.weather_code, 61);
        assert_eq!(snapshot.current.humidity_pct, 82);
        assert_eq!(snapshot.current.feels_like_c, 5.1);
    }

    #[tokio::test]
    async fn forecast_normalizes_seven_aligned_days() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let snapshot = client.fetch_current_and_forecast(45.46, 9.18).await.unwrap();

        assert_eq!(snapshot.daily.len(), 7);
        assert!(snapshot.daily.is_aligned());
        assert_eq!(snapshot.daily.days().count(), 7);
        assert_eq!(snapshot.daily.time[0], "2026-02-02");
        assert_eq!(snapshot.daily.precipitation_probability_pct[6], 90);
    }

    #[tokio::test]
    async fn non_success_status_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let err = client.fetch_current_and_forecast(45.46, 9.18).await.unwrap_err();

        assert!(matches!(&err, WeatherError::Upstream(status) if status.contains("503")));
    }

    #[tokio::test]
    async fn missing_current_field_is_a_malformed_response() {
        let server = MockServer::start().await;

        let mut payload = forecast_payload();
        payload["current"]
            .as_object_mut()
            .unwrap()
            .remove("pressure_msl");

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let err = client.fetch_current_and_forecast(45.46, 9.18).await.unwrap_err();

        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn mismatched_daily_lengths_are_rejected() {
        let server = MockServer::start().await;

        let mut payload = forecast_payload();
        payload["daily"]["weather_code"]
            .as_array_mut()
            .unwrap()
            .pop();

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let err = client.fetch_current_and_forecast(45.46, 9.18).await.unwrap_err();

        assert!(
            matches!(&err, WeatherError::MalformedResponse(msg) if msg.contains("mismatched"))
        );
    }

    #[tokio::test]
    async fn geocode_request_carries_expected_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Milano"))
            .and(query_param("count", "10"))
            .and(query_param("language", "it"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {
                        "latitude": 45.4643,
                        "longitude": 9.1895,
                        "name": "Milano",
                        "country": "Italia",
                        "timezone": "Europe/Rome"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let results = client.geocode("Milano").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Milano");
        assert_eq!(results[0].country, "Italia");
        assert_eq!(results[0].timezone, "Europe/Rome");
    }

    #[tokio::test]
    async fn geocode_zero_matches_is_an_empty_list() {
        let server = MockServer::start().await;

        // The provider omits `results` entirely when nothing matched.
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.4 })),
            )
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let results = client.geocode("xyzzy").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn geocode_defaults_missing_country_and_timezone() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "latitude": 0.0, "longitude": 0.0, "name": "Null Island" }
                ]
            })))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let results = client.geocode("Null Island").await.unwrap();

        assert_eq!(results[0].country, "");
        assert_eq!(results[0].timezone, "UTC");
    }

    #[tokio::test]
    async fn geocode_non_success_status_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = forecast_client(&server);
        let err = client.geocode("Milano").await.unwrap_err();

        assert!(matches!(&err, WeatherError::Upstream(status) if status.contains("429")));
    }
}
