use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::{
        StatusCode,
        header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, instrument, warn};

use crate::{
    config::ServiceConfig,
    error::FindWeatherError,
    location_resolver::LocationResolver,
    models::Temperatures,
    validation::verify_valid_cep,
    weather::WeatherClient,
};

/// Lookup clients shared by every request
#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<LocationResolver>,
    pub weather: Arc<WeatherClient>,
}

impl AppState {
    /// Build both lookup clients over one pooled HTTP client
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds.into()))
            .user_agent(config.http.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            locations: Arc::new(LocationResolver::new(
                client.clone(),
                config.viacep.base_url.as_str(),
            )),
            weather: Arc::new(WeatherClient::new(
                client,
                config.weather.base_url.as_str(),
                config.weather.api_key.as_str(),
            )),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(find_weather))
        .with_state(state)
}

#[instrument(skip(state))]
async fn find_weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, FindWeatherError> {
    // A repeated parameter keeps its first value
    let cep = params
        .into_iter()
        .find_map(|(key, value)| (key == "cep").then_some(value))
        .filter(|cep| !cep.is_empty())
        .ok_or(FindWeatherError::MissingCep)?;

    if !verify_valid_cep(&cep).map_err(FindWeatherError::Pattern)? {
        return Err(FindWeatherError::InvalidFormat);
    }

    let address = state.locations.resolve(&cep).await?;
    let reading = state.weather.current(&address.locality).await?;

    let temperatures: Temperatures = reading.into();
    debug!(?temperatures, "Temperatures for {}", address.locality);

    let body = serde_json::to_vec(&temperatures).map_err(FindWeatherError::Encoding)?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response())
}

impl IntoResponse for FindWeatherError {
    fn into_response(self) -> Response {
        let (status, second_write) = self.status_writes();
        warn!(status = status.as_u16(), "Request failed: {}", self);
        if let Some(dropped) = second_write {
            warn!(
                written = status.as_u16(),
                dropped = dropped.as_u16(),
                "Status already written, ignoring second status write"
            );
        }

        match self.body() {
            Some(body) => (
                status,
                [
                    (CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
                ],
                body,
            )
                .into_response(),
            None => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Upstreams {
        viacep: MockServer,
        weather: MockServer,
    }

    impl Upstreams {
        async fn start() -> Self {
            Self {
                viacep: MockServer::start().await,
                weather: MockServer::start().await,
            }
        }

        fn app(&self) -> Router {
            let mut config = ServiceConfig::default();
            config.weather.api_key = "test_weather_key".to_string();
            config.weather.base_url = self.weather.uri();
            config.viacep.base_url = self.viacep.uri();
            router(AppState::new(&config).unwrap())
        }

        async fn cep(&self, cep: &str, body: &str) {
            Mock::given(method("GET"))
                .and(path(format!("/ws/{cep}/json/")))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&self.viacep)
                .await;
        }

        async fn weather(&self, location: &str, status: u16, body: serde_json::Value) {
            Mock::given(method("GET"))
                .and(path("/v1/current.json"))
                .and(query_param("q", location))
                .respond_with(ResponseTemplate::new(status).set_body_json(body))
                .mount(&self.weather)
                .await;
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_success_returns_three_scales() {
        let upstreams = Upstreams::start().await;
        upstreams
            .cep("01001000", r#"{"cep": "01001-000", "localidade": "São Paulo", "uf": "SP"}"#)
            .await;
        upstreams
            .weather(
                "São Paulo",
                200,
                serde_json::json!({"current": {"temp_c": 21.5, "temp_f": 70.7}}),
            )
            .await;

        let (status, body) = get(upstreams.app(), "/?cep=01001000").await;
        assert_eq!(status, StatusCode::OK);

        let temperatures: Temperatures = serde_json::from_str(&body).unwrap();
        assert_eq!(temperatures.celsius, 21.5);
        assert_eq!(temperatures.fahrenheit, 70.7);
        assert_eq!(temperatures.kelvin, temperatures.celsius + 273.0);
    }

    #[tokio::test]
    async fn test_missing_cep_is_bad_request() {
        let upstreams = Upstreams::start().await;

        let (status, body) = get(upstreams.app(), "/?cep=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "CEP is required");

        let (status, body) = get(upstreams.app(), "/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "CEP is required");
    }

    #[tokio::test]
    async fn test_malformed_cep_is_unprocessable() {
        let upstreams = Upstreams::start().await;

        let (status, body) = get(upstreams.app(), "/?cep=000").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, "invalid zipcode");
    }

    #[tokio::test]
    async fn test_repeated_cep_uses_first_value() {
        let upstreams = Upstreams::start().await;
        upstreams.cep("12345678", r#"{"erro": true}"#).await;

        let (status, body) = get(upstreams.app(), "/?cep=000&cep=12345678").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, "invalid zipcode");

        let (status, body) = get(upstreams.app(), "/?cep=&cep=12345678").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "CEP is required");

        assert!(upstreams.viacep.received_requests().await.unwrap().is_empty());

        let (status, body) = get(upstreams.app(), "/?cep=12345678&cep=000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "can not find zipcode");
    }

    #[tokio::test]
    async fn test_unknown_cep_is_not_found() {
        let upstreams = Upstreams::start().await;
        upstreams.cep("12345678", r#"{"erro": true}"#).await;

        let (status, body) = get(upstreams.app(), "/?cep=12345678").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "can not find zipcode");
    }

    #[tokio::test]
    async fn test_undecodable_cep_body_keeps_first_status() {
        let upstreams = Upstreams::start().await;
        upstreams.cep("12345678", "<html>Bad Gateway</html>").await;

        let (status, body) = get(upstreams.app(), "/?cep=12345678").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Error getting CEP info: "));
    }

    #[tokio::test]
    async fn test_unreachable_cep_service_keeps_first_status() {
        let mut config = ServiceConfig::default();
        config.weather.api_key = "test_weather_key".to_string();
        config.viacep.base_url = "http://127.0.0.1:1".to_string();
        let app = router(AppState::new(&config).unwrap());

        let (status, body) = get(app, "/?cep=01001000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Error getting CEP info: "));
    }

    #[tokio::test]
    async fn test_weather_service_error_keeps_first_status() {
        let upstreams = Upstreams::start().await;
        upstreams
            .cep("01001000", r#"{"cep": "01001-000", "localidade": "Atlantis"}"#)
            .await;
        upstreams
            .weather(
                "Atlantis",
                400,
                serde_json::json!({"error": {"code": 1006, "message": "No matching location found."}}),
            )
            .await;

        let (status, body) = get(upstreams.app(), "/?cep=01001000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Error getting weather info: No matching location found.");
    }

    #[test]
    fn test_error_responses_are_plain_text() {
        let response = FindWeatherError::InvalidFormat.into_response();
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn test_pattern_failure_is_empty_500() {
        let err = FindWeatherError::Pattern(regex::Regex::new("(").unwrap_err());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
