//! Integration tests for the zipcode weather service
//!
//! Both upstreams are replaced by wiremock servers; the router is driven
//! in-process.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipcode_weather::config::{GeocodingConfig, WeatherConfig};
use zipcode_weather::{
    AppConfig, AppState, LocationLookup, LocationResolver, LookupError, TemperatureLookup,
    TemperatureResolver, build_state, web,
};

const API_KEY: &str = "test-api-key";

struct Upstreams {
    geocoding: MockServer,
    weather: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            geocoding: MockServer::start().await,
            weather: MockServer::start().await,
        }
    }

    fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.geocoding = GeocodingConfig {
            base_url: format!("{}/ws", self.geocoding.uri()),
            timeout_seconds: 2,
        };
        config.weather = WeatherConfig {
            api_key: API_KEY.to_string(),
            base_url: format!("{}/v1", self.weather.uri()),
            timeout_seconds: 2,
        };
        config
    }

    fn state(&self) -> AppState {
        build_state(&self.config()).unwrap()
    }

    async fn city(&self, zipcode: &str, city: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/ws/{zipcode}/json/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": format!("{}-{}", &zipcode[..5], &zipcode[5..]),
                "localidade": city,
                "uf": "CE"
            })))
            .mount(&self.geocoding)
            .await;
    }

    async fn current(&self, city: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("key", API_KEY))
            .and(query_param("q", city))
            .respond_with(response)
            .mount(&self.weather)
            .await;
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = web::app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_valid_zipcode_returns_temperature() {
    let upstreams = Upstreams::start().await;
    upstreams.city("60125001", "Fortaleza").await;
    upstreams
        .current(
            "Fortaleza",
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": {"name": "Fortaleza"},
                "current": {"temp_c": 30.0, "condition": {"text": "Sunny"}}
            })),
        )
        .await;

    let (status, content_type, body) = get(upstreams.state(), "/?zipcode=60125001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["temp_c"].as_f64(), Some(30.0));
    assert_eq!(value["temp_f"].as_f64(), Some(86.0));
    assert!((value["temp_k"].as_f64().unwrap() - 303.15).abs() < 1e-9);
}

#[tokio::test]
async fn test_city_with_spaces_is_encoded() {
    let upstreams = Upstreams::start().await;
    upstreams.city("01001000", "São Paulo").await;
    upstreams
        .current(
            "São Paulo",
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"current": {"temp_c": 18.2}})),
        )
        .await;

    let (status, _, _) = get(upstreams.state(), "/?zipcode=01001000").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_zipcode_makes_no_upstream_calls() {
    let upstreams = Upstreams::start().await;

    let (status, _, body) = get(upstreams.state(), "/?zipcode=123").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, "invalid zipcode\n");
    assert!(upstreams.geocoding.received_requests().await.unwrap().is_empty());
    assert!(upstreams.weather.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_zipcode_returns_not_found() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"erro": true})))
        .mount(&upstreams.geocoding)
        .await;

    let (status, _, body) = get(upstreams.state(), "/?zipcode=99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "can not find zipcode\n");
    assert!(upstreams.weather.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_geocoding_response_returns_not_found() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/abcdefgh/json/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<h1>Bad Request</h1>"))
        .mount(&upstreams.geocoding)
        .await;

    let (status, _, body) = get(upstreams.state(), "/?zipcode=abcdefgh").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "can not find zipcode\n");
}

#[tokio::test]
async fn test_weather_failures_return_internal_error() {
    let failures = [
        ResponseTemplate::new(200).set_body_string("not json"),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"current": {}})),
        ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 2006, "message": "API key is invalid."}
        })),
    ];

    for failure in failures {
        let upstreams = Upstreams::start().await;
        upstreams.city("60125001", "Fortaleza").await;
        upstreams.current("Fortaleza", failure).await;

        let (status, _, body) = get(upstreams.state(), "/?zipcode=60125001").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "failed to get temperature\n");
    }
}

#[tokio::test]
async fn test_unreachable_weather_service_returns_internal_error() {
    let upstreams = Upstreams::start().await;
    upstreams.city("60125001", "Fortaleza").await;
    let mut config = upstreams.config();
    // Nothing listens on port 9 locally
    config.weather.base_url = "http://127.0.0.1:9/v1".to_string();

    let (status, _, body) = get(build_state(&config).unwrap(), "/?zipcode=60125001").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "failed to get temperature\n");
}

#[tokio::test]
async fn test_location_resolver_reports_transport_errors() {
    let resolver = LocationResolver::new(&GeocodingConfig {
        base_url: "http://127.0.0.1:9/ws".to_string(),
        timeout_seconds: 2,
    })
    .unwrap();

    let err = resolver.resolve("60125001").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport { .. }));
}

#[tokio::test]
async fn test_temperature_resolver_times_out() {
    let weather = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"current": {"temp_c": 10.0}}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&weather)
        .await;

    let resolver = TemperatureResolver::new(&WeatherConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("{}/v1", weather.uri()),
        timeout_seconds: 1,
    })
    .unwrap();

    let err = resolver.resolve("Fortaleza").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport { .. }));
}

/// Hits the real geocoding and weather services; needs `WEATHER_API_KEY`.
#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_upstreams() {
    let config = AppConfig::load().unwrap();
    let state = build_state(&config).unwrap();

    let (status, content_type, body) = get(state.clone(), "/?zipcode=60125001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    for field in ["temp_c", "temp_f", "temp_k"] {
        assert!(value[field].is_number());
    }

    let (status, _, body) = get(state, "/?zipcode=99999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "can not find zipcode\n");
}
