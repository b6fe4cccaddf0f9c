//! End-to-end tool runs against a mocked Open-Meteo server.

use citytools_core::{Config, ToolResult, Toolbox};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn config_for(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        timeout_secs: Some(5),
    }
}

fn paris_search() -> serde_json::Value {
    json!({
        "results": [{
            "id": 2988507,
            "name": "Paris",
            "latitude": 48.8566,
            "longitude": 2.3522,
            "country_code": "FR",
            "timezone": "Europe/Paris"
        }],
        "generationtime_ms": 0.71
    })
}

async fn mount_search(server: &MockServer, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn paris_weather_end_to_end() {
    let server = MockServer::start().await;
    mount_search(&server, "Paris", paris_search()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 48.86,
            "longitude": 2.35,
            "current_weather": {
                "time": "2024-07-01T12:00",
                "temperature": 18.5,
                "windspeed": 10.0,
                "winddirection": 250,
                "weathercode": 3,
                "is_day": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let result = toolbox.get_weather("Paris").await;

    assert_eq!(
        result,
        ToolResult::success("The weather in Paris is 18.5°C with wind speed 10.0 km/h.")
    );
}

#[tokio::test]
async fn paris_time_end_to_end() {
    let server = MockServer::start().await;
    mount_search(&server, "paris", paris_search()).await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let result = toolbox.call("get_current_time", &json!({ "city": "paris" })).await;

    let ToolResult::Success { report } = result else {
        panic!("expected success result");
    };
    assert!(report.starts_with("The current time in Paris is "), "{report}");
    assert!(report.ends_with("CET+0100") || report.ends_with("CEST+0200"), "{report}");
}

#[tokio::test]
async fn nowhereville_is_not_found_by_either_tool() {
    let server = MockServer::start().await;
    mount_search(&server, "Nowhereville", json!({ "generationtime_ms": 0.4 })).await;

    // No forecast mock: the weather tool must stop after geocoding.
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let expected = ToolResult::error("Could not find location for 'Nowhereville'.");

    assert_eq!(toolbox.get_weather("Nowhereville").await, expected);
    assert_eq!(toolbox.get_current_time("Nowhereville").await, expected);
}

#[tokio::test]
async fn forecast_without_current_weather() {
    let server = MockServer::start().await;
    mount_search(&server, "paris", paris_search()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "latitude": 48.86, "longitude": 2.35 })),
        )
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    assert_eq!(
        toolbox.get_weather("paris").await,
        ToolResult::error("Weather data not available for 'paris'.")
    );
}

#[tokio::test]
async fn geocoding_result_without_timezone() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Null Island",
        json!({ "results": [{ "name": "Null Island", "latitude": 0.0, "longitude": 0.0 }] }),
    )
    .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    assert_eq!(
        toolbox.get_current_time("Null Island").await,
        ToolResult::error("Timezone information not available for 'Null Island'.")
    );
}

#[tokio::test]
async fn geocoder_rejection_reads_as_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": "Parameter name must not be empty."
        })))
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();

    assert_eq!(
        toolbox.get_current_time("").await,
        ToolResult::error("Could not find location for ''.")
    );
    assert_eq!(
        toolbox.get_weather("Paris").await,
        ToolResult::error("Could not find location for 'Paris'.")
    );
}

#[tokio::test]
async fn forecast_rejection_reads_as_weather_unavailable() {
    let server = MockServer::start().await;
    mount_search(&server, "Paris", paris_search()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    assert_eq!(
        toolbox.get_weather("Paris").await,
        ToolResult::error("Weather data not available for 'Paris'.")
    );
}

#[tokio::test]
async fn error_status_without_json_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let ToolResult::Error { message } = toolbox.get_weather("Paris").await else {
        panic!("expected error result");
    };

    assert!(message.contains("Open-Meteo geocoding request failed with status 502"), "{message}");
    assert!(message.ends_with("Bad Gateway"), "{message}");
}

#[tokio::test]
async fn time_resolves_without_coordinates() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Berlin",
        json!({ "results": [{ "name": "Berlin", "timezone": "Europe/Berlin" }] }),
    )
    .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let ToolResult::Success { report } = toolbox.get_current_time("Berlin").await else {
        panic!("expected success result");
    };
    assert!(report.starts_with("The current time in Berlin is "), "{report}");
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let ToolResult::Error { message } = toolbox.get_current_time("Paris").await else {
        panic!("expected error result");
    };

    assert!(message.starts_with("Failed to parse Open-Meteo geocoding JSON"), "{message}");
}

#[tokio::test]
async fn unreachable_service_is_reported() {
    let config = Config {
        geocoding_url: "http://127.0.0.1:1/v1/search".to_string(),
        forecast_url: "http://127.0.0.1:1/v1/forecast".to_string(),
        timeout_secs: Some(2),
    };

    let toolbox = Toolbox::from_config(&config).unwrap();
    let ToolResult::Error { message } = toolbox.get_weather("Paris").await else {
        panic!("expected error result");
    };

    assert!(message.starts_with("Failed to send request to Open-Meteo geocoding"), "{message}");
}

#[tokio::test]
async fn repeated_calls_are_structurally_identical() {
    let server = MockServer::start().await;
    mount_search(&server, "Paris", paris_search()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": { "temperature": -2.0, "windspeed": 23.4 }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let toolbox = Toolbox::from_config(&config_for(&server)).unwrap();
    let first = toolbox.get_weather("Paris").await;
    let second = toolbox.get_weather("Paris").await;

    assert_eq!(first, second);
    assert_eq!(
        first,
        ToolResult::success("The weather in Paris is -2.0°C with wind speed 23.4 km/h.")
    );
}
