use cep_weather::{app, ApiKey, ServiceConfig};
use httpmock::prelude::*;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_end_to_end_over_real_sockets() {
    // Upstreams
    let server = MockServer::start();
    let location_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"localidade": "São Paulo"}));
    });
    let weather_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/current.json")
            .query_param("key", "e2e-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"current": {"temp_c": 25.5}}));
    });

    let config = ServiceConfig {
        location_url_template: format!("{}/ws/{{cep}}/json/", server.base_url()),
        weather_url_template: format!(
            "{}/v1/current.json?key={{key}}&q={{city}}",
            server.base_url()
        ),
        weather_api_key: ApiKey::new("e2e-key"),
        bind_address: "127.0.0.1:0".to_string(),
        ..ServiceConfig::default()
    };

    // Service under test
    let listener = TcpListener::bind(config.socket_addr().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(app::serve_on(
        listener,
        config.build_engine().unwrap(),
        shutdown.clone(),
    ));

    let client = reqwest::Client::new();

    let ok = client
        .get(format!("http://{}/weather?cep=01310100", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status().as_u16(), 200);
    let body: serde_json::Value = ok.json().await.unwrap();
    assert_eq!(body["temp_C"], 25.5);
    assert_eq!(body["temp_K"], 298.5);

    let invalid = client
        .get(format!("http://{}/weather?cep=123", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status().as_u16(), 422);
    let body: serde_json::Value = invalid.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"message": "invalid zipcode"}));

    location_mock.assert();
    weather_mock.assert();

    // Shutdown
    drop(client);
    shutdown.cancel();
    let served = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after cancellation")
        .unwrap();
    assert!(served.is_ok());
}
