//! HttpTransport against a live mock server, normalized through RequestService.

use std::time::Duration;

use beacon_request::{
    ErrorResponse, HttpTransport, HttpTransportConfig, PollingConfig, RequestDescriptor,
    RequestError, RequestService, Transport,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> RequestService<HttpTransport> {
    let transport = HttpTransport::new(
        HttpTransportConfig::new(server.uri()).with_header("kbn-xsrf", "beacon"),
    )
    .expect("valid transport config");
    RequestService::new(transport)
}

#[tokio::test]
async fn json_payload_becomes_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/index_management/indices"))
        .and(header("kbn-xsrf", "beacon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "logs"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = service_for(&server)
        .send(&RequestDescriptor::get("/api/index_management/indices"))
        .await;

    assert_eq!(result.data, Some(json!([{"name": "logs"}])));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn body_is_sent_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/watcher/watch/_execute"))
        .and(body_json(json!({"watch": {"id": "w1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"executed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = service_for(&server)
        .send(
            &RequestDescriptor::post("/api/watcher/watch/_execute")
                .with_body(json!({"watch": {"id": "w1"}})),
        )
        .await;

    assert_eq!(result.data, Some(json!({"executed": true})));
}

#[tokio::test]
async fn empty_success_body_is_missing_payload() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/pipelines/p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = service_for(&server)
        .send(&RequestDescriptor::new(beacon_request::Method::DELETE, "/api/pipelines/p1"))
        .await;

    assert_eq!(
        result.error,
        Some(RequestError::MissingPayload {
            status_text: "No Content".to_string()
        })
    );
}

#[tokio::test]
async fn error_status_surfaces_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Saved object not found"})),
        )
        .mount(&server)
        .await;

    let result = service_for(&server)
        .send(&RequestDescriptor::get("/api/missing"))
        .await;

    assert_eq!(
        result.error,
        Some(RequestError::Response(
            ErrorResponse::new(404)
                .with_status_text("Not Found")
                .with_body(json!({"message": "Saved object not found"}))
        ))
    );
}

#[tokio::test]
async fn timeout_fails_without_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(
        HttpTransportConfig::new(server.uri()).with_timeout(Duration::from_millis(100)),
    )
    .unwrap();
    let err = transport
        .dispatch(&beacon_request::Method::GET, "/api/slow", None)
        .await
        .unwrap_err();

    assert_eq!(err.response, None);
    assert!(err.message.contains("timed out"), "{}", err.message);
}

#[tokio::test]
async fn poller_settles_against_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "green"})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let poller = service.use_request(PollingConfig::new(RequestDescriptor::get("/api/status")));

    let state = poller
        .subscribe()
        .wait_for(|s| !s.is_initial_request)
        .await
        .unwrap()
        .clone();

    assert_eq!(state.data, Some(json!({"status": "green"})));
    assert!(!state.loading);
}
