//! Integration tests for the endpoint fallback resolver.

use reqwest::Method;
use serde_json::{json, Value};
use stockfolio_connect::{fallback, ApiClient, ApiError, AuthScheme};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), AuthScheme::Token).unwrap()
}

#[tokio::test]
async fn resolver_returns_first_successful_candidate_and_records_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/stocks/portfolios/9/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/stocks/portfolios/delete_by_name/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/stocks/portfolios/by_name/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    // A later candidate must never be reached once one succeeds.
    Mock::given(method("DELETE"))
        .and(path("/api/stocks/portfolios/remove/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "wrong"})))
        .expect(0)
        .mount(&server)
        .await;

    let candidates = vec![
        "/api/stocks/portfolios/9/".to_string(),
        "/api/stocks/portfolios/delete_by_name/".to_string(),
        "/api/stocks/portfolios/by_name/".to_string(),
        "/api/stocks/portfolios/remove/".to_string(),
    ];
    let client = test_client(&server);
    let outcome: fallback::FallbackOutcome<Value> =
        fallback::resolve(&client, Method::DELETE, &candidates, None)
            .await
            .unwrap();

    assert_eq!(outcome.value["message"], "deleted");
    assert_eq!(outcome.attempted, &candidates[..3]);
}

#[tokio::test]
async fn resolver_aborts_on_non_404_without_trying_later_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "backend on fire"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let candidates = vec![
        "/first/".to_string(),
        "/second/".to_string(),
        "/third/".to_string(),
    ];
    let client = test_client(&server);
    let err = fallback::resolve::<Value>(&client, Method::GET, &candidates, None)
        .await
        .unwrap_err();

    match &err {
        ApiError::Attempted { attempted, source } => {
            assert_eq!(attempted, &candidates[..2]);
            assert!(matches!(**source, ApiError::Http(ref f) if f.status == 500));
        }
        other => panic!("expected Attempted, got {:?}", other),
    }
    // The original failure message survives the annotation.
    assert!(err.to_string().contains("backend on fire"));
    assert!(err.to_string().contains("/second/"));
}

#[tokio::test]
async fn resolver_reports_exhaustion_when_every_candidate_404s() {
    let server = MockServer::start().await;
    for route in ["/a/", "/b/", "/c/"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
    }

    let candidates = vec!["/a/".to_string(), "/b/".to_string(), "/c/".to_string()];
    let client = test_client(&server);
    let err = fallback::resolve::<Value>(&client, Method::GET, &candidates, None)
        .await
        .unwrap_err();

    match &err {
        ApiError::AllCandidatesExhausted { attempted, source } => {
            assert_eq!(attempted, &candidates);
            assert!(source.is_not_found());
        }
        other => panic!("expected AllCandidatesExhausted, got {:?}", other),
    }
    assert_eq!(err.attempted_paths(), Some(candidates.as_slice()));
}

#[tokio::test]
async fn resolver_rejects_empty_candidate_list() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let err = fallback::resolve::<Value>(&client, Method::GET, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unexpected(_)));
}

#[tokio::test]
async fn resolver_passes_request_body_to_each_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/old/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/new/"))
        .and(wiremock::matchers::body_json(json!({"name": "Growth"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = vec!["/old/".to_string(), "/new/".to_string()];
    let client = test_client(&server);
    let body = json!({"name": "Growth"});
    let value: Value =
        fallback::request_with_fallback(&client, Method::POST, &candidates, Some(&body))
            .await
            .unwrap();
    assert_eq!(value["id"], 1);
}
