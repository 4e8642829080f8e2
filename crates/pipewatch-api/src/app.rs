use std::sync::Arc;

use axum::Router;

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cfg = Arc::clone(&state.cfg);
    let router = Router::new()
        .merge(routes::router())
        .with_state(state);

    middleware::wrap(router, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;

    fn test_app() -> Router {
        build_router(AppState::new(AppConfig::default(), None))
    }

    async fn request(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
        request(router, Method::GET, uri, None).await
    }

    async fn wait_for_results(router: &Router, id: &str, count: usize) -> Value {
        for _ in 0..500 {
            let (status, body) = get(router, &format!("/api/pipelines/{id}/results")).await;
            assert_eq!(status, StatusCode::OK);
            if body.as_array().map(Vec::len).unwrap_or(0) >= count {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {count} results on {id}");
    }

    fn draft(id: &str, name: &str) -> Value {
        json!({"id": id, "name": name, "type": "cicd", "url": "https://ci.example.com"})
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = test_app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "pipewatch-api");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn index_reports_environment() {
        let app = test_app();
        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["environment"], "development");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn store_starts_with_seed_pipelines() {
        let app = test_app();
        let (status, body) = get(&app, "/api/pipelines").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> =
            body.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let app = test_app();
        let (status, body) =
            request(&app, Method::POST, "/api/pipelines", Some(draft("p9", "Nightly Build"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "p9");
        assert_eq!(body["status"], "active");

        let (status, body) = get(&app, "/api/pipelines/p9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Nightly Build");
    }

    #[tokio::test]
    async fn duplicate_create_gets_envelope_400() {
        let app = test_app();
        let (status, body) =
            request(&app, Method::POST, "/api/pipelines", Some(draft("p1", "Duplicate"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Pipeline already exists");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let app = test_app();
        let (status, body) =
            request(&app, Method::POST, "/api/pipelines", Some(draft("p9", "ab"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn unknown_pipeline_is_404_with_envelope() {
        let app = test_app();
        let (status, body) = get(&app, "/api/pipelines/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Pipeline not found");
    }

    #[tokio::test]
    async fn update_keeps_the_path_id() {
        let app = test_app();
        let (status, body) = request(
            &app,
            Method::PUT,
            "/api/pipelines/p1",
            Some(draft("some-other-id", "Renamed Pipeline")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Pipeline updated successfully");

        let (_, body) = get(&app, "/api/pipelines/p1").await;
        assert_eq!(body["id"], "p1");
        assert_eq!(body["name"], "Renamed Pipeline");

        let (status, _) = get(&app, "/api/pipelines/some-other-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_unknown_is_404() {
        let app = test_app();
        let (status, _) =
            request(&app, Method::PUT, "/api/pipelines/nope", Some(draft("nope", "Name Here"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_cascades_to_results() {
        let app = test_app();
        let (status, body) = request(&app, Method::DELETE, "/api/pipelines/p2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Pipeline deleted successfully");

        let (status, _) = get(&app, "/api/pipelines/p2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(&app, "/api/pipelines/p2/results").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Pipeline not found");
    }

    #[tokio::test]
    async fn validate_returns_running_placeholder_then_appends_result() {
        let app = test_app();
        let (status, body) = request(&app, Method::POST, "/api/pipelines/p1/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["score"], 0.0);
        assert_eq!(body["checks"], json!([]));

        let results = wait_for_results(&app, "p1", 1).await;
        let result = &results.as_array().unwrap()[0];
        assert_eq!(result["score"], 93.0);
        assert_eq!(result["status"], "passed");
        assert_eq!(result["checks"].as_array().unwrap().len(), 4);

        // The placeholder itself was never stored.
        let placeholder_id = body["id"].as_str().unwrap();
        let (status, _) = get(&app, &format!("/api/results/{placeholder_id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, pipeline) = get(&app, "/api/pipelines/p1").await;
        assert!(pipeline["last_check"].is_string());
    }

    #[tokio::test]
    async fn validate_unknown_is_404() {
        let app = test_app();
        let (status, _) = request(&app, Method::POST, "/api/pipelines/nope/validate", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn results_limit_returns_most_recent() {
        let app = test_app();
        request(&app, Method::POST, "/api/pipelines/p1/validate", None).await;
        request(&app, Method::POST, "/api/pipelines/p1/validate", None).await;
        let all = wait_for_results(&app, "p1", 2).await;
        let newest_id = all.as_array().unwrap().last().unwrap()["id"].clone();

        let (status, body) = get(&app, "/api/pipelines/p1/results?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        let limited = body.as_array().unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0]["id"], newest_id);
    }

    #[tokio::test]
    async fn result_lookup_by_generated_id() {
        let app = test_app();
        request(&app, Method::POST, "/api/pipelines/p1/validate", None).await;
        let results = wait_for_results(&app, "p1", 1).await;
        let id = results.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

        let (status, body) = get(&app, &format!("/api/results/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["pipeline_id"], "p1");

        let (status, _) =
            get(&app, "/api/results/00000000-0000-4000-8000-000000000000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(&app, "/api/results/not-a-uuid").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Result not found");
    }

    #[tokio::test]
    async fn payments_without_gateway_are_500() {
        let app = test_app();
        let payment = json!({
            "plan": "basic",
            "email": "ana@example.com",
            "name": "Ana Souza",
            "document": "12345678901"
        });
        let (status, body) =
            request(&app, Method::POST, "/api/payments/create", Some(payment)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Payment service unavailable");
    }

    #[tokio::test]
    async fn webhook_swallows_malformed_payloads() {
        let app = test_app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/webhook/mp")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn webhook_acknowledges_valid_payloads() {
        let app = test_app();
        let (status, body) = request(
            &app,
            Method::POST,
            "/api/webhook/mp",
            Some(json!({"data": {"id": "12345"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "received");
    }

    #[tokio::test]
    async fn ipn_always_acknowledges() {
        let app = test_app();
        let (status, body) = get(&app, "/api/webhook/mp/ipn?topic=payment&id=123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "received");
    }
}
