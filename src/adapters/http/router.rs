//! Router assembly.

use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::account::account_router;
use super::cron::cron_router;
use super::cycle::cycle_router;
use super::daily_log::daily_log_router;
use super::notifications::notifications_router;
use super::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// All routes, without middleware.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(cycle_router())
        .merge(daily_log_router())
        .merge(notifications_router())
        .merge(account_router())
        .merge(cron_router())
        .with_state(state)
}

/// The served router: routes plus tracing, request ids, timeout and CORS.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    api_router(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::Stores;
    use crate::adapters::FixedClock;
    use crate::config::{AppConfig, Environment};
    use crate::domain::foundation::Timestamp;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_at(today: NaiveDate, environment: Environment) -> Router {
        let mut config = AppConfig::default();
        config.server.environment = environment;
        let state = AppState::new(Stores::in_memory(), &config)
            .with_clock(Arc::new(FixedClock::new(Timestamp::start_of_day(today))));
        api_router(state)
    }

    fn app() -> Router {
        app_at(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Environment::Development,
        )
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-id", "user-1")
            .header("content-type", "application/json");
        match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn health_is_open() {
        let (status, body) = send(
            &app(),
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn api_requires_user_header() {
        let (status, body) = send(
            &app(),
            Request::builder().uri("/api/cycles").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn period_start_returns_effects_then_is_idempotent() {
        let app = app();
        let body = json!({ "date": "2024-01-05T14:30:00Z" });

        let (status, first) = send(&app, request("POST", "/api/cycles/period-start", Some(body.clone()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["status"], "created");
        assert_eq!(first["cycle"]["start_date"], "2024-01-05");
        let effect_types: Vec<_> = first["effects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(effect_types, vec!["toast.show", "badge.unlocked", "toast.show"]);

        let (status, second) = send(&app, request("POST", "/api/cycles/period-start", Some(body))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["status"], "already_logged");
        assert_eq!(second["effects"], json!([]));

        let (_, overview) = send(&app, request("GET", "/api/cycles", None)).await;
        assert_eq!(overview["cycles"].as_array().unwrap().len(), 1);
        assert_eq!(overview["prediction"]["next_period_start"], "2024-02-02");
    }

    #[tokio::test]
    async fn malformed_date_is_400() {
        let (status, body) = send(
            &app(),
            request("POST", "/api/cycles/period-start", Some(json!({ "date": "yesterday" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn far_future_date_is_400() {
        let app = app();
        let (status, body) = send(
            &app,
            request("POST", "/api/cycles/period-start", Some(json!({ "date": "+262142-12-20" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (status, overview) = send(&app, request("GET", "/api/cycles", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(overview["cycles"], json!([]));
    }

    #[tokio::test]
    async fn unknown_cycle_type_target_is_404() {
        let uri = format!("/api/cycles/{}/type", crate::domain::foundation::CycleId::new());
        let (status, _) = send(&app(), request("PUT", &uri, Some(json!({ "type": "irregular" })))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn period_end_round_trip() {
        let app = app();
        let (_, created) = send(
            &app,
            request("POST", "/api/cycles/period-start", Some(json!({ "date": "2024-01-05" }))),
        )
        .await;
        let uri = format!("/api/cycles/{}/period-end", created["cycle"]["id"].as_str().unwrap());

        let (status, body) = send(&app, request("PUT", &uri, Some(json!({ "end_date": "2024-01-09" })))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cycle"]["end_date"], "2024-01-09");
        assert_eq!(body["avg_period_length"], 5);

        let (status, _) = send(&app, request("PUT", &uri, Some(json!({ "end_date": "2024-01-01" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn daily_events_merge_and_list() {
        let app = app();

        let (status, body) = send(
            &app,
            request("PATCH", "/api/daily-events/2024-01-03", Some(json!({ "flags": { "cramps": true, "headache": true } }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effects"][0]["type"], "badge.unlocked");

        send(
            &app,
            request("PATCH", "/api/daily-events/2024-01-03", Some(json!({ "flags": { "headache": false } }))),
        )
        .await;

        let (status, list) = send(
            &app,
            request("GET", "/api/daily-events?from=2024-01-01&to=2024-01-31", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["events"][0]["flags"], json!(["cramps"]));
    }

    #[tokio::test]
    async fn bad_symptom_tag_is_400() {
        let (status, _) = send(
            &app(),
            request("PATCH", "/api/daily-events/2024-01-03", Some(json!({ "flags": { "Bad Tag": true } }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn engagement_unlocks_badge() {
        let (status, body) = send(
            &app(),
            request("POST", "/api/engagement", Some(json!({ "type": "app_shared" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effects"][0]["payload"]["badgeKey"], "ambassador");
    }

    #[tokio::test]
    async fn cron_requires_trigger_header_in_production() {
        let app = app_at(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Environment::Production,
        );

        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/api/cron/late-cycle-check")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));

        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/api/cron/late-cycle-check")
                .header("x-cron-trigger", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("0 users scanned"));
    }

    #[tokio::test]
    async fn late_cycle_notice_lands_in_inbox() {
        let app = app_at(
            NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            Environment::Development,
        );
        send(
            &app,
            request("POST", "/api/cycles/period-start", Some(json!({ "date": "2024-01-01" }))),
        )
        .await;

        let (status, _) = send(&app, request("GET", "/api/cron/late-cycle-check", None)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, inbox) = send(&app, request("GET", "/api/notifications", None)).await;
        let notifications = inbox["notifications"].as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["type"], "cycle_late");

        let uri = format!(
            "/api/notifications/{}/read",
            notifications[0]["id"].as_str().unwrap()
        );
        let (status, _) = send(&app, request("POST", &uri, None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, request("DELETE", "/api/account/data", None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, inbox) = send(&app, request("GET", "/api/notifications", None)).await;
        assert_eq!(inbox["notifications"], json!([]));
    }
}
