use crate::error::Result as AppResult;
use crate::state::AppState;
use crate::{chat, vision};
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn health(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.analyst.db().ping().await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    ))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub fn create_api(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE])
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .route("/", get(index))
        .route("/__health", get(health))
        .merge(chat::chat_routes())
        .merge(vision::vision_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst::analyst::AnalystBuilder;
    use analyst::db::Database;
    use analyst::error::{AnalystError, Result};
    use analyst::llm::LanguageModel;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Replies with the queued completions, then fails.
    struct CannedModel(Mutex<VecDeque<&'static str>>);

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn complete(&self, _system: Option<&str>, _prompt: &str) -> Result<String> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .map(str::to_string)
                .ok_or(AnalystError::EmptyCompletion)
        }
    }

    async fn app(replies: &[&'static str]) -> Router {
        let db = Database::open_in_memory().unwrap();
        db.seed().await.unwrap();
        let model = CannedModel(Mutex::new(replies.iter().copied().collect()));
        let analyst = AnalystBuilder::default()
            .model(Arc::new(model))
            .db(db)
            .build()
            .unwrap();
        create_api(AppState::from_analyst(analyst))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = response.into_body().collect().await.expect("body").to_bytes();
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(&[])
            .await
            .oneshot(
                Request::builder()
                    .uri("/__health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.expect("body").to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = app(&[])
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.expect("body").to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("/api/chat"));
    }

    #[tokio::test]
    async fn test_chat_small_talk() {
        let (status, body) = post_json(app(&[]).await, "/api/chat", json!({"message": "hello"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "guard");
        assert_eq!(body["chartData"], json!([]));
        assert_eq!(body["chart"], Value::Null);
        assert!(body["response"].as_str().unwrap().starts_with("I'm a Data Analyst Agent."));
    }

    #[tokio::test]
    async fn test_chat_live() {
        let app = app(&[
            r#"SQLQuery: SELECT "name" AS "campaign", "roas" FROM campaigns WHERE "platform" = 'TikTok' ORDER BY "roas" DESC;"#,
            "Black_Friday returns 2.8 ROAS while Winter_Promo is a risk at 1.1.",
        ])
        .await;
        let (status, body) =
            post_json(app, "/api/chat", json!({"message": "TikTok ROAS?", "platform": "web"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["mode"], "live");
        assert_eq!(
            body["chartData"],
            json!([
                {"campaign": "Black_Friday", "roas": 2.8},
                {"campaign": "Winter_Promo", "roas": 1.1},
            ])
        );
        assert_eq!(body["chart"]["labelKey"], "campaign");
        assert_eq!(body["chart"]["bars"][0]["label"], "Black_Friday");
        assert!(body["sql"].as_str().unwrap().starts_with("SELECT"));
        assert_eq!(body["requestId"].as_str().unwrap().len(), 26);
    }

    #[tokio::test]
    async fn test_chat_fallback() {
        let (status, body) =
            post_json(app(&[]).await, "/api/chat", json!({"message": "Analyze Spend"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "fallback");
        assert_eq!(
            body["response"],
            "Total Spend is approx $4,200. TikTok is the highest spend channel."
        );
        assert_eq!(body["chartData"].as_array().unwrap().len(), 3);
        assert!(body.get("sql").is_none());
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let (status, body) = post_json(app(&[]).await, "/api/chat", json!({"message": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "message must not be empty");
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body() {
        let (status, body) =
            post_json(app(&[]).await, "/api/chat", json!({"platform": "slack"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("message"));

        let response = app(&[])
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.expect("body").to_bytes();
        let body: Value = serde_json::from_slice(&body).expect("json body");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = app(&[])
            .await
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .header("Origin", "http://localhost:3000")
                    .header("Access-Control-Request-Method", "POST")
                    .header("Access-Control-Request-Headers", "content-type")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("GET") && methods.contains("POST"));
        let allowed = headers["access-control-allow-headers"].to_str().unwrap();
        assert!(allowed.to_ascii_lowercase().contains("content-type"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_image() {
        let (status, body) = post_json(app(&[]).await, "/api/analyze-image", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], vision::ANALYSIS_TEXT);
        assert_eq!(body["chartData"], json!([]));
    }
}
