//! Placeholder creative analysis. No image is inspected; the reply is canned.

use crate::state::AppState;
use axum::{Json, Router, routing::post};
use serde_json::{Value, json};
use std::time::Duration;

pub const ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

pub const ANALYSIS_TEXT: &str = "✅ Analysis Complete.\n\nI've scanned this creative. \n- **Visual Tags detected:** 'Human Face', 'Smiling', 'Outdoors'.\n- **Predicted Performance:** High.";

async fn post_analyze_image_handler() -> Json<Value> {
    tokio::time::sleep(ANALYSIS_DELAY).await;
    Json(json!({
        "success": true,
        "response": ANALYSIS_TEXT,
        "chartData": [],
    }))
}

pub fn vision_routes() -> Router<AppState> {
    Router::new().route("/api/analyze-image", post(post_analyze_image_handler))
}
