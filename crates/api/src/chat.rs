use crate::error::{AppError, Result};
use crate::state::AppState;
use analyst::analyst::{AnswerMode, Question};
use analyst::chart::BarChart;
use analyst::db::JsonRow;
use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    platform: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    success: bool,
    request_id: String,
    mode: AnswerMode,
    response: String,
    /// Raw rows, used by the page to render the chart.
    chart_data: Vec<JsonRow>,
    chart: Option<BarChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<String>,
}

async fn post_chat_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let question = Question {
        message: payload.message,
        platform: payload.platform,
    };
    let answer = state.analyst.answer(&question).await;
    let chart = answer.chart();

    Ok(Json(ChatResponse {
        success: true,
        request_id: answer.request_id,
        mode: answer.mode,
        response: answer.text,
        chart_data: answer.rows,
        chart,
        sql: answer.sql,
    }))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/chat", post(post_chat_handler))
}
