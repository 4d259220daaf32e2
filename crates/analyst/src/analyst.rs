use crate::{
    chart::BarChart,
    db::{Database, JsonRow},
    error::{AnalystError, Result},
    fallback::{backup_data, fallback_text},
    keywords::{GREETING, is_data_question},
    llm::LanguageModel,
    prompts,
    sql_extract::extract_select,
};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use ulid::Ulid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Question {
    pub message: String,
    /// Where the answer will be shown. `slack` asks for Slack markdown.
    #[serde(default)]
    pub platform: Option<String>,
}

impl Question {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            platform: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    /// The message was not a data question.
    Guard,
    /// Generated SQL ran and the model summarized the rows.
    Live,
    /// Something failed; canned text and the backup dataset.
    Fallback,
}

#[derive(Clone, Debug, Serialize)]
pub struct Answer {
    pub request_id: String,
    pub mode: AnswerMode,
    pub text: String,
    pub rows: Vec<JsonRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
}

impl Answer {
    pub fn chart(&self) -> Option<BarChart> {
        BarChart::from_rows(&self.rows)
    }
}

struct LiveAnswer {
    sql: String,
    rows: Vec<JsonRow>,
    summary: String,
}

/// Answers questions about the campaign database.
#[derive(Builder, Clone)]
#[builder(pattern = "owned", build_fn(error = "AnalystError"))]
pub struct Analyst {
    model: Arc<dyn LanguageModel>,
    db: Database,

    /// Row limit the model is asked to respect unless the question names one.
    #[builder(default = "5")]
    top_k: usize,

    /// Sample rows per table included in the schema context.
    #[builder(default = "3")]
    sample_rows: usize,
}

impl Analyst {
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Answers a question. Never fails: errors switch to backup mode.
    pub async fn answer(&self, question: &Question) -> Answer {
        let request_id = Ulid::new().to_string();
        let span = info_span!("answer", request_id = %request_id);

        async move {
            if !is_data_question(&question.message) {
                info!("not a data question");
                return Answer {
                    request_id,
                    mode: AnswerMode::Guard,
                    text: GREETING.to_string(),
                    rows: Vec::new(),
                    sql: None,
                };
            }

            match self.run(question).await {
                Ok(live) => Answer {
                    request_id,
                    mode: AnswerMode::Live,
                    text: live.summary,
                    rows: live.rows,
                    sql: Some(live.sql),
                },
                Err(error) => {
                    warn!(%error, "AI failed, switching to backup mode");
                    Answer {
                        request_id,
                        mode: AnswerMode::Fallback,
                        text: fallback_text(&question.message).to_string(),
                        rows: backup_data(),
                        sql: None,
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, question: &Question) -> Result<LiveAnswer> {
        let table_info = self.db.table_info(self.sample_rows).await?;
        let prompt = prompts::sql_prompt(&table_info, &question.message, self.top_k);
        let completion = self.model.complete(None, &prompt).await?;

        let sql = extract_select(&completion).ok_or(AnalystError::NoSqlFound)?;
        info!(%sql, "executing generated query");
        let rows = self.db.execute_query(&sql).await?;

        let rows_json = serde_json::to_string(&rows)?;
        let prompt =
            prompts::summary_prompt(&rows_json, &question.message, question.platform.as_deref());
        let summary = self
            .model
            .complete(Some(prompts::ANALYST_PERSONA), &prompt)
            .await?;

        Ok(LiveAnswer {
            sql,
            rows,
            summary: summary.trim().to_string(),
        })
    }
}
