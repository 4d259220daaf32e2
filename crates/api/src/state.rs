use analyst::analyst::{Analyst, AnalystBuilder};
use analyst::config::Config;
use analyst::db::Database;
use analyst::llm::OpenAiModel;
use std::sync::Arc;
use tracing::warn;

/// Application state shared across all requests.
#[derive(Clone)]
pub struct AppState {
    pub analyst: Arc<Analyst>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db = Database::open(&config.db_path).await?;
        if config.auto_seed && !db.has_table("campaigns").await? {
            warn!("campaigns table is missing, seeding demo data");
            db.seed().await?;
        }

        let analyst = AnalystBuilder::default()
            .model(Arc::new(OpenAiModel::from_config(config)))
            .db(db)
            .build()?;

        Ok(Self::from_analyst(analyst))
    }

    pub fn from_analyst(analyst: Analyst) -> Self {
        Self {
            analyst: Arc::new(analyst),
        }
    }
}
