use crate::error::{AnalystError, Result};
use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "ad_metrics.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:3001";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Settings shared by the API server and the CLI, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    /// Seed the database on startup when the `campaigns` table is missing.
    pub auto_seed: bool,
    pub llm_api_key: Option<String>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub sentry_dsn: Option<String>,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Reads settings through `lookup`. Unset or blank variables take their
    /// default; a variable that is not valid unicode is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let get = |key: &str| -> Result<Option<String>> {
            match lookup(key) {
                Ok(v) if !v.trim().is_empty() => Ok(Some(v)),
                Ok(_) | Err(VarError::NotPresent) => Ok(None),
                Err(e) => Err(e.into()),
            }
        };

        let bind = get("AD_AGENT_BIND")?.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .parse()
            .map_err(|_| AnalystError::Config(format!("AD_AGENT_BIND is not an address: {bind}")))?;

        let auto_seed = match get("AD_AGENT_AUTO_SEED")? {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AnalystError::Config(format!("AD_AGENT_AUTO_SEED is not a boolean: {v}"))
            })?,
        };

        let llm_api_key = match get("LLM_API_KEY")? {
            Some(key) => Some(key),
            None => match get("OPENAI_API_KEY")? {
                Some(key) => Some(key),
                None => get("GOOGLE_API_KEY")?,
            },
        };

        Ok(Self {
            db_path: get("AD_AGENT_DB_PATH")?
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
                .into(),
            bind,
            auto_seed,
            llm_api_key,
            llm_api_base: get("LLM_API_BASE")?.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            llm_model: get("LLM_MODEL")?.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            sentry_dsn: get("SENTRY_DSN")?,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
