use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalystError {
    #[error(transparent)]
    OpenAIError(#[from] async_openai::error::OpenAIError),
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),
    #[error(transparent)]
    EnvError(#[from] std::env::VarError),
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Could not extract valid SQL from the model response")]
    NoSqlFound,
    #[error("The model returned an empty completion")]
    EmptyCompletion,
    #[error("Only read-only statements may be executed: {0}")]
    NotReadOnly(String),

    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Analyst creation error: {0}")]
    Builder(String),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

impl From<derive_builder::UninitializedFieldError> for AnalystError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::Builder(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalystError>;
