use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarcalcError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Engine responded with status {status}: {body}")]
    EngineStatus { status: u16, body: String },

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type WcResult<T> = Result<T, WarcalcError>;
