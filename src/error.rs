use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourtsideError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("data parse error: {path}: {message}")]
    DataParse { path: String, message: String },

    #[error("unknown player: {0}")]
    UnknownPlayer(u32),

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("logging setup failed: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CourtsideError>;
