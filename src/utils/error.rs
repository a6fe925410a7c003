use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaError {
    #[error("Could not connect to the Wwise authoring API")]
    CannotConnectError,

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Call to {procedure} failed: {message}")]
    CallError { procedure: String, message: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },

    #[error("Object path has no parent segment: {path}")]
    InvalidPathError { path: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, WaError>;
