//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Registration error: {0}")]
    Registration(String),

    #[error("Reply delivery failed: {0}")]
    Reply(String),

    #[error("Invalid id for {field}: {value:?}")]
    InvalidId { field: &'static str, value: String },
}

/// How a transport-level failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Other,
}

impl TransportKind {
    pub fn code(&self) -> &'static str {
        match self {
            TransportKind::Timeout => "ETIMEDOUT",
            TransportKind::Connect => "ECONNREFUSED",
            TransportKind::Other => "EREQUEST",
        }
    }
}

/// Errors that end a single invocation in the failure state
#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("Missing required option: {0}")]
    MissingParameter(String),

    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("{message}")]
    Transport {
        kind: TransportKind,
        message: String,
        causes: Vec<String>,
    },

    #[error("Interaction expired before the backend responded")]
    Expired,
}

impl RelayError {
    /// Short machine-readable code for log entries
    pub fn code(&self) -> Option<&'static str> {
        match self {
            RelayError::MissingParameter(_) => Some("EPARAM"),
            RelayError::Status { .. } => Some("ERR_BAD_RESPONSE"),
            RelayError::Transport { kind, .. } => Some(kind.code()),
            RelayError::Expired => Some("EEXPIRED"),
        }
    }

    /// Cause chain, outermost first
    pub fn stack(&self) -> String {
        let mut lines = vec![format!("RelayError: {}", self)];
        if let RelayError::Transport { causes, .. } = self {
            lines.extend(causes.iter().map(|c| format!("    caused by: {}", c)));
        }
        lines.join("\n")
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
