/// Result alias that carries the custom [`DemoError`] type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Free-form failure reported by a subsystem that has no richer context.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// An asset was missing or could not be decoded.
    #[error("asset `{path}`: {reason}")]
    Asset { path: String, reason: String },
    /// A drawing, audio or window call failed inside the backend.
    #[error("backend: {0}")]
    Backend(String),
}

impl DemoError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn asset(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Asset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn backend<T: std::fmt::Display>(err: T) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<&str> for DemoError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for DemoError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
