use thiserror::Error;

/// Failure loading an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors surfaced by the kernel's fallible entry points.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Control point no longer exists")]
    StaleControlPoint,

    #[error("Curve no longer exists")]
    StaleCurve,
}
