use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("logger not yet configured")]
    NotConfigured,

    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("unknown log target: {0}")]
    UnknownTarget(String),

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}
