use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("failed to create log file: {0}")]
    LogFile(#[source] std::io::Error),

    #[error("failed to set global subscriber: {0}")]
    Init(#[source] tracing_subscriber::util::TryInitError),
}
