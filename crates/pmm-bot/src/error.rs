//! Application error types.

use thiserror::Error;

use crate::connector::ConnectorError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] pmm_core::CoreError),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),
}

pub type AppResult<T> = Result<T, AppError>;
