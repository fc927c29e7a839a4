use thiserror::Error;

use indexboard_core::{DashboardError, ProviderError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] indexboard_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Provider(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

impl From<DashboardError> for CliError {
    fn from(error: DashboardError) -> Self {
        match error {
            DashboardError::Catalog(validation) => Self::Validation(validation),
            DashboardError::History(provider) => Self::Provider(provider),
        }
    }
}
