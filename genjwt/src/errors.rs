use genjwt_lib::errors::GenJwtError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenJwtCliError>;

#[derive(Debug, Error)]
pub enum GenJwtCliError {
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error("Invalid configuration : {0}")]
    ConfigurationError(#[from] figment::Error),
    #[error(transparent)]
    GenJwtLibError(#[from] GenJwtError),
}
