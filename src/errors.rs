use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShimmerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
