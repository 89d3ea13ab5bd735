use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f64),

    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
