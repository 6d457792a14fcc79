use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("country code must not be empty")]
    EmptyCountryCode,
}

pub type Result<T> = std::result::Result<T, ModelError>;
