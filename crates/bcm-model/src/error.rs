use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field id: {0:?}")]
    InvalidFieldId(String),
    #[error("invalid header id: {0:?}")]
    InvalidHeaderId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
