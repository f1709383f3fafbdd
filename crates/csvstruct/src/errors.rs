use std::fmt::Display;
use thiserror::Error;

pub type EncodeResult<T> = Result<T, EncodeError>;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported record shape: {0} (expected a struct or a map)")]
    UnsupportedRecord(String),

    #[error("Unsupported type {type_name} for column '{column}'")]
    UnsupportedField { column: String, type_name: String },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl serde::ser::Error for EncodeError {
    fn custom<T: Display>(msg: T) -> Self {
        EncodeError::Serialize(msg.to_string())
    }
}
