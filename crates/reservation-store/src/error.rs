use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read storage: {message}")]
    ReadError { message: String },

    #[error("Failed to write storage: {message}")]
    WriteError { message: String },

    #[error("Stored reservations are corrupt: {message}")]
    Corrupt { message: String },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}
