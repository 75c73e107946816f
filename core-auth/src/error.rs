use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Refresh exhausted: {reason}")]
    RefreshExhausted { reason: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed payload: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
