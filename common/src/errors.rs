// Error handling framework

use thiserror::Error;

/// Errors produced while talking to the backend API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", message.as_deref().unwrap_or("Unknown error."))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message suitable for the inline failure panel and toasts. Falls back
    /// to a generic message when the server supplied none.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Status { message: None, .. } => "Unknown error.".to_string(),
            other => other.to_string(),
        }
    }
}
