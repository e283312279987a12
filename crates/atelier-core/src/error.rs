//! Error types
//!
//! `ApiError` classifies every failure a store can see. Stores capture a
//! display message from it and hand the error back to the caller.

use thiserror::Error;

/// Route the shared error handler redirects to on authentication failure
pub const LOGIN_ROUTE: &str = "/login";

/// Remote API failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request could not be sent or no response arrived
    #[error("Network error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// Resource not found
    #[error("Not found: {}", .0.as_deref().unwrap_or("resource"))]
    NotFound(Option<String>),

    /// Authentication required or expired
    #[error("Authentication required")]
    Unauthorized(Option<String>),

    /// Success status but the body did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Message reported by the server, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            ApiError::Server { message, .. } => message.as_deref(),
            ApiError::NotFound(message) | ApiError::Unauthorized(message) => message.as_deref(),
            ApiError::Transport(_) | ApiError::InvalidResponse(_) => None,
        };
        message.map(str::trim).filter(|m| !m.is_empty())
    }

    /// Text to show the user: the server's message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Shared error routine for operations that accept a navigation callback.
///
/// Only authentication failures navigate; everything else is left to the
/// store's own notification.
pub fn handle_api_error(error: &ApiError, navigate: Option<&dyn Fn(&str)>) {
    if !error.is_unauthorized() {
        return;
    }
    match navigate {
        Some(navigate) => {
            tracing::info!("Session rejected, redirecting to {}", LOGIN_ROUTE);
            navigate(LOGIN_ROUTE);
        }
        None => tracing::warn!("Session rejected but no navigation callback was supplied"),
    }
}

/// Local persistence failure; logged, never shown to the user
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed: {0}")]
    Write(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: 422,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message("Failed to add client"), "Email already registered");
    }

    #[test]
    fn test_user_message_falls_back() {
        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message("Failed to load"), "Failed to load");

        let blank = ApiError::NotFound(Some("   ".to_string()));
        assert_eq!(blank.user_message("Measurement not found"), "Measurement not found");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Server { status: 500, message: None };
        assert_eq!(err.to_string(), "Server error (500): no details");
        assert_eq!(ApiError::NotFound(None).to_string(), "Not found: resource");
    }

    #[test]
    fn test_handler_navigates_only_on_unauthorized() {
        let visited = RefCell::new(Vec::<String>::new());
        let navigate = |route: &str| visited.borrow_mut().push(route.to_string());

        handle_api_error(&ApiError::Transport("down".to_string()), Some(&navigate));
        assert!(visited.borrow().is_empty());

        handle_api_error(&ApiError::Unauthorized(None), Some(&navigate));
        assert_eq!(visited.borrow().as_slice(), &["/login".to_string()]);
    }
}
