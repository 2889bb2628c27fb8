//! Error Types

use thiserror::Error;

/// Result type alias for paywall operations
pub type Result<T> = std::result::Result<T, PaywallError>;

/// Paywall error types
#[derive(Error, Debug)]
pub enum PaywallError {
    /// Network or transport failure before any response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// Verification API answered with a non-success status
    #[error("Request rejected with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },

    /// A success response lacked a field the flow depends on
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client-side token storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Page (location/history/DOM) operation failed
    #[error("Page error: {0}")]
    Page(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User-supplied email failed basic validation
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// State machine received a transition that is not valid in its state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl PaywallError {
    /// True when the backend explicitly refused the credential
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the payment service. Please try again.".into(),
            Self::Rejected { message: Some(msg), .. } => msg.clone(),
            Self::Rejected { .. } | Self::MissingField(_) | Self::Decode(_) => {
                "Could not start checkout. Please try again.".into()
            }
            Self::InvalidEmail(_) => "Please enter a valid email address.".into(),
            Self::Config(_) => "Payments are not configured correctly.".into(),
            _ => "Something went wrong. Please try again.".into(),
        }
    }
}

impl From<serde_json::Error> for PaywallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for PaywallError {
    fn from(err: url::ParseError) -> Self {
        Self::Page(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_prefers_backend_text() {
        let err = PaywallError::Rejected {
            status: 402,
            message: Some("Payment not completed".into()),
        };
        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "Payment not completed");
        assert_eq!(
            err.to_string(),
            "Request rejected with status 402: Payment not completed"
        );
    }

    #[test]
    fn test_transport_is_not_rejection() {
        let err = PaywallError::Transport("connection reset".into());
        assert!(!err.is_rejection());
        assert_eq!(
            PaywallError::Rejected { status: 500, message: None }.to_string(),
            "Request rejected with status 500"
        );
    }
}
