use std::fmt;

use thiserror::Error;

use crate::view::LOAD_FAILED;

/// Shown when a membership change is refused without a `detail`.
pub const GENERIC_REJECTION: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Signup,
    Unregister,
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Membership::Signup => f.write_str("sign-up"),
            Membership::Unregister => f.write_str("unregister"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("failed to load activities: {reason}")]
    LoadFailure { reason: String },

    #[error("{action} rejected with HTTP {status}")]
    Rejected {
        action: Membership,
        status: u16,
        detail: Option<String>,
    },

    #[error("{action} request did not complete: {reason}")]
    TransportFailure { action: Membership, reason: String },
}

impl BoardError {
    pub fn load(reason: impl ToString) -> Self {
        BoardError::LoadFailure { reason: reason.to_string() }
    }

    /// Text for the user, as opposed to the `Display` form which goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            BoardError::LoadFailure { .. } => LOAD_FAILED.to_string(),
            BoardError::Rejected { detail, .. } => detail
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(GENERIC_REJECTION)
                .to_string(),
            BoardError::TransportFailure { action: Membership::Signup, .. } => {
                "Failed to sign up. Please try again.".to_string()
            }
            BoardError::TransportFailure { action: Membership::Unregister, .. } => {
                "Failed to unregister. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_shows_detail_verbatim() {
        let err = BoardError::Rejected {
            action: Membership::Signup,
            status: 400,
            detail: Some("Already signed up".to_string()),
        };
        assert_eq!(err.user_message(), "Already signed up");
        assert_eq!(err.to_string(), "sign-up rejected with HTTP 400");
    }

    #[test]
    fn rejected_without_detail_is_generic() {
        let err = BoardError::Rejected { action: Membership::Unregister, status: 500, detail: None };
        assert_eq!(err.user_message(), "An error occurred");
    }

    #[test]
    fn transport_failure_is_fixed_text() {
        let err = BoardError::TransportFailure {
            action: Membership::Signup,
            reason: "TypeError: Failed to fetch".to_string(),
        };
        assert_eq!(err.user_message(), "Failed to sign up. Please try again.");
        assert!(err.to_string().contains("Failed to fetch"));
    }
}
