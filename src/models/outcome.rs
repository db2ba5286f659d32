use std::fmt;

/// Error codes surfaced to the core through the error channel.
///
/// Only `3` has a meaning defined by the bridge. Every other code belongs to a
/// collaborator and is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Host unavailable, or presentation construction/display failed
    PlatformFailure,
    /// Reserved for collaborator-specific failures
    Collaborator(i32),
}

impl ErrorCode {
    pub const PLATFORM_FAILURE: i32 = 3;

    pub fn code(self) -> i32 {
        match self {
            ErrorCode::PlatformFailure => Self::PLATFORM_FAILURE,
            ErrorCode::Collaborator(code) => code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::PLATFORM_FAILURE => ErrorCode::PlatformFailure,
            other => ErrorCode::Collaborator(other),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::PlatformFailure => write!(f, "platform failure ({})", Self::PLATFORM_FAILURE),
            ErrorCode::Collaborator(code) => write!(f, "collaborator error ({})", code),
        }
    }
}

/// Terminal result of a dialog request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A button was explicitly chosen
    Chosen { button_id: i64 },
    /// The dialog was dismissed without a choice
    Cancelled { button_id: i64 },
    Failed { error: ErrorCode },
}

impl Outcome {
    /// Rebuild an outcome from the completion channel's wire values
    pub fn from_completion(button_id: i64, cancelled: bool) -> Self {
        if cancelled {
            Outcome::Cancelled { button_id }
        } else {
            Outcome::Chosen { button_id }
        }
    }

    pub fn from_error(error_code: i32) -> Self {
        Outcome::Failed {
            error: ErrorCode::from_code(error_code),
        }
    }

    pub fn button_id(&self) -> Option<i64> {
        match self {
            Outcome::Chosen { button_id } | Outcome::Cancelled { button_id } => Some(*button_id),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Chosen { button_id } => write!(f, "chosen button {}", button_id),
            Outcome::Cancelled { button_id } => write!(f, "cancelled (button {})", button_id),
            Outcome::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_failure_code_is_three() {
        assert_eq!(ErrorCode::PlatformFailure.code(), 3);
        assert_eq!(ErrorCode::from_code(3), ErrorCode::PlatformFailure);
    }

    #[test]
    fn test_unassigned_codes_pass_through() {
        assert_eq!(ErrorCode::from_code(1), ErrorCode::Collaborator(1));
        assert_eq!(ErrorCode::from_code(2).code(), 2);
    }

    #[test]
    fn test_outcome_from_completion() {
        assert_eq!(
            Outcome::from_completion(10, false),
            Outcome::Chosen { button_id: 10 }
        );

        let cancelled = Outcome::from_completion(20, true);
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.button_id(), Some(20));
    }

    #[test]
    fn test_failed_has_no_button() {
        let failed = Outcome::from_error(3);
        assert!(failed.is_failed());
        assert_eq!(failed.button_id(), None);
        assert_eq!(failed.to_string(), "failed: platform failure (3)");
    }
}
