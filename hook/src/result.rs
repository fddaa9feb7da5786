//! Hook result types.

/// Outcome of one instance-method validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookResult {
    /// The instance passed the check.
    Valid,
    /// The instance failed the check.
    Invalid {
        /// Failure message, reported on the attributed fields.
        message: String,
        /// Optional payload tag carried into the violation report.
        payload: Option<String>,
    },
}

impl HookResult {
    /// Create a failed result.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            payload: None,
        }
    }

    /// Create a failed result carrying a payload tag.
    pub fn invalid_with_payload(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            payload: Some(payload.into()),
        }
    }

    /// Valid when the condition holds, otherwise invalid with the message.
    pub fn valid_if(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::Valid
        } else {
            Self::invalid(message())
        }
    }

    /// Invalid with the message when the condition holds.
    pub fn invalid_if(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::invalid(message())
        } else {
            Self::Valid
        }
    }

    /// Check if this is a passing result.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message, .. } => Some(message),
        }
    }

    /// The payload tag, if any.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { payload, .. } => payload.as_deref(),
        }
    }
}
