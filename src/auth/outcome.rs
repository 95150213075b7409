//! Result of one verification attempt.

/// Exactly one of these is produced per submitted login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Id of the matching user record
    Matched(i64),
    /// Unknown code and wrong password are deliberately indistinguishable
    NotMatched,
    ConnectionFailed(String),
    SchemaError(String),
    UnexpectedError(String),
}

impl VerificationOutcome {
    /// Stable name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Matched(_) => "matched",
            Self::NotMatched => "not_matched",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::SchemaError(_) => "schema_error",
            Self::UnexpectedError(_) => "unexpected_error",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ConnectionFailed(detail)
            | Self::SchemaError(detail)
            | Self::UnexpectedError(detail) => Some(detail),
            Self::Matched(_) | Self::NotMatched => None,
        }
    }
}
