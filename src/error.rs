use derive_more::Display;

/// Typed, recoverable failures surfaced by the engine.
///
/// None of these are fatal; callers map them onto their own transport
/// (HTTP status codes, CLI exit codes) as they see fit.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An open session already exists for the employee.
    #[display(fmt = "conflict: {}", _0)]
    Conflict(String),

    /// No open session, or no record for the queried date.
    #[display(fmt = "not found: {}", _0)]
    NotFound(String),

    /// Malformed location, malformed date, or a location policy violation.
    #[display(fmt = "validation failed: {}", _0)]
    Validation(String),
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = EngineError::conflict("employee 7 already checked in");
        assert_eq!(err.to_string(), "conflict: employee 7 already checked in");

        let err = EngineError::validation("date must be YYYY-MM-DD");
        assert!(err.to_string().starts_with("validation failed:"));
    }
}
