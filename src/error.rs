//! Error types for the grant metrics engine.
//!
//! The calculators are pure computation, so the taxonomy is narrow: invalid
//! grant data, unknown entities referenced by a mutation, and configuration
//! loading failures. Degenerate-but-valid inputs (zero milestones, zero
//! requirements, zero-target KPIs) are never errors.

use thiserror::Error;

/// The main error type for the grant metrics engine.
///
/// # Example
///
/// ```
/// use grant_metrics::error::EngineError;
///
/// let error = EngineError::InvalidGrant {
///     grant_id: "grant_001".to_string(),
///     message: "end date must be after start date".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid grant 'grant_001': end date must be after start date"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds inconsistent values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Grant data violates a structural invariant (timeline, funding, amounts).
    ///
    /// Not retryable; the data must be fixed where it was entered.
    #[error("Invalid grant '{grant_id}': {message}")]
    InvalidGrant {
        /// The ID of the invalid grant.
        grant_id: String,
        /// A description of what made the grant invalid.
        message: String,
    },

    /// A grant mutation referenced an entity the grant does not own.
    #[error("{entity} not found: {id}")]
    EntityNotFound {
        /// The kind of entity (e.g. "Milestone").
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_grant_displays_id_and_message() {
        let error = EngineError::InvalidGrant {
            grant_id: "grant_001".to_string(),
            message: "total funding cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid grant 'grant_001': total funding cannot be negative"
        );
    }

    #[test]
    fn test_entity_not_found_displays_entity_and_id() {
        let error = EngineError::EntityNotFound {
            entity: "Milestone",
            id: "ms_404".to_string(),
        };
        assert_eq!(error.to_string(), "Milestone not found: ms_404");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_grant() -> EngineResult<()> {
            Err(EngineError::InvalidGrant {
                grant_id: "g".to_string(),
                message: "bad".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_grant()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
