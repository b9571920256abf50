//! Error types for the analysis core.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error
//! messages.

use thiserror::Error;

/// Validation errors that occur when constructing analysis inputs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Habit id was empty or whitespace.
    #[error("Habit id cannot be empty")]
    EmptyHabitId,

    /// Emotion label was empty or whitespace.
    #[error("Emotion label cannot be empty")]
    EmptyEmotionLabel,

    /// Emotion intensity left the 0-10 mood scale.
    #[error("Intensity value {value} is out of range [0.0, 10.0]")]
    IntensityOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Habit measurement was NaN or infinite.
    #[error("Habit value {value} is not finite")]
    NonFiniteHabitValue {
        /// The rejected value.
        value: f64,
    },
}

/// Errors raised by a feedback sink.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The sink could not record the feedback.
    #[error("Feedback backend error: {message}")]
    Backend {
        /// What went wrong.
        message: String,
    },
}

impl FeedbackError {
    /// Creates a backend error from any displayable cause.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Top-level error type for the analysis core.
#[derive(Debug, Error)]
pub enum InsightError {
    /// An input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A feedback sink failed.
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    /// A bug or unexpected state inside the engine.
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl InsightError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a feedback error.
    #[must_use]
    pub const fn is_feedback(&self) -> bool {
        matches!(self, Self::Feedback(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for analysis operations.
pub type InsightResult<T> = Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_intensity() {
        let err = ValidationError::IntensityOutOfRange { value: 12.5 };
        let msg = format!("{err}");
        assert!(msg.contains("12.5"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_validation_error_empty_habit_id() {
        let err = ValidationError::EmptyHabitId;
        let msg = format!("{err}");
        assert!(msg.contains("Habit id"));
    }

    #[test]
    fn test_feedback_error_backend() {
        let err = FeedbackError::backend("poisoned lock");
        let msg = format!("{err}");
        assert!(msg.contains("poisoned lock"));
    }

    #[test]
    fn test_insight_error_from_validation() {
        let validation_err = ValidationError::EmptyEmotionLabel;
        let err: InsightError = validation_err.into();
        assert!(err.is_validation());
        assert!(!err.is_internal());
    }

    #[test]
    fn test_insight_error_from_feedback() {
        let err: InsightError = FeedbackError::backend("down").into();
        assert!(err.is_feedback());
        let msg = format!("{err}");
        assert!(msg.contains("down"));
    }

    #[test]
    fn test_insight_error_internal() {
        let err = InsightError::internal("unexpected state");
        assert!(err.is_internal());
        let msg = format!("{err}");
        assert!(msg.contains("unexpected state"));
    }
}
