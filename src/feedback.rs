//! Feedback capture for analyses and recommendations.
//!
//! The engine reports user feedback through the [`FeedbackSink`] trait so
//! callers choose where it lands. [`InMemoryFeedbackStore`] is the
//! thread-safe reference implementation for embedded usage and tests;
//! [`NullFeedbackSink`] drops everything.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;
use crate::error::FeedbackError;
use crate::explain::AnalysisId;

fn lock_err(context: &'static str) -> FeedbackError {
    FeedbackError::backend(format!("poisoned lock: {context}"))
}

/// User feedback about one analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFeedback {
    /// The analysis the feedback is about.
    pub analysis_id: AnalysisId,

    /// Whether the user found the result accurate.
    pub accurate: bool,

    /// The emotion the user says was right, when the result was off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_emotion: Option<Emotion>,

    /// When the feedback was given.
    pub timestamp: DateTime<Utc>,
}

impl AnalysisFeedback {
    /// Creates feedback stamped now.
    #[must_use]
    pub fn new(
        analysis_id: AnalysisId,
        accurate: bool,
        corrected_emotion: Option<Emotion>,
    ) -> Self {
        Self {
            analysis_id,
            accurate,
            corrected_emotion,
            timestamp: Utc::now(),
        }
    }
}

/// User feedback about one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFeedback {
    /// The recommendation the feedback is about.
    pub recommendation_id: String,

    /// Whether the user found the suggestion helpful.
    pub was_helpful: bool,

    /// When the feedback was given.
    pub timestamp: DateTime<Utc>,
}

impl RecommendationFeedback {
    /// Creates feedback stamped now.
    #[must_use]
    pub fn new(recommendation_id: impl Into<String>, was_helpful: bool) -> Self {
        Self {
            recommendation_id: recommendation_id.into(),
            was_helpful,
            timestamp: Utc::now(),
        }
    }
}

/// Destination for user feedback.
///
/// Implementations must tolerate repeated feedback for the same
/// analysis; the latest record wins.
pub trait FeedbackSink: Send + Sync {
    /// Records feedback about an analysis.
    fn record_analysis_feedback(&self, feedback: AnalysisFeedback) -> Result<(), FeedbackError>;

    /// Records feedback about a recommendation.
    fn record_recommendation_feedback(
        &self,
        feedback: RecommendationFeedback,
    ) -> Result<(), FeedbackError>;
}

#[derive(Debug, Default)]
struct FeedbackState {
    analyses: HashMap<AnalysisId, AnalysisFeedback>,
    recommendations: Vec<RecommendationFeedback>,
}

/// Thread-safe in-memory feedback store.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    state: RwLock<FeedbackState>,
}

impl InMemoryFeedbackStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored feedback for an analysis, if any.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the store lock is poisoned.
    pub fn analysis_feedback(
        &self,
        id: AnalysisId,
    ) -> Result<Option<AnalysisFeedback>, FeedbackError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("feedback.analysis_feedback"))?;
        Ok(state.analyses.get(&id).cloned())
    }

    /// Number of analyses with feedback on record.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the store lock is poisoned.
    pub fn analysis_feedback_count(&self) -> Result<usize, FeedbackError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("feedback.analysis_feedback_count"))?;
        Ok(state.analyses.len())
    }

    /// All recommendation feedback in arrival order.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the store lock is poisoned.
    pub fn recommendation_feedback(&self) -> Result<Vec<RecommendationFeedback>, FeedbackError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("feedback.recommendation_feedback"))?;
        Ok(state.recommendations.clone())
    }

    /// Share of analyses marked accurate, in [0, 1]. `None` until any
    /// analysis feedback exists.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the store lock is poisoned.
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy_rate(&self) -> Result<Option<f64>, FeedbackError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("feedback.accuracy_rate"))?;
        if state.analyses.is_empty() {
            return Ok(None);
        }
        let accurate = state.analyses.values().filter(|f| f.accurate).count();
        Ok(Some(accurate as f64 / state.analyses.len() as f64))
    }
}

impl FeedbackSink for InMemoryFeedbackStore {
    fn record_analysis_feedback(&self, feedback: AnalysisFeedback) -> Result<(), FeedbackError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("feedback.record_analysis"))?;
        state.analyses.insert(feedback.analysis_id, feedback);
        Ok(())
    }

    fn record_recommendation_feedback(
        &self,
        feedback: RecommendationFeedback,
    ) -> Result<(), FeedbackError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("feedback.record_recommendation"))?;
        state.recommendations.push(feedback);
        Ok(())
    }
}

/// Sink that discards all feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedbackSink;

impl FeedbackSink for NullFeedbackSink {
    fn record_analysis_feedback(&self, _feedback: AnalysisFeedback) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn record_recommendation_feedback(
        &self,
        _feedback: RecommendationFeedback,
    ) -> Result<(), FeedbackError> {
        Ok(())
    }
}
