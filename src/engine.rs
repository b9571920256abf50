//! Entry analysis engine.
//!
//! [`InsightEngine`] wires the emotion lexicon, the entity lexicon, the
//! prosody baseline, and a feedback sink into one front door: journal
//! text goes in, a complete [`EntryInsight`] comes out. The engine is
//! cheap to clone and safe to share across threads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifier::{analyze_text_at, EmotionalAnalysis};
use crate::emotion::Emotion;
use crate::error::FeedbackError;
use crate::explain::{generate_black_box_analysis_at, BlackBoxAnalysis, UserFeedback};
use crate::feedback::{AnalysisFeedback, FeedbackSink, NullFeedbackSink, RecommendationFeedback};
use crate::graph::{EntityLexicon, GraphDelta};
use crate::lexicon::EmotionLexicon;
use crate::prosody::{
    interpret_prosody_emotion, simulate_prosody_with_rng, ProsodyBaseline, ProsodyMetrics,
    ProsodyReading,
};

/// Everything the engine derives from one journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryInsight {
    /// Lexicon classification of the entry text.
    pub analysis: EmotionalAnalysis,

    /// Prosody interpretation, when voice metrics were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosody: Option<ProsodyReading>,

    /// The explainable decomposition of the judgment.
    pub black_box: BlackBoxAnalysis,

    /// Graph nodes and edges the entry contributes.
    pub graph_delta: GraphDelta,
}

/// Analysis engine over pluggable lexicons and a feedback sink.
#[derive(Clone)]
pub struct InsightEngine {
    emotion_lexicon: EmotionLexicon,
    entity_lexicon: EntityLexicon,
    baseline: ProsodyBaseline,
    feedback: Arc<dyn FeedbackSink>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(Arc::new(NullFeedbackSink))
    }
}

impl InsightEngine {
    /// Creates an engine with the built-in lexicons and baseline,
    /// reporting feedback to the given sink.
    #[must_use]
    pub fn new(feedback: Arc<dyn FeedbackSink>) -> Self {
        Self {
            emotion_lexicon: EmotionLexicon::new(),
            entity_lexicon: EntityLexicon::new(),
            baseline: ProsodyBaseline::default(),
            feedback,
        }
    }

    /// Replaces the emotion lexicon.
    #[must_use]
    pub fn with_emotion_lexicon(mut self, lexicon: EmotionLexicon) -> Self {
        self.emotion_lexicon = lexicon;
        self
    }

    /// Replaces the entity lexicon.
    #[must_use]
    pub fn with_entity_lexicon(mut self, lexicon: EntityLexicon) -> Self {
        self.entity_lexicon = lexicon;
        self
    }

    /// Replaces the prosody baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: ProsodyBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// The emotion lexicon in use.
    #[must_use]
    pub fn emotion_lexicon(&self) -> &EmotionLexicon {
        &self.emotion_lexicon
    }

    /// The entity lexicon in use.
    #[must_use]
    pub fn entity_lexicon(&self) -> &EntityLexicon {
        &self.entity_lexicon
    }

    /// The prosody baseline in use.
    #[must_use]
    pub fn baseline(&self) -> ProsodyBaseline {
        self.baseline
    }

    /// Analyzes one journal entry, timestamped now.
    #[must_use]
    pub fn analyze_entry(&self, text: &str, prosody: Option<&ProsodyMetrics>) -> EntryInsight {
        self.analyze_entry_at(text, prosody, Utc::now())
    }

    /// Analyzes one journal entry with an explicit timestamp.
    ///
    /// The classification, the explainable record, and the graph delta
    /// all carry the same timestamp, so an entry analyzed twice at the
    /// same instant differs only in its analysis id.
    ///
    /// # Examples
    ///
    /// ```
    /// use nostra_insight::{Emotion, InsightEngine};
    ///
    /// let engine = InsightEngine::default();
    /// let insight = engine.analyze_entry("I am so happy about the project", None);
    ///
    /// assert_eq!(insight.analysis.primary_emotion, Emotion::Joy);
    /// assert!(insight.prosody.is_none());
    /// assert!(!insight.graph_delta.nodes.is_empty());
    /// ```
    #[must_use]
    pub fn analyze_entry_at(
        &self,
        text: &str,
        prosody: Option<&ProsodyMetrics>,
        at: DateTime<Utc>,
    ) -> EntryInsight {
        let analysis = analyze_text_at(&self.emotion_lexicon, text, at);
        let reading = prosody.map(interpret_prosody_emotion);
        let black_box =
            generate_black_box_analysis_at(&self.emotion_lexicon, text, &analysis, prosody, at);
        let graph_delta =
            GraphDelta::from_entry(&self.entity_lexicon, text, &analysis.emotion_labels(), at);

        EntryInsight {
            analysis,
            prosody: reading,
            black_box,
            graph_delta,
        }
    }

    /// Simulated voice metrics around the engine's baseline.
    #[must_use]
    pub fn simulate_prosody(&self) -> ProsodyMetrics {
        simulate_prosody_with_rng(&mut rand::thread_rng(), self.baseline)
    }

    /// Simulated voice metrics from a caller-supplied random source.
    pub fn simulate_prosody_with_rng<R: Rng>(&self, rng: &mut R) -> ProsodyMetrics {
        simulate_prosody_with_rng(rng, self.baseline)
    }

    /// Attaches user feedback to an analysis and reports it to the sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when recording fails; the feedback stays
    /// attached to the analysis record either way.
    pub fn submit_feedback(
        &self,
        analysis: &mut BlackBoxAnalysis,
        accurate: bool,
        corrected_emotion: Option<Emotion>,
    ) -> Result<(), FeedbackError> {
        let feedback = AnalysisFeedback::new(analysis.id, accurate, corrected_emotion);
        analysis.attach_feedback(UserFeedback {
            accurate,
            corrected_emotion,
            timestamp: feedback.timestamp,
        });
        self.feedback.record_analysis_feedback(feedback)
    }

    /// Reports whether a recommendation was helpful.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when recording fails.
    pub fn record_recommendation_feedback(
        &self,
        recommendation_id: impl Into<String>,
        was_helpful: bool,
    ) -> Result<(), FeedbackError> {
        self.feedback
            .record_recommendation_feedback(RecommendationFeedback::new(
                recommendation_id,
                was_helpful,
            ))
    }
}
