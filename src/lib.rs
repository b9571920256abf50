//! # NOSTRA Insight - The Emotional Analysis Core
//!
//! nostra_insight turns raw journal text, simulated voice metrics, and
//! habit logs into structured emotional insight. It is the on-device
//! analysis layer of a journaling app: deterministic keyword rules
//! rather than trained models, with every judgment explainable after
//! the fact.
//!
//! ## Core Concepts
//!
//! - **EmotionalAnalysis**: keyword classification of one entry
//!   (primary, secondaries, composites, sentiment, valence)
//! - **ProsodyMetrics**: the voice-feature contract with the audio
//!   collaborator, stood in for by a simulator
//! - **BlackBoxAnalysis**: the decision path behind a judgment, with
//!   contributions summing to exactly 100
//! - **CognitiveGraph**: entities and emotions linked by co-occurrence
//! - **HabitEmotionCorrelation**: Pearson evidence linking habit logs
//!   to daily emotion intensities
//!
//! ## Usage
//!
//! ```rust
//! use nostra_insight::{Emotion, InsightEngine};
//!
//! let engine = InsightEngine::default();
//! let insight = engine.analyze_entry("very happy after a great walk", None);
//!
//! assert_eq!(insight.analysis.primary_emotion, Emotion::Joy);
//! assert!(!insight.black_box.decision_path.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core vocabulary
pub mod emotion;
pub mod error;
pub mod lexicon;

// Analysis passes
pub mod classifier;
pub mod explain;
pub mod prosody;

// Aggregates and correlation
pub mod graph;
pub mod habits;
pub mod recommend;

// Capability seams and composition
pub mod engine;
pub mod feedback;

// Re-export primary types at crate root for convenience
pub use classifier::{
    analyze_text, analyze_text_at, extract_keywords, EmotionScores, EmotionalAnalysis,
    SecondaryEmotion,
};
pub use emotion::{
    emoji_for_label, valence_for_label, CompositeEmotion, CompositeKind, Emotion, Sentiment,
};
pub use engine::{EntryInsight, InsightEngine};
pub use error::{FeedbackError, InsightError, InsightResult, ValidationError};
pub use explain::{
    generate_black_box_analysis, generate_black_box_analysis_at, AnalysisId, BlackBoxAnalysis,
    ContextualFactors, DecisionStep, HabitCorrelationFactor, ProsodySnapshot,
    TextAnalysisSnapshot, TimeOfDay, UserFeedback,
};
pub use feedback::{
    AnalysisFeedback, FeedbackSink, InMemoryFeedbackStore, NullFeedbackSink,
    RecommendationFeedback,
};
pub use graph::{
    extract_entities, CognitiveGraph, CognitiveGraphEdge, CognitiveGraphNode, EdgeId, EdgeType,
    EntityLexicon, ExtractedEntities, GraphDelta, NodeId, NodeMetadata, NodeType,
};
pub use habits::{
    analyze_habit_emotion_correlation, correlation, detect_habit_patterns, CorrelationDirection,
    CorrelationStrength, EmotionObservation, HabitCategory, HabitDataType, HabitDefinition,
    HabitEmotionCorrelation, HabitEntry, HabitPatterns, HabitTarget, HabitTrend, HabitValue,
    TargetFrequency,
};
pub use lexicon::{
    EmotionLexicon, EmotionalWordMatch, LexiconScan, ModifierTracker, INTENSIFIER_MULTIPLIER,
};
pub use prosody::{
    describe_prosody, interpret_prosody_emotion, simulate_prosody, simulate_prosody_with_rng,
    EnergyIntensity, EnergyMetrics, PauseMetrics, PauseStyle, PitchMetrics, PitchTrend,
    ProsodyBaseline, ProsodyMetrics, ProsodyReading, SpeechPace, SpeechRateMetrics, VoiceQuality,
};
pub use recommend::{
    activity_suggestions, recommend_for_context, recommend_from_correlations, ActivityKind,
    EmotionalContext, EmotionalTrend, ExpectedImpact, HabitRecommendation,
    HabitRecommendationKind, Priority, Recommendation, RecommendationCategory, RecommendedAction,
    Screen, UserPreferences,
};
