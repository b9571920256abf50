//! Explainable decomposition of an emotion judgment.
//!
//! Every analysis can be unfolded into a linear decision path the UI
//! shows on demand: which signals fired, and what share of the final
//! judgment each one carried. The path closes with a balancing step so
//! contributions always sum to exactly 100, whichever optional signals
//! were present.

use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::EmotionalAnalysis;
use crate::emotion::{Emotion, Sentiment};
use crate::lexicon::{EmotionLexicon, EmotionalWordMatch};
use crate::prosody::{describe_prosody, ProsodyMetrics};

const TEXT_CONTRIBUTION: f64 = 40.0;
const MODIFIER_CONTRIBUTION: f64 = 15.0;
const PROSODY_CONTRIBUTION: f64 = 30.0;
const PROSODY_SNAPSHOT_CONFIDENCE: f64 = 75.0;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Unique identifier of one explained analysis.
///
/// Feedback submitted later refers back to the analysis through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse daypart derived from the entry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// Before 12:00.
    Morning,
    /// 12:00 to 17:59.
    Afternoon,
    /// 18:00 onwards.
    Night,
}

impl TimeOfDay {
    /// Classifies an hour of day (0-23).
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 18 {
            Self::Afternoon
        } else {
            Self::Night
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        };
        write!(f, "{s}")
    }
}

/// Snapshot of the text signals behind a judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysisSnapshot {
    /// Matched lexicon keywords, deduplicated.
    pub keywords: Vec<String>,

    /// Sentiment label of the analysis.
    pub sentiment: Sentiment,

    /// Every emotional-word detection, in text order.
    pub emotional_words: Vec<EmotionalWordMatch>,

    /// Negation tokens found in the text.
    pub negations: Vec<String>,

    /// Intensifier tokens found in the text.
    pub intensifiers: Vec<String>,
}

/// Snapshot of the voice signals behind a judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodySnapshot {
    /// The full metrics record as supplied.
    pub features: ProsodyMetrics,

    /// Prose interpretation of the salient features.
    pub interpretation: String,

    /// Fixed confidence attributed to the prosody channel.
    pub confidence: f64,
}

/// One habit correlation surfaced as a contextual factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCorrelationFactor {
    /// Habit name.
    pub habit: String,

    /// Correlation coefficient in [-1, 1].
    pub correlation: f64,
}

/// Context the judgment was made in, derived from the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualFactors {
    /// Daypart of the entry.
    pub time_of_day: TimeOfDay,

    /// Full English day name.
    pub day_of_week: String,

    /// Count of related entries, when the caller supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entries: Option<usize>,

    /// Habit correlations relevant to this entry, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_correlations: Option<Vec<HabitCorrelationFactor>>,
}

/// One step of the decision path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStep {
    /// 1-based position; steps are contiguous in emission order.
    pub step: usize,

    /// Human-readable description of the rule that fired.
    pub rule: String,

    /// The observed value the rule acted on.
    pub value: f64,

    /// Percentage share of the final judgment.
    pub contribution: f64,
}

/// A user's verdict on one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    /// Whether the judged emotion felt accurate.
    pub accurate: bool,

    /// The emotion the user would have picked instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_emotion: Option<Emotion>,

    /// When the feedback was given.
    pub timestamp: DateTime<Utc>,
}

/// Full explainable decomposition of one emotion judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackBoxAnalysis {
    /// Identifier feedback refers back to.
    pub id: AnalysisId,

    /// Whether the UI currently surfaces the decomposition. Off until
    /// the user toggles it.
    pub enabled: bool,

    /// Text signal snapshot.
    pub text_analysis: TextAnalysisSnapshot,

    /// Voice signal snapshot, when a metrics record was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosody_analysis: Option<ProsodySnapshot>,

    /// Timestamp-derived context.
    pub contextual_factors: ContextualFactors,

    /// Ordered decision steps; contributions sum to exactly 100.
    pub decision_path: Vec<DecisionStep>,

    /// Confidence of the underlying analysis.
    pub overall_confidence: f64,

    /// Latest user verdict, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_feedback: Option<UserFeedback>,
}

impl BlackBoxAnalysis {
    /// Attaches a user verdict, replacing any previous one.
    pub fn attach_feedback(&mut self, feedback: UserFeedback) {
        self.user_feedback = Some(feedback);
    }

    /// Sum of all decision-step contributions.
    #[must_use]
    pub fn contribution_total(&self) -> f64 {
        self.decision_path.iter().map(|s| s.contribution).sum()
    }

    /// Records how many related entries informed this context.
    #[must_use]
    pub fn with_related_entries(mut self, count: usize) -> Self {
        self.contextual_factors.related_entries = Some(count);
        self
    }

    /// Records the habit correlations relevant to this entry.
    #[must_use]
    pub fn with_habit_correlations(mut self, factors: Vec<HabitCorrelationFactor>) -> Self {
        self.contextual_factors.habit_correlations = Some(factors);
        self
    }
}

/// Builds the explainable decomposition for one analysis, timestamped
/// with the current time.
#[must_use]
pub fn generate_black_box_analysis(
    lexicon: &EmotionLexicon,
    text: &str,
    analysis: &EmotionalAnalysis,
    prosody: Option<&ProsodyMetrics>,
) -> BlackBoxAnalysis {
    generate_black_box_analysis_at(lexicon, text, analysis, prosody, Utc::now())
}

/// Builds the explainable decomposition with an explicit timestamp.
///
/// The decision path opens with the emotional-word step (share 40), adds
/// a modifier step when negations or intensifiers occurred (share 15)
/// and a prosody step when voice metrics were supplied (share 30), and
/// closes with the confidence step carrying the remainder to 100.
///
/// # Examples
///
/// ```
/// use nostra_insight::{
///     analyze_text, generate_black_box_analysis, EmotionLexicon,
/// };
///
/// let lexicon = EmotionLexicon::new();
/// let text = "very happy today";
/// let analysis = analyze_text(&lexicon, text);
/// let black_box = generate_black_box_analysis(&lexicon, text, &analysis, None);
/// assert!((black_box.contribution_total() - 100.0).abs() < f64::EPSILON);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_black_box_analysis_at(
    lexicon: &EmotionLexicon,
    text: &str,
    analysis: &EmotionalAnalysis,
    prosody: Option<&ProsodyMetrics>,
    timestamp: DateTime<Utc>,
) -> BlackBoxAnalysis {
    let scan = lexicon.scan(text);

    let mut path: Vec<DecisionStep> = Vec::new();
    path.push(DecisionStep {
        step: path.len() + 1,
        rule: "Analysis of emotional words in text".to_string(),
        value: scan.emotional_words.len() as f64,
        contribution: TEXT_CONTRIBUTION,
    });

    if scan.has_modifiers() {
        path.push(DecisionStep {
            step: path.len() + 1,
            rule: format!(
                "Modifiers detected ({} negations, {} intensifiers)",
                scan.negations.len(),
                scan.intensifiers.len()
            ),
            value: scan.modifier_count() as f64,
            contribution: MODIFIER_CONTRIBUTION,
        });
    }

    if let Some(metrics) = prosody {
        path.push(DecisionStep {
            step: path.len() + 1,
            rule: format!(
                "Prosodic analysis: pitch {}, energy {}",
                metrics.pitch.trend, metrics.energy.intensity
            ),
            value: metrics.energy.current,
            contribution: PROSODY_CONTRIBUTION,
        });
    }

    let spent: f64 = path.iter().map(|s| s.contribution).sum();
    path.push(DecisionStep {
        step: path.len() + 1,
        rule: "Confidence calculation based on multiple factors".to_string(),
        value: analysis.confidence,
        contribution: 100.0 - spent,
    });

    BlackBoxAnalysis {
        id: AnalysisId::new(),
        enabled: false,
        text_analysis: TextAnalysisSnapshot {
            keywords: analysis.keywords.clone(),
            sentiment: analysis.sentiment,
            emotional_words: scan.emotional_words,
            negations: scan.negations,
            intensifiers: scan.intensifiers,
        },
        prosody_analysis: prosody.map(|metrics| ProsodySnapshot {
            features: *metrics,
            interpretation: describe_prosody(metrics),
            confidence: PROSODY_SNAPSHOT_CONFIDENCE,
        }),
        contextual_factors: ContextualFactors {
            time_of_day: TimeOfDay::from_hour(timestamp.hour()),
            day_of_week: day_name(&timestamp).to_string(),
            related_entries: None,
            habit_correlations: None,
        },
        decision_path: path,
        overall_confidence: analysis.confidence,
        user_feedback: None,
    }
}

fn day_name(timestamp: &DateTime<Utc>) -> &'static str {
    let index = usize::try_from(timestamp.weekday().num_days_from_sunday()).unwrap_or(0);
    DAY_NAMES.get(index).copied().unwrap_or("Sunday")
}
