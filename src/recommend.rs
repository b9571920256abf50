//! Rule-based recommendation engines.
//!
//! Two surfaces share the [`Priority`] scale: correlation-driven habit
//! recommendations built from [`HabitEmotionCorrelation`] evidence, and
//! context-driven suggestions built from the user's current emotional
//! state. Both are pure rule tables; ordering is priority-major and
//! deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::explain::TimeOfDay;
use crate::habits::{
    CorrelationDirection, CorrelationStrength, HabitDefinition, HabitEmotionCorrelation,
    MAX_INTENSITY,
};

/// Minimum aligned samples before a correlation backs a recommendation.
const MIN_EVIDENCE_SAMPLES: usize = 5;

/// Emotions a positively correlated habit should reinforce.
const BOOST_EMOTIONS: [&str; 2] = ["joy", "hope"];

/// Emotions a recommendation aims to reduce.
const REDUCE_EMOTIONS: [&str; 3] = ["sadness", "anger", "fear"];

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Act soon.
    High,
    /// Worth doing.
    Medium,
    /// Optional.
    Low,
}

impl Priority {
    /// Sort rank; higher sorts first.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// App screen an internal action navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Fast journal entry form.
    QuickWrite,
    /// Habit dashboard.
    Habits,
    /// Calm mode.
    Zen,
}

/// Guided activity an internal action starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A short walk.
    Walk,
    /// Guided meditation.
    Meditation,
    /// Breathing exercise.
    Breathing,
}

/// What tapping a recommendation does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendedAction {
    /// Open an app screen.
    Navigate {
        /// Button label.
        label: String,
        /// Destination screen.
        screen: Screen,
    },
    /// Start a guided activity.
    StartActivity {
        /// Button label.
        label: String,
        /// The activity.
        activity: ActivityKind,
        /// Suggested duration, when the rule specifies one.
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_minutes: Option<u32>,
    },
    /// Performed outside the app.
    External {
        /// Button label.
        label: String,
    },
}

/// What a habit recommendation asks the user to do with the habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitRecommendationKind {
    /// Do more of the habit.
    Boost,
    /// Do less of the habit.
    Avoid,
    /// Keep observing before acting.
    Monitor,
}

/// Expected effect of following a habit recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedImpact {
    /// Estimated change in the emotion, as a percentage.
    pub estimated_emotion_change: f64,

    /// The emotion affected.
    pub emotion: String,
}

/// A habit adjustment suggested by correlation evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecommendation {
    /// Deterministic id, `rec_{habit_id}_{emotion}`.
    pub id: String,

    /// Urgency.
    pub priority: Priority,

    /// Boost, avoid, or monitor.
    #[serde(rename = "type")]
    pub kind: HabitRecommendationKind,

    /// Headline, same text as `action`.
    pub title: String,

    /// Prose summary taken from the correlation interpretation.
    pub description: String,

    /// The correlation this recommendation rests on.
    pub reasoning: HabitEmotionCorrelation,

    /// The suggested adjustment.
    pub action: String,

    /// Expected effect of following the suggestion.
    pub impact: ExpectedImpact,

    /// Number of aligned samples behind the correlation.
    pub evidence: usize,
}

/// Builds habit recommendations from correlation results.
///
/// Keeps correlations with non-weak strength and at least 5 samples,
/// skips correlations whose habit has no definition, and orders the
/// output by priority then absolute correlation, both descending.
#[must_use]
pub fn recommend_from_correlations(
    correlations: &[HabitEmotionCorrelation],
    habits: &[HabitDefinition],
) -> Vec<HabitRecommendation> {
    let significant = correlations
        .iter()
        .filter(|c| c.strength != CorrelationStrength::Weak && c.samples >= MIN_EVIDENCE_SAMPLES);

    let mut recommendations: Vec<HabitRecommendation> = Vec::new();
    for corr in significant {
        let habit = match habits.iter().find(|h| h.id == corr.habit_id) {
            Some(habit) => habit,
            None => continue,
        };

        let emotion = corr.emotion.as_str();
        let boost_priority = if corr.strength == CorrelationStrength::Strong {
            Priority::High
        } else {
            Priority::Medium
        };

        let (kind, priority, action) = if corr.direction == CorrelationDirection::Positive
            && BOOST_EMOTIONS.contains(&emotion)
        {
            (
                HabitRecommendationKind::Boost,
                boost_priority,
                format!("Increase {} to improve your {emotion}", habit.name),
            )
        } else if corr.direction == CorrelationDirection::Negative
            && REDUCE_EMOTIONS.contains(&emotion)
        {
            (
                HabitRecommendationKind::Boost,
                boost_priority,
                format!("Increase {} to reduce {emotion}", habit.name),
            )
        } else if corr.direction == CorrelationDirection::Positive
            && REDUCE_EMOTIONS.contains(&emotion)
        {
            (
                HabitRecommendationKind::Avoid,
                Priority::High,
                format!("Reduce {} to improve your emotional state", habit.name),
            )
        } else {
            (
                HabitRecommendationKind::Monitor,
                Priority::Medium,
                format!("Keep tracking {} alongside {emotion}", habit.name),
            )
        };

        recommendations.push(HabitRecommendation {
            id: format!("rec_{}_{emotion}", corr.habit_id),
            priority,
            kind,
            title: action.clone(),
            description: corr.interpretation.clone(),
            reasoning: corr.clone(),
            action,
            impact: ExpectedImpact {
                estimated_emotion_change: (corr.correlation.abs() * 30.0).round(),
                emotion: corr.emotion.clone(),
            },
            evidence: corr.samples,
        });
    }

    recommendations.sort_by(|a, b| {
        b.priority.rank().cmp(&a.priority.rank()).then_with(|| {
            b.reasoning
                .correlation
                .abs()
                .total_cmp(&a.reasoning.correlation.abs())
        })
    });
    recommendations
}

/// Direction of the user's recent emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalTrend {
    /// Getting better.
    Improving,
    /// Getting worse.
    Declining,
    /// Holding steady.
    Stable,
}

impl fmt::Display for EmotionalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// The user's current emotional situation, as the rules see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalContext {
    /// Current dominant emotion label; composites (anxiety, hope) are
    /// valid here.
    pub current_emotion: String,

    /// Intensity on the 0-10 mood scale.
    pub intensity: f64,

    /// Direction of the recent history.
    pub recent_trend: EmotionalTrend,

    /// Time of day, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,

    /// Habits correlated with the current emotion, when known.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub correlated_habits: Vec<String>,
}

impl EmotionalContext {
    /// Creates a context with a stable trend and no patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEmotionLabel`] for a blank label
    /// and [`ValidationError::IntensityOutOfRange`] when the intensity
    /// leaves [0, 10].
    pub fn new(current_emotion: impl Into<String>, intensity: f64) -> Result<Self, ValidationError> {
        let current_emotion = current_emotion.into();
        if current_emotion.trim().is_empty() {
            return Err(ValidationError::EmptyEmotionLabel);
        }
        if !intensity.is_finite() || !(0.0..=MAX_INTENSITY).contains(&intensity) {
            return Err(ValidationError::IntensityOutOfRange { value: intensity });
        }
        Ok(Self {
            current_emotion,
            intensity,
            recent_trend: EmotionalTrend::Stable,
            time_of_day: None,
            correlated_habits: Vec::new(),
        })
    }

    /// Sets the recent trend.
    #[must_use]
    pub fn with_trend(mut self, trend: EmotionalTrend) -> Self {
        self.recent_trend = trend;
        self
    }

    /// Sets the time of day.
    #[must_use]
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Sets the correlated habit ids.
    #[must_use]
    pub fn with_correlated_habits(mut self, habits: Vec<String>) -> Self {
        self.correlated_habits = habits;
        self
    }
}

/// User preferences the rules respect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Activities the user enjoys.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub favorite_activities: Vec<String>,

    /// Recommendation ids the user has dismissed for good.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub disliked_suggestions: Vec<String>,
}

/// Broad grouping of a context recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Physical activity.
    Activity,
    /// Journaling and reflection.
    Reflection,
    /// Habit adjustments.
    Habit,
    /// Meditation and mindfulness.
    Meditation,
    /// Social contact.
    Social,
    /// Rest and recovery.
    SelfCare,
}

/// A context-driven suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable id, used for dislike filtering and feedback.
    pub id: String,

    /// Broad grouping.
    pub category: RecommendationCategory,

    /// Headline.
    pub title: String,

    /// Prose explanation.
    pub description: String,

    /// Display icon.
    pub icon: String,

    /// The emotion the suggestion targets.
    pub target_emotion: String,

    /// Rule confidence, 0-100.
    pub confidence: f64,

    /// Why this fired.
    pub reason: String,

    /// What tapping it does.
    pub actions: Vec<RecommendedAction>,

    /// Urgency.
    pub priority: Priority,

    /// When to act, when the rule specifies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
}

/// Applies the context rule table.
///
/// Every rule whose condition holds contributes its suggestions; the
/// low-priority mindfulness suggestion is always included and therefore
/// sorts last unless it is alone. Disliked ids are dropped, then the
/// result is ordered by priority and confidence, both descending.
///
/// # Examples
///
/// ```
/// use nostra_insight::{recommend_for_context, EmotionalContext, Priority};
///
/// let context = EmotionalContext::new("sadness", 8.0).unwrap();
/// let recommendations = recommend_for_context(&context, None);
///
/// assert_eq!(recommendations[0].id, "rec_social_support");
/// assert_eq!(recommendations[0].priority, Priority::High);
/// ```
#[must_use]
pub fn recommend_for_context(
    context: &EmotionalContext,
    preferences: Option<&UserPreferences>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Vec::new();
    let emotion = context.current_emotion.as_str();

    if REDUCE_EMOTIONS.contains(&emotion) && context.intensity > 6.0 {
        recommendations.push(Recommendation {
            id: "rec_social_support".to_string(),
            category: RecommendationCategory::Social,
            title: "Reach out to someone close".to_string(),
            description: format!(
                "Elevated {emotion} detected. Talking with someone you trust can help."
            ),
            icon: "👥".to_string(),
            target_emotion: emotion.to_string(),
            confidence: 85.0,
            reason: format!("Because {emotion} has been rising over the last few days"),
            actions: vec![
                RecommendedAction::External {
                    label: "Call a friend".to_string(),
                },
                RecommendedAction::External {
                    label: "Write a message".to_string(),
                },
            ],
            priority: Priority::High,
            best_time: Some("now".to_string()),
        });

        recommendations.push(Recommendation {
            id: "rec_exercise".to_string(),
            category: RecommendationCategory::Activity,
            title: "Take a 15 minute walk".to_string(),
            description: "Light exercise can lift your mood significantly.".to_string(),
            icon: "🚶".to_string(),
            target_emotion: emotion.to_string(),
            confidence: 78.0,
            reason: "Exercise releases endorphins naturally".to_string(),
            actions: vec![RecommendedAction::StartActivity {
                label: "Start the walk".to_string(),
                activity: ActivityKind::Walk,
                duration_minutes: Some(15),
            }],
            priority: Priority::High,
            best_time: None,
        });
    }

    if emotion == "fatigue" && context.intensity > 7.0 {
        recommendations.push(Recommendation {
            id: "rec_rest".to_string(),
            category: RecommendationCategory::SelfCare,
            title: "Take a break".to_string(),
            description: "Your body needs to recover. Consider resting or taking a short nap."
                .to_string(),
            icon: "😴".to_string(),
            target_emotion: "fatigue".to_string(),
            confidence: 90.0,
            reason: "High fatigue levels detected".to_string(),
            actions: vec![
                RecommendedAction::External {
                    label: "Schedule a rest".to_string(),
                },
                RecommendedAction::StartActivity {
                    label: "Meditate for 5 minutes".to_string(),
                    activity: ActivityKind::Meditation,
                    duration_minutes: Some(5),
                },
            ],
            priority: Priority::High,
            best_time: Some("now".to_string()),
        });
    }

    if (emotion == "joy" || emotion == "surprise") && context.intensity > 7.0 {
        recommendations.push(Recommendation {
            id: "rec_journal_gratitude".to_string(),
            category: RecommendationCategory::Reflection,
            title: "Document this moment".to_string(),
            description:
                "You are experiencing positive emotions. Writing about them reinforces wellbeing."
                    .to_string(),
            icon: "📝".to_string(),
            target_emotion: "joy".to_string(),
            confidence: 75.0,
            reason: "Recording positive moments strengthens emotional memory".to_string(),
            actions: vec![RecommendedAction::Navigate {
                label: "New quick entry".to_string(),
                screen: Screen::QuickWrite,
            }],
            priority: Priority::Medium,
            best_time: None,
        });

        recommendations.push(Recommendation {
            id: "rec_share_joy".to_string(),
            category: RecommendationCategory::Social,
            title: "Share your joy".to_string(),
            description: "Consider sharing this positive moment with someone close.".to_string(),
            icon: "🌟".to_string(),
            target_emotion: "joy".to_string(),
            confidence: 70.0,
            reason: "Sharing positive emotions amplifies them".to_string(),
            actions: vec![RecommendedAction::External {
                label: "Call a friend or family member".to_string(),
            }],
            priority: Priority::Medium,
            best_time: None,
        });
    }

    if context.recent_trend == EmotionalTrend::Declining {
        recommendations.push(Recommendation {
            id: "rec_habit_check".to_string(),
            category: RecommendationCategory::Habit,
            title: "Review your habits".to_string(),
            description:
                "Your emotional state has dipped lately. Reviewing your sleep, exercise, and \
                 nutrition logs can help."
                    .to_string(),
            icon: "📊".to_string(),
            target_emotion: emotion.to_string(),
            confidence: 68.0,
            reason: "Downward trend in emotional state".to_string(),
            actions: vec![
                RecommendedAction::Navigate {
                    label: "Open the habit dashboard".to_string(),
                    screen: Screen::Habits,
                },
                RecommendedAction::Navigate {
                    label: "Update your logs".to_string(),
                    screen: Screen::Habits,
                },
            ],
            priority: Priority::Medium,
            best_time: None,
        });
    }

    if context.time_of_day == Some(TimeOfDay::Night) && (emotion == "fear" || emotion == "anxiety")
    {
        recommendations.push(Recommendation {
            id: "rec_sleep_routine".to_string(),
            category: RecommendationCategory::SelfCare,
            title: "Prepare your sleep routine".to_string(),
            description: "Nighttime anxiety can interfere with rest. A calming routine helps."
                .to_string(),
            icon: "🌙".to_string(),
            target_emotion: emotion.to_string(),
            confidence: 82.0,
            reason: "Anxiety detected during night hours".to_string(),
            actions: vec![
                RecommendedAction::StartActivity {
                    label: "Guided meditation".to_string(),
                    activity: ActivityKind::Meditation,
                    duration_minutes: None,
                },
                RecommendedAction::External {
                    label: "Reduce screen time".to_string(),
                },
            ],
            priority: Priority::High,
            best_time: Some("before sleep".to_string()),
        });
    }

    recommendations.push(Recommendation {
        id: "rec_mindfulness".to_string(),
        category: RecommendationCategory::Meditation,
        title: "Mindfulness practice".to_string(),
        description: "Taking a few minutes to center yourself can improve mental clarity."
            .to_string(),
        icon: "🧘".to_string(),
        target_emotion: "neutral".to_string(),
        confidence: 65.0,
        reason: "Regular mindfulness practice improves overall wellbeing".to_string(),
        actions: vec![
            RecommendedAction::StartActivity {
                label: "3 minute breathing".to_string(),
                activity: ActivityKind::Breathing,
                duration_minutes: Some(3),
            },
            RecommendedAction::Navigate {
                label: "Zen mode".to_string(),
                screen: Screen::Zen,
            },
        ],
        priority: Priority::Low,
        best_time: None,
    });

    if let Some(prefs) = preferences {
        recommendations.retain(|rec| !prefs.disliked_suggestions.contains(&rec.id));
    }

    recommendations.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    recommendations
}

/// Fixed activity ideas for an emotion, with a generic fallback.
#[must_use]
pub fn activity_suggestions(emotion: &str) -> &'static [&'static str] {
    match emotion {
        "sadness" => &[
            "Go for a walk",
            "Call a friend",
            "Listen to music",
            "Look at happy photos",
        ],
        "anger" => &[
            "Intense exercise",
            "Free writing",
            "Deep breathing",
            "Take a cold shower",
        ],
        "fear" => &[
            "Talk to someone",
            "Write a worry list",
            "Use the 5-4-3-2-1 grounding technique",
            "Meditate",
        ],
        "joy" => &[
            "Share with others",
            "Create something",
            "Help someone",
            "Document the moment",
        ],
        "fatigue" => &[
            "Rest",
            "Take a short 20 minute nap",
            "Drink water",
            "Gentle stretching",
        ],
        _ => &["Drink water", "Breathe deeply", "Stretch"],
    }
}
