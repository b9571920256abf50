//! Emotion vocabulary and derived labels.
//!
//! The analysis core works over a closed set of seven primitive emotions.
//! Composite emotions (nostalgia, hope, anxiety) are derived from pairs of
//! co-occurring primitive scores and only exist as classifier output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of primitive emotions the classifier scores.
///
/// The declaration order is significant: it is the tie-break order when
/// picking a primary emotion and the scan order for keyword matching.
///
/// # Examples
///
/// ```
/// use nostra_insight::Emotion;
///
/// assert_eq!(Emotion::ALL.len(), 7);
/// assert_eq!(Emotion::Joy.label(), "joy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Positive, energized affect
    Joy,
    /// Low, grieving affect
    Sadness,
    /// Hostile, frustrated affect
    Anger,
    /// Threat-oriented affect
    Fear,
    /// Reaction to the unexpected
    Surprise,
    /// Depleted, low-energy state
    Fatigue,
    /// Aversive, repulsed affect
    Disgust,
}

impl Emotion {
    /// All primitive emotions in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Surprise,
        Self::Fatigue,
        Self::Disgust,
    ];

    /// Returns the lowercase label for this emotion.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Fatigue => "fatigue",
            Self::Disgust => "disgust",
        }
    }

    /// Parses a lowercase label back into an emotion.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }

    /// Returns the canonical valence for this emotion, in [-1, 1].
    #[must_use]
    pub const fn valence(&self) -> f64 {
        match self {
            Self::Joy => 1.0,
            Self::Sadness => -0.8,
            Self::Anger => -0.6,
            Self::Fear => -0.7,
            Self::Surprise => 0.3,
            Self::Fatigue => -0.4,
            Self::Disgust => -0.5,
        }
    }

    /// Returns the display emoji for this emotion.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Joy => "😊",
            Self::Sadness => "😢",
            Self::Anger => "😠",
            Self::Fear => "😨",
            Self::Surprise => "😲",
            Self::Fatigue => "😴",
            Self::Disgust => "🤢",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Derived emotion labels computed from pairs of primitive scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    /// Sadness co-occurring with surprise
    Nostalgia,
    /// Joy co-occurring with surprise
    Hope,
    /// Fear co-occurring with surprise
    Anxiety,
}

impl CompositeKind {
    /// All composite kinds in detection order.
    pub const ALL: [Self; 3] = [Self::Nostalgia, Self::Hope, Self::Anxiety];

    /// Returns the lowercase label for this composite.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Nostalgia => "nostalgia",
            Self::Hope => "hope",
            Self::Anxiety => "anxiety",
        }
    }

    /// Returns the two primitive emotions this composite derives from.
    #[must_use]
    pub const fn components(&self) -> (Emotion, Emotion) {
        match self {
            Self::Nostalgia => (Emotion::Sadness, Emotion::Surprise),
            Self::Hope => (Emotion::Joy, Emotion::Surprise),
            Self::Anxiety => (Emotion::Fear, Emotion::Surprise),
        }
    }

    /// Returns the canonical valence for this composite, in [-1, 1].
    #[must_use]
    pub const fn valence(&self) -> f64 {
        match self {
            Self::Nostalgia => 0.0,
            Self::Hope => 0.8,
            Self::Anxiety => -0.6,
        }
    }

    /// Returns the display emoji for this composite.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Nostalgia => "🥺",
            Self::Hope => "🌟",
            Self::Anxiety => "😰",
        }
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A detected composite emotion with its component pair and intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEmotion {
    /// Which composite was detected.
    #[serde(rename = "emotion")]
    pub kind: CompositeKind,

    /// The two primitive emotions it derives from.
    pub components: [Emotion; 2],

    /// Average of the two component scores, rounded.
    pub intensity: f64,
}

impl CompositeEmotion {
    /// Creates a composite emotion record from its kind and intensity.
    #[must_use]
    pub fn new(kind: CompositeKind, intensity: f64) -> Self {
        let (a, b) = kind.components();
        Self {
            kind,
            components: [a, b],
            intensity,
        }
    }
}

/// Overall sentiment label derived from emotional valence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// Valence above +0.2
    Positive,
    /// Valence below -0.2
    Negative,
    /// Valence within [-0.2, +0.2]
    Neutral,
}

impl Sentiment {
    /// Classifies a valence value in [-1, 1] into a sentiment label.
    ///
    /// # Examples
    ///
    /// ```
    /// use nostra_insight::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_valence(0.5), Sentiment::Positive);
    /// assert_eq!(Sentiment::from_valence(-0.5), Sentiment::Negative);
    /// assert_eq!(Sentiment::from_valence(0.1), Sentiment::Neutral);
    /// ```
    #[must_use]
    pub fn from_valence(valence: f64) -> Self {
        if valence > 0.2 {
            Self::Positive
        } else if valence < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Looks up the canonical valence for any emotion label.
///
/// Covers both primitive and composite labels; unknown labels map to 0.
#[must_use]
pub fn valence_for_label(label: &str) -> f64 {
    let normalized = label.to_lowercase();
    if let Some(emotion) = Emotion::from_label(&normalized) {
        return emotion.valence();
    }
    CompositeKind::ALL
        .into_iter()
        .find(|c| c.label() == normalized)
        .map_or(0.0, |c| c.valence())
}

/// Looks up the display emoji for any emotion label.
///
/// Covers both primitive and composite labels; unknown labels map to a
/// question mark.
#[must_use]
pub fn emoji_for_label(label: &str) -> &'static str {
    let normalized = label.to_lowercase();
    if let Some(emotion) = Emotion::from_label(&normalized) {
        return emotion.emoji();
    }
    CompositeKind::ALL
        .into_iter()
        .find(|c| c.label() == normalized)
        .map_or("❓", |c| c.emoji())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_labels_roundtrip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
        assert_eq!(Emotion::from_label("boredom"), None);
    }

    #[test]
    fn test_emotion_order() {
        assert_eq!(Emotion::ALL[0], Emotion::Joy);
        assert_eq!(Emotion::ALL[6], Emotion::Disgust);
    }

    #[test]
    fn test_emotion_valence_range() {
        for emotion in Emotion::ALL {
            let v = emotion.valence();
            assert!((-1.0..=1.0).contains(&v), "{emotion} valence {v}");
        }
        assert!((Emotion::Joy.valence() - 1.0).abs() < f64::EPSILON);
        assert!((Emotion::Sadness.valence() + 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_composite_components() {
        assert_eq!(
            CompositeKind::Nostalgia.components(),
            (Emotion::Sadness, Emotion::Surprise)
        );
        assert_eq!(
            CompositeKind::Hope.components(),
            (Emotion::Joy, Emotion::Surprise)
        );
        assert_eq!(
            CompositeKind::Anxiety.components(),
            (Emotion::Fear, Emotion::Surprise)
        );
    }

    #[test]
    fn test_composite_emotion_new() {
        let composite = CompositeEmotion::new(CompositeKind::Hope, 2.0);
        assert_eq!(composite.components, [Emotion::Joy, Emotion::Surprise]);
        assert!((composite.intensity - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentiment_thresholds() {
        assert_eq!(Sentiment::from_valence(0.21), Sentiment::Positive);
        assert_eq!(Sentiment::from_valence(0.2), Sentiment::Neutral);
        assert_eq!(Sentiment::from_valence(-0.2), Sentiment::Neutral);
        assert_eq!(Sentiment::from_valence(-0.21), Sentiment::Negative);
        assert_eq!(Sentiment::from_valence(0.0), Sentiment::Neutral);
    }

    #[test]
    fn test_valence_for_label() {
        assert!((valence_for_label("joy") - 1.0).abs() < f64::EPSILON);
        assert!((valence_for_label("Hope") - 0.8).abs() < f64::EPSILON);
        assert!((valence_for_label("anxiety") + 0.6).abs() < f64::EPSILON);
        assert!((valence_for_label("unknown")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_emoji_for_label() {
        assert_eq!(emoji_for_label("joy"), "😊");
        assert_eq!(emoji_for_label("nostalgia"), "🥺");
        assert_eq!(emoji_for_label("JOY"), "😊");
        assert_eq!(emoji_for_label("unknown"), "❓");
    }

    #[test]
    fn test_emotion_serialization() {
        let json = serde_json::to_string(&Emotion::Fatigue).unwrap();
        assert_eq!(json, "\"fatigue\"");
        let back: Emotion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Emotion::Fatigue);
    }

    #[test]
    fn test_composite_serialization() {
        let composite = CompositeEmotion::new(CompositeKind::Anxiety, 1.0);
        let json = serde_json::to_string(&composite).unwrap();
        assert!(json.contains("\"emotion\":\"anxiety\""));
        assert!(json.contains("\"components\":[\"fear\",\"surprise\"]"));
    }
}
