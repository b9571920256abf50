//! Habit logs and habit/emotion correlation.
//!
//! Consumes two historical series an external tracker supplies: habit
//! entries and per-day emotion intensities. Everything here is
//! insufficient-data tolerant; below the minimum sample thresholds the
//! functions return `None` or an empty record, never an error.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Minimum aligned samples for a correlation result.
const MIN_CORRELATION_SAMPLES: usize = 3;

/// Minimum entries for pattern detection.
const MIN_PATTERN_ENTRIES: usize = 7;

/// Upper bound of the daily mood intensity scale.
pub(crate) const MAX_INTENSITY: f64 = 10.0;

/// A logged habit measurement: a number for quantitative habits, a flag
/// for did/didn't habits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitValue {
    /// Quantitative measurement (hours slept, kilometers run).
    Numeric(f64),
    /// Completion flag.
    Boolean(bool),
}

impl HabitValue {
    /// Numeric view; flags coerce to 0.0 / 1.0.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Numeric(value) => *value,
            Self::Boolean(true) => 1.0,
            Self::Boolean(false) => 0.0,
        }
    }
}

impl From<f64> for HabitValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<bool> for HabitValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// One immutable habit log record, appended by the tracking collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEntry {
    /// Unique record id.
    pub id: String,

    /// The habit this record belongs to.
    pub habit_id: String,

    /// Calendar day the measurement is for.
    pub date: NaiveDate,

    /// The measurement.
    pub value: HabitValue,

    /// Unit of a numeric measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the record was written.
    pub timestamp: DateTime<Utc>,
}

impl HabitEntry {
    /// Creates a record dated `date` with a fresh id, stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHabitId`] for a blank habit id and
    /// [`ValidationError::NonFiniteHabitValue`] for a NaN or infinite
    /// measurement.
    pub fn new(
        habit_id: impl Into<String>,
        date: NaiveDate,
        value: impl Into<HabitValue>,
    ) -> Result<Self, ValidationError> {
        let habit_id = habit_id.into();
        if habit_id.trim().is_empty() {
            return Err(ValidationError::EmptyHabitId);
        }
        let value = value.into();
        if !value.as_f64().is_finite() {
            return Err(ValidationError::NonFiniteHabitValue {
                value: value.as_f64(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            habit_id,
            date,
            value,
            unit: None,
            notes: None,
            timestamp: Utc::now(),
        })
    }

    /// Sets the measurement unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Category of a tracked habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    /// Sleep tracking.
    Sleep,
    /// Physical exercise.
    Exercise,
    /// Meditation and similar practices.
    Mindfulness,
    /// Diet and hydration.
    Nutrition,
    /// Social contact.
    Social,
    /// User-defined.
    Custom,
}

/// How a habit is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitDataType {
    /// Continuous measurements.
    Numeric,
    /// Did/didn't flags.
    Boolean,
    /// Fixed choice sets.
    Categorical,
}

/// Cadence of a habit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFrequency {
    /// Target applies per day.
    Daily,
    /// Target applies per week.
    Weekly,
}

/// A goal attached to a habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitTarget {
    /// Target value.
    pub value: f64,

    /// Unit the target is expressed in.
    pub unit: String,

    /// Cadence the target applies at.
    pub frequency: TargetFrequency,
}

/// A habit the user tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDefinition {
    /// Stable identifier, referenced by entries and correlations.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category.
    pub category: HabitCategory,

    /// How the habit is measured.
    pub data_type: HabitDataType,

    /// Optional goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<HabitTarget>,

    /// Display color.
    pub color: String,

    /// Display icon.
    pub icon: String,
}

impl HabitDefinition {
    /// Creates a definition with the default color and icon.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHabitId`] for a blank id.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: HabitCategory,
        data_type: HabitDataType,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyHabitId);
        }
        Ok(Self {
            id,
            name: name.into(),
            category,
            data_type,
            target: None,
            color: "#6366F1".to_string(),
            icon: "📊".to_string(),
        })
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the display icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Attaches a goal.
    #[must_use]
    pub fn with_target(mut self, target: HabitTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// One day's recorded intensity for one emotion, on the 0-10 mood scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionObservation {
    /// Calendar day of the observation.
    pub date: NaiveDate,

    /// Emotion label; composite labels (hope, anxiety) are valid.
    pub emotion: String,

    /// Intensity in [0, 10].
    pub intensity: f64,
}

impl EmotionObservation {
    /// Creates an observation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEmotionLabel`] for a blank label
    /// and [`ValidationError::IntensityOutOfRange`] when the intensity
    /// leaves [0, 10].
    pub fn new(
        date: NaiveDate,
        emotion: impl Into<String>,
        intensity: f64,
    ) -> Result<Self, ValidationError> {
        let emotion = emotion.into();
        if emotion.trim().is_empty() {
            return Err(ValidationError::EmptyEmotionLabel);
        }
        if !intensity.is_finite() || !(0.0..=MAX_INTENSITY).contains(&intensity) {
            return Err(ValidationError::IntensityOutOfRange { value: intensity });
        }
        Ok(Self {
            date,
            emotion,
            intensity,
        })
    }
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns 0 for mismatched lengths, empty input, or zero variance in
/// either series; division by zero never occurs.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(xi, yi)| xi * yi).sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_y2: f64 = y.iter().map(|yi| yi * yi).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let variance_product = (n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y);
    if variance_product <= 0.0 {
        return 0.0;
    }

    numerator / variance_product.sqrt()
}

/// Strength band of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    /// |r| at most 0.3.
    Weak,
    /// |r| above 0.3.
    Moderate,
    /// |r| above 0.6.
    Strong,
}

impl CorrelationStrength {
    /// Bands a coefficient by absolute value.
    #[must_use]
    pub fn from_coefficient(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.6 {
            Self::Strong
        } else if abs > 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        };
        write!(f, "{s}")
    }
}

/// Sign of a correlation coefficient. Zero counts as negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    /// r above 0.
    Positive,
    /// r at or below 0.
    Negative,
}

impl CorrelationDirection {
    /// Signs a coefficient.
    #[must_use]
    pub fn from_coefficient(r: f64) -> Self {
        if r > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        };
        write!(f, "{s}")
    }
}

/// Correlation between one habit and one emotion over aligned days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEmotionCorrelation {
    /// The habit.
    pub habit_id: String,

    /// The emotion label.
    pub emotion: String,

    /// Pearson coefficient in [-1, 1], rounded to two decimals.
    pub correlation: f64,

    /// Strength band.
    pub strength: CorrelationStrength,

    /// Sign of the relation.
    pub direction: CorrelationDirection,

    /// Number of aligned (same-day) samples.
    pub samples: usize,

    /// Prose summary of the relation.
    pub interpretation: String,
}

/// Correlates one habit's entries with one emotion's daily intensities.
///
/// Entries for other habits are ignored. Each remaining entry joins the
/// first observation on the same calendar day carrying the target
/// emotion; fewer than 3 aligned pairs yield `None`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use nostra_insight::{
///     analyze_habit_emotion_correlation, EmotionObservation, HabitEntry,
/// };
///
/// let day = |d| NaiveDate::from_ymd_opt(2026, 8, d).unwrap();
/// let entries: Vec<HabitEntry> = (1..=3)
///     .map(|d| HabitEntry::new("sleep", day(d), f64::from(d) + 5.0).unwrap())
///     .collect();
/// let observations: Vec<EmotionObservation> = (1..=3)
///     .map(|d| EmotionObservation::new(day(d), "joy", f64::from(d) * 2.0).unwrap())
///     .collect();
///
/// let result =
///     analyze_habit_emotion_correlation(&entries, &observations, "sleep", "joy")
///         .expect("three aligned samples");
/// assert_eq!(result.samples, 3);
/// assert!(result.correlation > 0.9);
/// ```
#[must_use]
pub fn analyze_habit_emotion_correlation(
    habit_entries: &[HabitEntry],
    observations: &[EmotionObservation],
    habit_id: &str,
    target_emotion: &str,
) -> Option<HabitEmotionCorrelation> {
    let mut habit_values: Vec<f64> = Vec::new();
    let mut emotion_values: Vec<f64> = Vec::new();

    for entry in habit_entries.iter().filter(|e| e.habit_id == habit_id) {
        let same_day = observations
            .iter()
            .find(|obs| obs.date == entry.date && obs.emotion == target_emotion);
        if let Some(observation) = same_day {
            habit_values.push(entry.value.as_f64());
            emotion_values.push(observation.intensity);
        }
    }

    if habit_values.len() < MIN_CORRELATION_SAMPLES {
        return None;
    }

    let r = correlation(&habit_values, &emotion_values);
    let strength = CorrelationStrength::from_coefficient(r);
    let direction = CorrelationDirection::from_coefficient(r);

    let interpretation = match (direction, strength) {
        (CorrelationDirection::Positive, s) if s != CorrelationStrength::Weak => {
            format!("More {habit_id} is associated with higher {target_emotion}")
        }
        (CorrelationDirection::Negative, s) if s != CorrelationStrength::Weak => {
            format!("More {habit_id} is associated with lower {target_emotion}")
        }
        _ => format!("No significant correlation between {habit_id} and {target_emotion}"),
    };

    Some(HabitEmotionCorrelation {
        habit_id: habit_id.to_string(),
        emotion: target_emotion.to_string(),
        correlation: round2(r),
        strength,
        direction,
        samples: habit_values.len(),
        interpretation,
    })
}

/// Direction of a habit series over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitTrend {
    /// Second half averages more than 10% above the first.
    Increasing,
    /// Second half averages more than 10% below the first.
    Decreasing,
    /// Within 10% either way.
    Stable,
}

impl fmt::Display for HabitTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// Patterns detected over one habit's entry history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitPatterns {
    /// Most common logging weekday, when one weekday dominates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_pattern: Option<String>,

    /// Overall direction of the series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<HabitTrend>,

    /// Share of days in the covered span with at least one entry, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<f64>,
}

/// Detects trend, consistency, and weekday patterns in a habit history.
///
/// Needs at least 7 entries; below that every field stays `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn detect_habit_patterns(entries: &[HabitEntry]) -> HabitPatterns {
    if entries.len() < MIN_PATTERN_ENTRIES {
        return HabitPatterns::default();
    }

    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.date);

    let values: Vec<f64> = sorted.iter().map(|e| e.value.as_f64()).collect();
    let half = values.len() / 2;
    let first_avg = mean(&values[..half]);
    let second_avg = mean(&values[half..]);

    let trend = if second_avg > first_avg * 1.1 {
        HabitTrend::Increasing
    } else if second_avg < first_avg * 0.9 {
        HabitTrend::Decreasing
    } else {
        HabitTrend::Stable
    };

    let span_days = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (last.date - first.date).num_days() + 1,
        _ => return HabitPatterns::default(),
    };
    let days_covered = sorted
        .iter()
        .map(|e| e.date)
        .collect::<HashSet<NaiveDate>>()
        .len();
    let consistency = (days_covered as f64 / span_days as f64 * 100.0).round();

    HabitPatterns {
        weekly_pattern: modal_weekday(&sorted),
        trend: Some(trend),
        consistency: Some(consistency),
    }
}

fn modal_weekday(entries: &[HabitEntry]) -> Option<String> {
    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let counts: Vec<(Weekday, usize)> = WEEKDAYS
        .iter()
        .map(|&weekday| {
            let count = entries.iter().filter(|e| e.date.weekday() == weekday).count();
            (weekday, count)
        })
        .collect();

    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max == 0 {
        return None;
    }
    let modal: Vec<Weekday> = counts
        .iter()
        .filter(|(_, c)| *c == max)
        .map(|(weekday, _)| *weekday)
        .collect();

    match modal.as_slice() {
        [only] => Some(weekday_name(*only).to_string()),
        _ => None,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn entry(habit_id: &str, d: u32, value: impl Into<HabitValue>) -> HabitEntry {
        HabitEntry::new(habit_id, day(d), value).unwrap()
    }

    fn obs(d: u32, emotion: &str, intensity: f64) -> EmotionObservation {
        EmotionObservation::new(day(d), emotion, intensity).unwrap()
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let r = correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_perfect_negative() {
        let r = correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance_guard() {
        let r = correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(r.abs() < f64::EPSILON);
    }

    #[test]
    fn test_correlation_degenerate_inputs() {
        assert!(correlation(&[], &[]).abs() < f64::EPSILON);
        assert!(correlation(&[1.0, 2.0], &[1.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strength_and_direction_bands() {
        assert_eq!(
            CorrelationStrength::from_coefficient(0.61),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.6),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(-0.7),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.3),
            CorrelationStrength::Weak
        );
        assert_eq!(
            CorrelationDirection::from_coefficient(0.1),
            CorrelationDirection::Positive
        );
        // Zero signs as negative.
        assert_eq!(
            CorrelationDirection::from_coefficient(0.0),
            CorrelationDirection::Negative
        );
    }

    #[test]
    fn test_analyze_needs_three_aligned_samples() {
        let entries = vec![entry("sleep", 1, 6.0), entry("sleep", 2, 7.0)];
        let observations = vec![obs(1, "joy", 5.0), obs(2, "joy", 6.0)];
        assert!(
            analyze_habit_emotion_correlation(&entries, &observations, "sleep", "joy").is_none()
        );

        let entries = vec![
            entry("sleep", 1, 6.0),
            entry("sleep", 2, 7.0),
            entry("sleep", 3, 8.0),
        ];
        let observations = vec![obs(1, "joy", 4.0), obs(2, "joy", 6.0), obs(3, "joy", 8.0)];
        let result =
            analyze_habit_emotion_correlation(&entries, &observations, "sleep", "joy")
                .expect("boundary case");
        assert_eq!(result.samples, 3);
        assert!((result.correlation - 1.0).abs() < 1e-9);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Positive);
    }

    #[test]
    fn test_analyze_filters_by_habit_and_emotion() {
        let entries = vec![
            entry("sleep", 1, 6.0),
            entry("exercise", 1, 1.0),
            entry("sleep", 2, 7.0),
            entry("exercise", 2, 0.0),
            entry("sleep", 3, 8.0),
        ];
        let observations = vec![
            obs(1, "joy", 4.0),
            obs(1, "sadness", 8.0),
            obs(2, "joy", 6.0),
            obs(3, "joy", 8.0),
        ];
        let result =
            analyze_habit_emotion_correlation(&entries, &observations, "sleep", "joy")
                .expect("aligned sleep/joy series");
        assert_eq!(result.samples, 3);
        assert_eq!(result.habit_id, "sleep");
        assert_eq!(result.emotion, "joy");

        // Only two exercise entries align, below the minimum.
        assert!(
            analyze_habit_emotion_correlation(&entries, &observations, "exercise", "joy")
                .is_none()
        );
    }

    #[test]
    fn test_analyze_coerces_boolean_values() {
        let entries = vec![
            entry("meditation", 1, true),
            entry("meditation", 2, false),
            entry("meditation", 3, true),
            entry("meditation", 4, false),
        ];
        let observations = vec![
            obs(1, "joy", 8.0),
            obs(2, "joy", 2.0),
            obs(3, "joy", 9.0),
            obs(4, "joy", 3.0),
        ];
        let result =
            analyze_habit_emotion_correlation(&entries, &observations, "meditation", "joy")
                .expect("aligned series");
        assert_eq!(result.direction, CorrelationDirection::Positive);
        assert_eq!(result.strength, CorrelationStrength::Strong);
    }

    #[test]
    fn test_analyze_interpretation_text() {
        let positive = vec![
            entry("sleep", 1, 5.0),
            entry("sleep", 2, 6.0),
            entry("sleep", 3, 7.0),
        ];
        let rising = vec![obs(1, "joy", 3.0), obs(2, "joy", 5.0), obs(3, "joy", 7.0)];
        let result = analyze_habit_emotion_correlation(&positive, &rising, "sleep", "joy")
            .expect("positive series");
        assert_eq!(
            result.interpretation,
            "More sleep is associated with higher joy"
        );

        let falling = vec![obs(1, "joy", 7.0), obs(2, "joy", 5.0), obs(3, "joy", 3.0)];
        let result = analyze_habit_emotion_correlation(&positive, &falling, "sleep", "joy")
            .expect("negative series");
        assert_eq!(
            result.interpretation,
            "More sleep is associated with lower joy"
        );

        let flat = vec![obs(1, "joy", 5.0), obs(2, "joy", 5.0), obs(3, "joy", 5.0)];
        let result = analyze_habit_emotion_correlation(&positive, &flat, "sleep", "joy")
            .expect("flat series");
        assert_eq!(
            result.interpretation,
            "No significant correlation between sleep and joy"
        );
    }

    #[test]
    fn test_patterns_below_minimum() {
        let entries: Vec<HabitEntry> = (1..=6).map(|d| entry("sleep", d, 7.0)).collect();
        let patterns = detect_habit_patterns(&entries);
        assert_eq!(patterns, HabitPatterns::default());
    }

    #[test]
    fn test_patterns_increasing_trend() {
        let entries: Vec<HabitEntry> =
            (1..=8).map(|d| entry("sleep", d, f64::from(d))).collect();
        let patterns = detect_habit_patterns(&entries);
        assert_eq!(patterns.trend, Some(HabitTrend::Increasing));
        assert_eq!(patterns.consistency, Some(100.0));
    }

    #[test]
    fn test_patterns_decreasing_and_stable() {
        let entries: Vec<HabitEntry> = (1..=8)
            .map(|d| entry("sleep", d, f64::from(9 - d)))
            .collect();
        assert_eq!(
            detect_habit_patterns(&entries).trend,
            Some(HabitTrend::Decreasing)
        );

        let entries: Vec<HabitEntry> = (1..=8).map(|d| entry("sleep", d, 7.0)).collect();
        assert_eq!(
            detect_habit_patterns(&entries).trend,
            Some(HabitTrend::Stable)
        );
    }

    #[test]
    fn test_patterns_consistency_with_gaps() {
        // Seven entries over a fourteen-day span.
        let days = [1, 2, 3, 4, 5, 6, 14];
        let entries: Vec<HabitEntry> =
            days.iter().map(|&d| entry("sleep", d, 7.0)).collect();
        let patterns = detect_habit_patterns(&entries);
        assert_eq!(patterns.consistency, Some(50.0));
    }

    #[test]
    fn test_patterns_modal_weekday() {
        // 2026-08-03, -10, -17 are Mondays.
        let days = [3, 10, 17, 4, 5, 6, 7];
        let entries: Vec<HabitEntry> =
            days.iter().map(|&d| entry("sleep", d, 7.0)).collect();
        let patterns = detect_habit_patterns(&entries);
        assert_eq!(patterns.weekly_pattern, Some("Monday".to_string()));

        // Seven consecutive days tie every weekday; no unique mode.
        let entries: Vec<HabitEntry> = (1..=7).map(|d| entry("sleep", d, 7.0)).collect();
        assert_eq!(detect_habit_patterns(&entries).weekly_pattern, None);
    }

    #[test]
    fn test_entry_validation() {
        assert!(matches!(
            HabitEntry::new("", day(1), 5.0),
            Err(ValidationError::EmptyHabitId)
        ));
        assert!(matches!(
            HabitEntry::new("sleep", day(1), f64::NAN),
            Err(ValidationError::NonFiniteHabitValue { .. })
        ));
        let entry = HabitEntry::new("sleep", day(1), 7.5)
            .unwrap()
            .with_unit("hours")
            .with_notes("slept early");
        assert_eq!(entry.unit.as_deref(), Some("hours"));
        assert!((entry.value.as_f64() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_observation_validation() {
        assert!(matches!(
            EmotionObservation::new(day(1), "", 5.0),
            Err(ValidationError::EmptyEmotionLabel)
        ));
        assert!(matches!(
            EmotionObservation::new(day(1), "joy", 11.0),
            Err(ValidationError::IntensityOutOfRange { .. })
        ));
        assert!(EmotionObservation::new(day(1), "joy", 10.0).is_ok());
        assert!(EmotionObservation::new(day(1), "hope", 0.0).is_ok());
    }

    #[test]
    fn test_definition_defaults_and_builders() {
        let habit = HabitDefinition::new(
            "sleep",
            "Sleep",
            HabitCategory::Sleep,
            HabitDataType::Numeric,
        )
        .unwrap();
        assert_eq!(habit.color, "#6366F1");
        assert_eq!(habit.icon, "📊");
        assert!(habit.target.is_none());

        let habit = habit.with_color("#10B981").with_icon("😴").with_target(HabitTarget {
            value: 8.0,
            unit: "hours".to_string(),
            frequency: TargetFrequency::Daily,
        });
        assert_eq!(habit.color, "#10B981");
        assert_eq!(habit.target.map(|t| t.frequency), Some(TargetFrequency::Daily));
    }

    #[test]
    fn test_habit_value_serialization() {
        let json = serde_json::to_string(&HabitValue::Numeric(7.5)).unwrap();
        assert_eq!(json, "7.5");
        let json = serde_json::to_string(&HabitValue::Boolean(true)).unwrap();
        assert_eq!(json, "true");
        let back: HabitValue = serde_json::from_str("false").unwrap();
        assert_eq!(back, HabitValue::Boolean(false));
        let back: HabitValue = serde_json::from_str("3.25").unwrap();
        assert_eq!(back, HabitValue::Numeric(3.25));
    }
}
