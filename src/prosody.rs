//! Voice prosody metrics and their emotional interpretation.
//!
//! The metrics record is the contract with the audio-capture layer. This
//! prototype ships a simulator that produces plausible values around a
//! speaker baseline; a signal-processing collaborator can supply real
//! records with the same shape. Interpretation is a fixed priority
//! cascade over the classified features, first matching rule wins.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Direction of the current pitch relative to the speaker baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchTrend {
    /// More than 10 Hz above baseline.
    Rising,
    /// More than 10 Hz below baseline.
    Falling,
    /// Within 10 Hz of baseline.
    Stable,
}

impl PitchTrend {
    /// Classifies a pitch sample against a baseline.
    #[must_use]
    pub fn classify(current: f64, baseline: f64) -> Self {
        if current > baseline + 10.0 {
            Self::Rising
        } else if current < baseline - 10.0 {
            Self::Falling
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for PitchTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// Coarse energy band of the voice signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyIntensity {
    /// At or below 50 dB.
    Low,
    /// Between 50 and 75 dB.
    Medium,
    /// Above 75 dB.
    High,
}

impl EnergyIntensity {
    /// Classifies an energy sample. Thresholds are absolute, not
    /// baseline-relative.
    #[must_use]
    pub fn classify(current: f64) -> Self {
        if current > 75.0 {
            Self::High
        } else if current > 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EnergyIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Speech rate relative to the speaker baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPace {
    /// Ratio below 0.8.
    Slow,
    /// Ratio in [0.8, 1.2].
    Normal,
    /// Ratio above 1.2.
    Fast,
}

impl SpeechPace {
    /// Classifies a rate ratio (actual over baseline).
    #[must_use]
    pub fn classify(ratio: f64) -> Self {
        if ratio > 1.2 {
            Self::Fast
        } else if ratio < 0.8 {
            Self::Slow
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for SpeechPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        };
        write!(f, "{s}")
    }
}

/// Interpretation of the silence proportion in the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseStyle {
    /// More than 30% silence.
    Thoughtful,
    /// Between 15% and 30% silence.
    Natural,
    /// At most 15% silence.
    Rushed,
}

impl PauseStyle {
    /// Classifies a pause ratio in [0, 1].
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value > 0.3 {
            Self::Thoughtful
        } else if value > 0.15 {
            Self::Natural
        } else {
            Self::Rushed
        }
    }
}

impl fmt::Display for PauseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Thoughtful => "thoughtful",
            Self::Natural => "natural",
            Self::Rushed => "rushed",
        };
        write!(f, "{s}")
    }
}

/// Pitch features of one voice sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchMetrics {
    /// Current fundamental frequency in Hz, rounded.
    pub current: f64,
    /// Speaker average in Hz.
    pub baseline: f64,
    /// Absolute deviation from baseline in Hz, rounded.
    pub variation: f64,
    /// Trend relative to baseline.
    pub trend: PitchTrend,
}

impl PitchMetrics {
    /// Builds the record from a raw sample. Classification runs on the
    /// unrounded sample; the stored values are rounded for display.
    #[must_use]
    pub fn from_sample(current: f64, baseline: f64) -> Self {
        Self {
            current: current.round(),
            baseline,
            variation: (current - baseline).abs().round(),
            trend: PitchTrend::classify(current, baseline),
        }
    }
}

/// Energy features of one voice sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyMetrics {
    /// Current level in normalized dB, rounded.
    pub current: f64,
    /// Speaker average.
    pub baseline: f64,
    /// Coarse band of the current level.
    pub intensity: EnergyIntensity,
}

impl EnergyMetrics {
    /// Builds the record from a raw sample.
    #[must_use]
    pub fn from_sample(current: f64, baseline: f64) -> Self {
        Self {
            current: current.round(),
            baseline,
            intensity: EnergyIntensity::classify(current),
        }
    }
}

/// Speech rate features of one voice sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechRateMetrics {
    /// Measured words per minute, rounded.
    pub words_per_minute: f64,
    /// Speaker average in words per minute.
    pub baseline: f64,
    /// Measured over baseline, rounded to two decimals.
    pub ratio: f64,
    /// Pace label for the ratio.
    pub interpretation: SpeechPace,
}

impl SpeechRateMetrics {
    /// Builds the record from a raw sample.
    #[must_use]
    pub fn from_sample(words_per_minute: f64, baseline: f64) -> Self {
        let ratio = words_per_minute / baseline;
        Self {
            words_per_minute: words_per_minute.round(),
            baseline,
            ratio: round2(ratio),
            interpretation: SpeechPace::classify(ratio),
        }
    }
}

/// Silence proportion of one voice sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauseMetrics {
    /// Proportion of silence in [0, 1], rounded to two decimals.
    pub value: f64,
    /// Pause label for the value.
    pub interpretation: PauseStyle,
}

impl PauseMetrics {
    /// Builds the record from a raw pause ratio.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            value: round2(value),
            interpretation: PauseStyle::classify(value),
        }
    }
}

/// Voice quality measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceQuality {
    /// Pitch perturbation as a percentage of the fundamental.
    pub jitter: f64,
    /// Amplitude perturbation percentage.
    pub shimmer: f64,
    /// Voice clarity in [0, 1].
    pub harmonic_ratio: f64,
}

/// Complete voice-metrics record for one recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProsodyMetrics {
    /// Pitch features.
    pub pitch: PitchMetrics,
    /// Energy features.
    pub energy: EnergyMetrics,
    /// Speech rate features.
    pub speech_rate: SpeechRateMetrics,
    /// Silence proportion.
    pub pause_ratio: PauseMetrics,
    /// Voice quality measurements.
    pub voice_quality: VoiceQuality,
}

/// Per-speaker reference values the simulator (and a future real
/// analyzer) centers its measurements on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProsodyBaseline {
    /// Average fundamental frequency in Hz.
    pub pitch_hz: f64,
    /// Average energy in normalized dB.
    pub energy: f64,
    /// Average speech rate.
    pub words_per_minute: f64,
}

impl Default for ProsodyBaseline {
    fn default() -> Self {
        Self {
            pitch_hz: 180.0,
            energy: 65.0,
            words_per_minute: 150.0,
        }
    }
}

/// Generates a simulated voice-metrics record around a baseline.
#[must_use]
pub fn simulate_prosody(baseline: ProsodyBaseline) -> ProsodyMetrics {
    simulate_prosody_with_rng(&mut rand::thread_rng(), baseline)
}

/// Generates a simulated voice-metrics record from a caller-supplied
/// random source, for deterministic tests and benchmarks.
///
/// Samples stay in fixed bands: pitch within 30 Hz of baseline, energy
/// within 15 dB, rate within 20 wpm, pauses up to 40% of the recording.
pub fn simulate_prosody_with_rng<R: Rng>(
    rng: &mut R,
    baseline: ProsodyBaseline,
) -> ProsodyMetrics {
    let pitch_current = baseline.pitch_hz + (rng.gen::<f64>() - 0.5) * 60.0;
    let energy_current = baseline.energy + (rng.gen::<f64>() - 0.5) * 30.0;
    let rate_current = baseline.words_per_minute + (rng.gen::<f64>() - 0.5) * 40.0;
    let pause_value = rng.gen::<f64>() * 0.4;

    ProsodyMetrics {
        pitch: PitchMetrics::from_sample(pitch_current, baseline.pitch_hz),
        energy: EnergyMetrics::from_sample(energy_current, baseline.energy),
        speech_rate: SpeechRateMetrics::from_sample(rate_current, baseline.words_per_minute),
        pause_ratio: PauseMetrics::from_value(pause_value),
        voice_quality: VoiceQuality {
            jitter: round2(rng.gen::<f64>() * 2.0),
            shimmer: round2(rng.gen::<f64>() * 5.0),
            harmonic_ratio: round2(0.7 + rng.gen::<f64>() * 0.3),
        },
    }
}

/// Emotion suggested by the prosody cascade, with its fixed confidence
/// and a human-readable rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodyReading {
    /// Suggested emotion; `None` when no rule matched (neutral).
    pub suggested: Option<Emotion>,

    /// Fixed confidence of the matched rule, 50 for neutral.
    pub confidence: f64,

    /// Rationale of the matched rule, empty for neutral.
    pub reasoning: String,
}

impl ProsodyReading {
    /// The suggestion as a label, `"neutral"` when no rule matched.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.suggested.map_or("neutral", |e| e.label())
    }
}

/// Maps a voice-metrics record to a suggested emotion.
///
/// The policy is a priority cascade; the first matching rule wins and
/// no scoring is involved. An unmatched record resolves to neutral.
///
/// # Examples
///
/// ```
/// use nostra_insight::{
///     interpret_prosody_emotion, simulate_prosody, ProsodyBaseline,
/// };
///
/// let metrics = simulate_prosody(ProsodyBaseline::default());
/// let reading = interpret_prosody_emotion(&metrics);
/// assert!((50.0..=75.0).contains(&reading.confidence));
/// ```
#[must_use]
pub fn interpret_prosody_emotion(metrics: &ProsodyMetrics) -> ProsodyReading {
    let (suggested, confidence, reasoning) = if metrics.pitch.trend == PitchTrend::Rising
        && metrics.energy.intensity == EnergyIntensity::High
    {
        if metrics.speech_rate.interpretation == SpeechPace::Fast {
            (
                Some(Emotion::Joy),
                75.0,
                "High pitch, high energy and fast speech suggest joy or enthusiasm",
            )
        } else {
            (
                Some(Emotion::Anger),
                70.0,
                "High pitch with high energy suggests anger or frustration",
            )
        }
    } else if metrics.pitch.trend == PitchTrend::Falling
        && metrics.energy.intensity == EnergyIntensity::Low
    {
        if metrics.pause_ratio.interpretation == PauseStyle::Thoughtful {
            (
                Some(Emotion::Sadness),
                72.0,
                "Low pitch, low energy and long pauses suggest sadness",
            )
        } else {
            (
                Some(Emotion::Fatigue),
                68.0,
                "Low pitch and low energy suggest fatigue or tiredness",
            )
        }
    } else if metrics.speech_rate.interpretation == SpeechPace::Fast
        && metrics.pause_ratio.value > 0.25
    {
        (
            Some(Emotion::Fear),
            65.0,
            "Fast speech with frequent pauses suggests nervousness or anxiety",
        )
    } else if metrics.pitch.variation > 30.0
        && metrics.energy.intensity == EnergyIntensity::Medium
    {
        (
            Some(Emotion::Surprise),
            60.0,
            "Pitch variations suggest surprise or amazement",
        )
    } else {
        (None, 50.0, "")
    };

    ProsodyReading {
        suggested,
        confidence,
        reasoning: reasoning.to_string(),
    }
}

/// Renders a short prose interpretation of the salient voice features,
/// clause per feature, joined with commas.
#[must_use]
pub fn describe_prosody(metrics: &ProsodyMetrics) -> String {
    let mut parts: Vec<&str> = Vec::new();

    match metrics.pitch.trend {
        PitchTrend::Rising => parts.push("rising pitch suggests excitement or enthusiasm"),
        PitchTrend::Falling => parts.push("falling pitch suggests calmness or sadness"),
        PitchTrend::Stable => {}
    }

    match metrics.energy.intensity {
        EnergyIntensity::High => parts.push("high energy indicates intense emotion"),
        EnergyIntensity::Low => parts.push("low energy suggests fatigue or calmness"),
        EnergyIntensity::Medium => {}
    }

    match metrics.speech_rate.interpretation {
        SpeechPace::Fast => parts.push("fast speech may indicate nervousness or enthusiasm"),
        SpeechPace::Slow => parts.push("slow speech suggests reflection or sadness"),
        SpeechPace::Normal => {}
    }

    parts.join(", ")
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
