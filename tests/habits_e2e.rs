use chrono::NaiveDate;

use nostra_insight::{
    analyze_habit_emotion_correlation, detect_habit_patterns, recommend_for_context,
    recommend_from_correlations, CorrelationDirection, CorrelationStrength, EmotionObservation,
    EmotionalContext, EmotionalTrend, HabitCategory, HabitDataType, HabitDefinition, HabitEntry,
    HabitRecommendationKind, HabitTrend, Priority, UserPreferences,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn sleep_joy_pipeline() {
    // 1. Ten days of sleep logs with joy rising in step.
    let entries: Vec<HabitEntry> = (1..=10)
        .map(|d| HabitEntry::new("sleep", day(d), 5.0 + f64::from(d) * 0.2).unwrap())
        .collect();
    let observations: Vec<EmotionObservation> = (1..=10)
        .map(|d| EmotionObservation::new(day(d), "joy", 4.0 + f64::from(d) * 0.3).unwrap())
        .collect();

    // 2. The correlation is perfect, strong, and positive.
    let correlation =
        analyze_habit_emotion_correlation(&entries, &observations, "sleep", "joy").unwrap();
    assert_eq!(correlation.samples, 10);
    assert!((correlation.correlation - 1.0).abs() < 1e-9);
    assert_eq!(correlation.strength, CorrelationStrength::Strong);
    assert_eq!(correlation.direction, CorrelationDirection::Positive);
    assert_eq!(
        correlation.interpretation,
        "More sleep is associated with higher joy"
    );

    // 3. The recommendation engine turns it into a boost.
    let habits = vec![HabitDefinition::new(
        "sleep",
        "Sleep",
        HabitCategory::Sleep,
        HabitDataType::Numeric,
    )
    .unwrap()];
    let recommendations = recommend_from_correlations(&[correlation], &habits);
    assert_eq!(recommendations.len(), 1);
    let rec = &recommendations[0];
    assert_eq!(rec.id, "rec_sleep_joy");
    assert_eq!(rec.kind, HabitRecommendationKind::Boost);
    assert_eq!(rec.priority, Priority::High);
    assert_eq!(rec.title, "Increase Sleep to improve your joy");
    assert!((rec.impact.estimated_emotion_change - 30.0).abs() < f64::EPSILON);
    assert_eq!(rec.evidence, 10);

    // 4. Patterns over the same history.
    let patterns = detect_habit_patterns(&entries);
    assert_eq!(patterns.trend, Some(HabitTrend::Increasing));
    assert_eq!(patterns.consistency, Some(100.0));
    // Ten consecutive days leave several weekdays tied.
    assert_eq!(patterns.weekly_pattern, None);
}

#[test]
fn exercise_pushes_sadness_down() {
    let entries: Vec<HabitEntry> = (1..=8)
        .map(|d| HabitEntry::new("exercise", day(d), f64::from(d)).unwrap())
        .collect();
    let observations: Vec<EmotionObservation> = (1..=8)
        .map(|d| EmotionObservation::new(day(d), "sadness", 9.0 - f64::from(d) * 0.5).unwrap())
        .collect();

    let correlation =
        analyze_habit_emotion_correlation(&entries, &observations, "exercise", "sadness").unwrap();
    assert!((correlation.correlation + 1.0).abs() < 1e-9);
    assert_eq!(correlation.direction, CorrelationDirection::Negative);
    assert_eq!(
        correlation.interpretation,
        "More exercise is associated with lower sadness"
    );

    let habits = vec![HabitDefinition::new(
        "exercise",
        "Exercise",
        HabitCategory::Exercise,
        HabitDataType::Numeric,
    )
    .unwrap()];
    let recommendations = recommend_from_correlations(&[correlation], &habits);
    assert_eq!(recommendations[0].kind, HabitRecommendationKind::Boost);
    assert_eq!(
        recommendations[0].title,
        "Increase Exercise to reduce sadness"
    );
}

#[test]
fn sparse_overlap_yields_no_correlation() {
    // Habit logged on days with no matching emotion observations.
    let entries: Vec<HabitEntry> = (1..=5)
        .map(|d| HabitEntry::new("reading", day(d), 1.0).unwrap())
        .collect();
    let observations = vec![
        EmotionObservation::new(day(10), "joy", 5.0).unwrap(),
        EmotionObservation::new(day(1), "sadness", 5.0).unwrap(),
        EmotionObservation::new(day(2), "joy", 5.0).unwrap(),
    ];

    assert!(
        analyze_habit_emotion_correlation(&entries, &observations, "reading", "joy").is_none()
    );
}

#[test]
fn weak_evidence_is_not_recommended() {
    // Flat joy produces a zero correlation over plenty of samples.
    let entries: Vec<HabitEntry> = (1..=9)
        .map(|d| HabitEntry::new("cooking", day(d), f64::from(d)).unwrap())
        .collect();
    let observations: Vec<EmotionObservation> = (1..=9)
        .map(|d| EmotionObservation::new(day(d), "joy", 5.0).unwrap())
        .collect();

    let correlation =
        analyze_habit_emotion_correlation(&entries, &observations, "cooking", "joy").unwrap();
    assert_eq!(correlation.strength, CorrelationStrength::Weak);
    assert_eq!(
        correlation.interpretation,
        "No significant correlation between cooking and joy"
    );

    let habits = vec![HabitDefinition::new(
        "cooking",
        "Cooking",
        HabitCategory::Nutrition,
        HabitDataType::Numeric,
    )
    .unwrap()];
    assert!(recommend_from_correlations(&[correlation], &habits).is_empty());
}

#[test]
fn context_rules_complement_correlations() {
    let context = EmotionalContext::new("sadness", 8.0)
        .unwrap()
        .with_trend(EmotionalTrend::Declining);
    let prefs = UserPreferences {
        favorite_activities: Vec::new(),
        disliked_suggestions: vec!["rec_exercise".to_string()],
    };

    let recommendations = recommend_for_context(&context, Some(&prefs));
    let ids: Vec<&str> = recommendations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["rec_social_support", "rec_habit_check", "rec_mindfulness"]
    );

    // Priorities fall monotonically down the list.
    for pair in recommendations.windows(2) {
        assert!(pair[0].priority.rank() >= pair[1].priority.rank());
    }
}
