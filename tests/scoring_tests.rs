//! Integration tests for risk scoring and classification.
//!
//! Tests validate:
//! - Threshold boundaries belong to the upper tier
//! - Each variant carries its own weights and thresholds
//! - Scoring overrides replace the variant defaults
//! - Dominant pathway selection and explanation fallback

use liver_simulator_x::{
    classify, dominant_pathway, explain_pathway, score, scoring::GENERIC_EXPLANATION,
    ConfigurationError, LiverState, ModelVariant, RiskThresholds, RiskTier, ScoreWeights,
    VariantRegistry,
};

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_threshold_boundaries_standard() {
    let thresholds = RiskThresholds::STANDARD;

    assert_eq!(classify(0.0, &thresholds), RiskTier::Low);
    assert_eq!(classify(0.599_999, &thresholds), RiskTier::Low);
    assert_eq!(classify(0.6, &thresholds), RiskTier::Moderate);
    assert_eq!(classify(1.499_999, &thresholds), RiskTier::Moderate);
    assert_eq!(classify(1.5, &thresholds), RiskTier::High);
    assert_eq!(classify(1e6, &thresholds), RiskTier::High);
}

#[test]
fn test_threshold_boundaries_conservative() {
    let thresholds = ModelVariant::Genotoxic.config().thresholds;

    assert_eq!(thresholds.classify(0.6), RiskTier::Low);
    assert_eq!(thresholds.classify(0.75), RiskTier::Moderate);
    assert_eq!(thresholds.classify(1.5), RiskTier::High);
}

#[test]
fn test_variant_thresholds_are_distinct_configurations() {
    let a = ModelVariant::Bioactivation.config().thresholds;
    let b = ModelVariant::Oxidative.config().thresholds;
    let c = ModelVariant::Genotoxic.config().thresholds;

    assert_eq!(a, RiskThresholds { low: 0.6, high: 1.5 });
    assert_eq!(b, RiskThresholds { low: 0.6, high: 1.5 });
    assert_eq!(c, RiskThresholds { low: 0.75, high: 1.5 });
}

#[test]
fn test_degenerate_thresholds_skip_moderate() {
    let thresholds = RiskThresholds::new(1.0, 1.0).unwrap();
    assert_eq!(thresholds.classify(0.99), RiskTier::Low);
    assert_eq!(thresholds.classify(1.0), RiskTier::High);
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_variant_weights() {
    let a = ModelVariant::Bioactivation.config().weights;
    assert_eq!(a.ros, 0.18);
    assert_eq!(a.alt, 0.14);
    assert_eq!(a.cholestasis, 0.14);

    let b = ModelVariant::Oxidative.config().weights;
    assert_eq!(b.ros, 0.20);
    assert_eq!(b.cholestasis, 0.10);

    let c = ModelVariant::Genotoxic.config().weights;
    assert_eq!(c.stress, 0.15);
    assert_eq!(c.fibrosis, 0.20);
    assert_eq!(c.alt, 0.0);
}

#[test]
fn test_uniform_state_scores_weight_total() {
    for variant in ModelVariant::ALL {
        let config = variant.config();
        let state = LiverState { levels: [1.0; 11] };
        let s = score(&state, &config.layout, &config.weights);
        assert!((s - config.weights.total()).abs() < 1e-12, "{}: {}", variant, s);
    }
}

#[test]
fn test_alt_ignored_by_genotoxic_score() {
    let config = ModelVariant::Genotoxic.config();
    let mut state = LiverState::zeros();
    let before = score(&state, &config.layout, &config.weights);
    state.set(config.layout.alt, 50.0);
    let after = score(&state, &config.layout, &config.weights);
    assert_eq!(before, after);
}

#[test]
fn test_scoring_overrides() {
    let custom = ScoreWeights {
        ros: 1.0,
        alt: 0.0,
        stress: 0.0,
        apoptosis: 0.0,
        necrosis: 0.0,
        fibrosis: 0.0,
        cholestasis: 0.0,
    };
    let config = VariantRegistry::create("bioactivation")
        .unwrap()
        .with_weights(custom)
        .unwrap()
        .with_thresholds(RiskThresholds::new(0.1, 0.2).unwrap())
        .unwrap();

    let mut state = LiverState::zeros();
    state.set(config.layout.ros, 0.15);
    state.set(config.layout.fibrosis, 100.0);

    let s = score(&state, &config.layout, &config.weights);
    assert!((s - 0.15).abs() < 1e-12);
    assert_eq!(config.thresholds.classify(s), RiskTier::Moderate);
}

#[test]
fn test_invalid_override_rejected() {
    let config = ModelVariant::Oxidative.config();
    let bad = ScoreWeights { ros: f64::NAN, ..ScoreWeights::oxidative() };
    assert!(matches!(
        config.with_weights(bad),
        Err(ConfigurationError::Weight { name: "ros", .. })
    ));
}

// ============================================================================
// Dominant pathway
// ============================================================================

#[test]
fn test_dominant_pathway_selection() {
    let layout = ModelVariant::Oxidative.config().layout;
    let mut state = LiverState::zeros();
    state.set(layout.ros, 0.4);
    state.set(layout.stress, 1.2);
    state.set(layout.apoptosis, 0.8);

    let dominant = dominant_pathway(&state, &layout);
    assert_eq!(dominant.name, "Mito Stress");
    assert_eq!(dominant.value, 1.2);
    assert_eq!(dominant.explanation, explain_pathway("Mito Stress"));
}

#[test]
fn test_dominant_pathway_tie_break() {
    let layout = ModelVariant::Oxidative.config().layout;
    let mut state = LiverState::zeros();
    state.set(layout.necrosis, 2.0);
    state.set(layout.apoptosis, 2.0);

    // Apoptosis is listed before necrosis
    assert_eq!(dominant_pathway(&state, &layout).name, "Apoptosis");
}

#[test]
fn test_explanation_fallback() {
    assert_eq!(explain_pathway("Steatosis"), GENERIC_EXPLANATION);
    assert_eq!(explain_pathway(""), GENERIC_EXPLANATION);
    for name in ["ROS", "ALT", "Mito Stress", "Cholestasis", "Apoptosis", "Necrosis", "Fibrosis"] {
        assert_ne!(explain_pathway(name), GENERIC_EXPLANATION, "{} should be mapped", name);
    }
}
