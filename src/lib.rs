//! Liver Simulator X - drug-induced liver injury (DILI) simulation engine
//!
//! This library integrates a coupled ODE model of hepatotoxicity pathways
//! (bioactivation, GSH depletion, oxidative stress, mitochondrial damage,
//! cell death, fibrosis) for candidate compounds and derives a risk score
//! and tier from the terminal state.
//!
//! Parameter values are illustrative; the model is not pharmacologically
//! validated.

pub mod compound;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod scoring;
pub mod simulation;

pub use compound::{
    CompoundDescriptor, Modifiers, StructuralClassifier, StructuralFlags, SubstringFlagClassifier,
    BASELINE_AMPLIFIER, REACTIVE_AMPLIFIER,
};
pub use config::{Parameters, ScoringOverrides, SimulationParameters};
pub use error::{ConfigurationError, Error, IntegrationError, IntegrationFailure, Result};
pub use model::{
    integrate, AdaptiveIntegrator, IntegratorConfig, LiverDynamics, LiverState, ModelVariant,
    RateConstants, StateLayout, StressMarker, VariantConfig, VariantFeatures, VariantRegistry,
    BASELINE_GSH, STATE_DIM,
};
pub use scoring::{
    classify, dominant_pathway, explain_pathway, score, DominantPathway, RiskThresholds, RiskTier,
    ScoreWeights,
};
pub use simulation::{
    simulate_batch, CompoundAssessment, SimulationResult, Simulator, TrajectoryPoint,
};
