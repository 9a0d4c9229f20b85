//! Compound descriptors and structural-flag classification.
//!
//! The numerical core only sees a `CompoundDescriptor`: an identifier, a
//! toxicity amplifier and modifier flags. Deriving those from a textual
//! molecular descriptor (e.g. SMILES) goes through the narrow
//! `StructuralClassifier` trait so the ODE system never depends on string
//! parsing.
//!
//! `SubstringFlagClassifier` is the crude heuristic: halogens (`cl`, `br`),
//! nitro groups (`no2`) or epoxide indicators mark a structure as reactive
//! (amplifier 2.5); thiol (`[sh]`) or catechol markers set the antioxidant
//! flag.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Amplifier for structures without reactive flags
pub const BASELINE_AMPLIFIER: f64 = 1.0;

/// Amplifier for structures carrying reactive-metabolite flags
pub const REACTIVE_AMPLIFIER: f64 = 2.5;

/// Optional per-compound modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Compound adds ROS clearance
    pub antioxidant: bool,
    /// Time-varying idiosyncratic sensitivity
    pub idiosyncratic: bool,
}

/// Output of structural classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralFlags {
    pub amplifier: f64,
    pub antioxidant: bool,
}

/// Maps a textual molecular descriptor to core inputs.
pub trait StructuralClassifier: Send + Sync {
    /// Reject descriptors that cannot be simulated
    fn validate(&self, descriptor: &str) -> Result<(), ConfigurationError>;

    /// Derive amplifier and antioxidant flag
    fn classify(&self, descriptor: &str) -> StructuralFlags;
}

/// Substring-matching structural flag heuristic.
#[derive(Debug, Clone)]
pub struct SubstringFlagClassifier {
    /// Lowercase substrings indicating reactive-metabolite risk
    pub reactive_markers: Vec<String>,
    /// Lowercase substrings indicating antioxidant capacity
    pub antioxidant_markers: Vec<String>,
}

impl Default for SubstringFlagClassifier {
    fn default() -> Self {
        Self {
            reactive_markers: ["cl", "br", "no2", "epoxide"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            antioxidant_markers: ["[sh]", "oc1ccccc1o"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StructuralClassifier for SubstringFlagClassifier {
    fn validate(&self, descriptor: &str) -> Result<(), ConfigurationError> {
        let invalid = || ConfigurationError::CompoundId(descriptor.to_string());

        if descriptor.trim().is_empty() || descriptor.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        // Branches and atom brackets must balance and not interleave
        let mut open = Vec::new();
        for c in descriptor.chars() {
            match c {
                '(' | '[' => open.push(c),
                ')' => {
                    if open.pop() != Some('(') {
                        return Err(invalid());
                    }
                }
                ']' => {
                    if open.pop() != Some('[') {
                        return Err(invalid());
                    }
                }
                _ => {}
            }
        }
        if open.is_empty() {
            Ok(())
        } else {
            Err(invalid())
        }
    }

    fn classify(&self, descriptor: &str) -> StructuralFlags {
        let lower = descriptor.to_lowercase();
        let reactive = self.reactive_markers.iter().any(|m| lower.contains(m.as_str()));
        let antioxidant = self.antioxidant_markers.iter().any(|m| lower.contains(m.as_str()));

        let amplifier = if reactive {
            REACTIVE_AMPLIFIER
        } else {
            BASELINE_AMPLIFIER
        };

        StructuralFlags { amplifier, antioxidant }
    }
}

/// Immutable per-compound simulation input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundDescriptor {
    compound_id: String,
    amplifier: f64,
    modifiers: Modifiers,
}

impl CompoundDescriptor {
    /// Create a descriptor with an explicit amplifier (finite, >= 1.0)
    pub fn new(
        compound_id: impl Into<String>,
        amplifier: f64,
        modifiers: Modifiers,
    ) -> Result<Self, ConfigurationError> {
        if !amplifier.is_finite() || amplifier < 1.0 {
            return Err(ConfigurationError::Amplifier(amplifier));
        }
        Ok(Self {
            compound_id: compound_id.into(),
            amplifier,
            modifiers,
        })
    }

    /// Validate and classify a structural descriptor.
    ///
    /// The antioxidant flag comes from the classifier; idiosyncratic mode is
    /// a caller choice.
    pub fn from_structure(
        descriptor: &str,
        classifier: &dyn StructuralClassifier,
        idiosyncratic: bool,
    ) -> Result<Self, ConfigurationError> {
        classifier.validate(descriptor)?;
        let flags = classifier.classify(descriptor);
        Self::new(
            descriptor,
            flags.amplifier,
            Modifiers {
                antioxidant: flags.antioxidant,
                idiosyncratic,
            },
        )
    }

    pub fn compound_id(&self) -> &str {
        &self.compound_id
    }

    pub fn amplifier(&self) -> f64 {
        self.amplifier
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}
