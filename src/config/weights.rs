//! Penalty weights for the ordering cost function

use serde::{Deserialize, Serialize};

/// Weight of each structural metric in the ordering cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Per dependency declared above its caller
    #[serde(default = "default_declaration_before_usage_weight")]
    pub declaration_before_usage: f64,

    /// Per extra position spanned by the override group
    #[serde(default = "default_override_split_weight")]
    pub override_split: f64,

    /// Per extra position spanned by an overload group
    #[serde(default = "default_overload_split_weight")]
    pub overload_split: f64,

    /// Per extra position spanned by a getter/setter group
    #[serde(default = "default_accessor_split_weight")]
    pub accessor_split: f64,

    /// Per dependency appearing out of declaration order in its caller
    #[serde(default = "default_relative_order_inconsistency_weight")]
    pub relative_order_inconsistency: f64,

    /// Per dependency more than a screen away from its call
    #[serde(default = "default_distant_dependency_weight")]
    pub distant_dependency: f64,

    /// Per extra position spanned by the constructors
    #[serde(default = "default_constructor_split_weight")]
    pub constructor_split: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            declaration_before_usage: default_declaration_before_usage_weight(),
            override_split: default_override_split_weight(),
            overload_split: default_overload_split_weight(),
            accessor_split: default_accessor_split_weight(),
            relative_order_inconsistency: default_relative_order_inconsistency_weight(),
            distant_dependency: default_distant_dependency_weight(),
            constructor_split: default_constructor_split_weight(),
        }
    }
}

impl PenaltyWeights {
    // Pure function: Check if a weight is usable
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} weight must be a finite non-negative number, got {}",
                name, weight
            ))
        }
    }

    pub fn named_weights(&self) -> [(&'static str, f64); 7] {
        [
            ("declaration_before_usage", self.declaration_before_usage),
            ("override_split", self.override_split),
            ("overload_split", self.overload_split),
            ("accessor_split", self.accessor_split),
            (
                "relative_order_inconsistency",
                self.relative_order_inconsistency,
            ),
            ("distant_dependency", self.distant_dependency),
            ("constructor_split", self.constructor_split),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        self.named_weights()
            .iter()
            .try_for_each(|&(name, weight)| Self::validate_weight(weight, name))
    }
}

pub fn default_declaration_before_usage_weight() -> f64 {
    4.0
}

pub fn default_override_split_weight() -> f64 {
    3.0
}

pub fn default_overload_split_weight() -> f64 {
    5.0
}

pub fn default_accessor_split_weight() -> f64 {
    3.0
}

pub fn default_relative_order_inconsistency_weight() -> f64 {
    1.0
}

pub fn default_distant_dependency_weight() -> f64 {
    3.0
}

pub fn default_constructor_split_weight() -> f64 {
    4.0
}
