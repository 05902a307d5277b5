//! Ordering cost: a weighted sum of structural metrics
//!
//! ```text
//! cost = total_distance
//!      + declaration_before_usage * w1
//!      + override_split * w2
//!      + overload_split * w3
//!      + accessor_split * w4
//!      + relative_order_inconsistency * w5
//!      + distant_dependency * w6
//!      + constructor_split * w7   (only with constructor cohesion)
//! ```
//!
//! Lower is better. The raw distance term is never weighted.

use crate::config::{MethodOrderConfig, PenaltyWeights};
use crate::ordering::Ordering;
use serde::Serialize;
use std::fmt;

/// Raw metric values of one ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PenaltyBreakdown {
    pub total_distance: usize,
    pub declaration_before_usage: usize,
    pub override_split: usize,
    pub overload_split: usize,
    pub accessor_split: usize,
    pub relative_order_inconsistency: usize,
    pub distant_dependency: usize,
    /// `None` when constructor cohesion is disabled
    pub constructor_split: Option<usize>,
}

impl PenaltyBreakdown {
    pub fn cost(&self, weights: &PenaltyWeights) -> f64 {
        self.total_distance as f64
            + self.declaration_before_usage as f64 * weights.declaration_before_usage
            + self.override_split as f64 * weights.override_split
            + self.overload_split as f64 * weights.overload_split
            + self.accessor_split as f64 * weights.accessor_split
            + self.relative_order_inconsistency as f64 * weights.relative_order_inconsistency
            + self.distant_dependency as f64 * weights.distant_dependency
            + self.constructor_split.unwrap_or(0) as f64 * weights.constructor_split
    }
}

impl fmt::Display for PenaltyBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance={} before_usage={} override_split={} overload_split={} \
             accessor_split={} inconsistency={} distant={}",
            self.total_distance,
            self.declaration_before_usage,
            self.override_split,
            self.overload_split,
            self.accessor_split,
            self.relative_order_inconsistency,
            self.distant_dependency,
        )?;
        if let Some(constructor_split) = self.constructor_split {
            write!(f, " constructor_split={}", constructor_split)?;
        }
        Ok(())
    }
}

/// Scores orderings for one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyScorer {
    weights: PenaltyWeights,
    screen_lines_count: usize,
    constructor_cohesion: bool,
}

impl Default for PenaltyScorer {
    fn default() -> Self {
        Self::new(&MethodOrderConfig::default())
    }
}

impl PenaltyScorer {
    pub fn new(config: &MethodOrderConfig) -> Self {
        Self {
            weights: config.weights,
            screen_lines_count: config.screen_lines_count,
            constructor_cohesion: config.constructor_cohesion,
        }
    }

    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    pub fn breakdown(&self, ordering: &Ordering) -> PenaltyBreakdown {
        PenaltyBreakdown {
            total_distance: ordering.total_distance(),
            declaration_before_usage: ordering.declaration_before_usage_cases(),
            override_split: ordering.override_group_split_cases(),
            overload_split: ordering.overload_group_split_cases(),
            accessor_split: ordering.accessor_group_split_cases(),
            relative_order_inconsistency: ordering.relative_order_inconsistency_cases(),
            distant_dependency: ordering.distant_dependency_cases(self.screen_lines_count),
            constructor_split: self
                .constructor_cohesion
                .then(|| ordering.constructor_group_split_cases()),
        }
    }

    pub fn penalty(&self, ordering: &Ordering) -> f64 {
        self.breakdown(ordering).cost(&self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dependencies;
    use crate::model::{CallSite, ClassDeclaration, MethodDeclaration, MethodId, Parameter};

    fn ordering() -> Ordering {
        let mut class = ClassDeclaration::new("Account");
        class.methods = vec![
            MethodDeclaration::new("deposit", 1, 4),
            MethodDeclaration::constructor("Account", 5, 6),
            MethodDeclaration::new("validate", 7, 9),
            MethodDeclaration::constructor("Account", 10, 12)
                .with_parameters(vec![Parameter::new("long")]),
        ];
        class.call_sites = vec![CallSite::call("validate", 0, 2, 9).inside(0)];
        Dependencies::build(&class).unwrap().initial_ordering()
    }

    #[test]
    fn test_breakdown_and_cost() {
        let scorer = PenaltyScorer::default();
        let ordering = ordering();
        let breakdown = scorer.breakdown(&ordering);

        assert_eq!(breakdown.total_distance, 2);
        assert_eq!(breakdown.constructor_split, Some(1));
        assert_eq!(breakdown.declaration_before_usage, 0);
        assert_eq!(scorer.penalty(&ordering), 2.0 + 4.0);
    }

    #[test]
    fn test_constructor_term_disabled() {
        let config = MethodOrderConfig::default().with_constructor_cohesion(false);
        let scorer = PenaltyScorer::new(&config);
        let breakdown = scorer.breakdown(&ordering());
        assert_eq!(breakdown.constructor_split, None);
        assert_eq!(scorer.penalty(&ordering()), 2.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = PenaltyWeights {
            declaration_before_usage: 10.0,
            ..Default::default()
        };
        let scorer = PenaltyScorer::new(&MethodOrderConfig::default().with_weights(weights));
        let reversed = ordering().move_method_by(MethodId(0), 3).unwrap();
        let breakdown = scorer.breakdown(&reversed);
        assert_eq!(breakdown.declaration_before_usage, 1);
        assert_eq!(breakdown.total_distance, 2);
        assert_eq!(scorer.penalty(&reversed), 2.0 + 10.0 + 4.0);
    }
}
