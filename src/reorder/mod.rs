//! Heuristic search for a better declaration order
//!
//! One round runs a fixed pipeline:
//!
//! 1. breadth-first linearization from a seed method (becomes the working order)
//! 2. override, overload and accessor group cohesion
//! 3. relative order of each caller's dependencies
//! 4. pulling dependencies up to a caller that precedes all of them
//! 5. constructors to the front (with constructor cohesion)
//!
//! Every proposal after step 1 is kept only if it lowers the cost.
//!
//! The pipeline is not run just once: rounds repeat while they lower the
//! cost, starting each round from the previous result. A round that does not
//! lower it is thrown away, so the result is never worse than the input and
//! reordering the result again returns it unchanged. In practice the second
//! round re-derives the same breadth-first order and is rejected.

pub mod passes;
pub mod seed;

use crate::config::MethodOrderConfig;
use crate::errors::Result;
use crate::model::MethodId;
use crate::ordering::Ordering;
use crate::scoring::PenaltyScorer;
use tracing::{debug, debug_span, trace};

pub struct Reorderer {
    scorer: PenaltyScorer,
    constructor_cohesion: bool,
}

impl Default for Reorderer {
    fn default() -> Self {
        Self::new(&MethodOrderConfig::default())
    }
}

impl Reorderer {
    pub fn new(config: &MethodOrderConfig) -> Self {
        Self {
            scorer: PenaltyScorer::new(config),
            constructor_cohesion: config.constructor_cohesion,
        }
    }

    pub fn scorer(&self) -> &PenaltyScorer {
        &self.scorer
    }

    /// Best ordering found starting from `initial`
    pub fn reorder(&self, initial: &Ordering) -> Result<Ordering> {
        let mut best = initial.clone();
        let mut best_cost = self.scorer.penalty(&best);
        if best.len() < 2 {
            return Ok(best);
        }

        for round in 1.. {
            let _span = debug_span!("reorder_round", round).entered();
            let candidate = self.run_round(&best)?;
            let cost = self.scorer.penalty(&candidate);
            let accepted = cost < best_cost;
            debug!(
                old_cost = best_cost,
                new_cost = cost,
                accepted,
                "Reordering round finished"
            );
            if !accepted {
                break;
            }
            best = candidate;
            best_cost = cost;
        }
        Ok(best)
    }

    fn run_round(&self, input: &Ordering) -> Result<Ordering> {
        let mut search = match seed::select_seed(input) {
            Some(seed) => {
                let linearized = input.reorder(&passes::breadth_first(input, seed))?;
                Search::new(&self.scorer, linearized)
            }
            None => Search::new(&self.scorer, input.clone()),
        };

        let groups = search.current.graph().groups().clone();
        search.propose_group("override_group", &groups.overrides)?;
        for group in passes::groups_by_first_appearance(&search.current, &groups.overloads) {
            search.propose_group("overload_group", group)?;
        }
        for group in passes::groups_by_first_appearance(&search.current, &groups.accessors) {
            search.propose_group("accessor_group", group)?;
        }

        let callers: Vec<MethodId> = search.current.permutation().iter().copied().collect();
        for &caller in &callers {
            let proposal = passes::align_relative_order(&search.current, caller);
            search.propose("relative_order", proposal)?;
        }
        let callers: Vec<MethodId> = search.current.permutation().iter().copied().collect();
        for &caller in &callers {
            let proposal = passes::pull_dependencies(&search.current, caller);
            search.propose("pull_dependencies", proposal)?;
        }

        if self.constructor_cohesion {
            let proposal = passes::constructors_first(&search.current);
            search.propose("constructors_first", proposal)?;
        }
        Ok(search.current)
    }
}

/// Working state of one round: the current ordering and its cost
struct Search<'a> {
    scorer: &'a PenaltyScorer,
    current: Ordering,
    cost: f64,
}

impl<'a> Search<'a> {
    fn new(scorer: &'a PenaltyScorer, current: Ordering) -> Self {
        let cost = scorer.penalty(&current);
        Self {
            scorer,
            current,
            cost,
        }
    }

    fn propose_group(&mut self, pass: &'static str, group: &[MethodId]) -> Result<bool> {
        let proposal = passes::gather_group(&self.current, group);
        self.propose(pass, proposal)
    }

    /// Adopt `proposal` if it is a strict improvement
    fn propose(&mut self, pass: &'static str, proposal: Option<Vec<MethodId>>) -> Result<bool> {
        let Some(order) = proposal else {
            return Ok(false);
        };
        let candidate = self.current.reorder(&order)?;
        let cost = self.scorer.penalty(&candidate);
        let accepted = cost < self.cost;
        if accepted {
            debug!(pass, old_cost = self.cost, new_cost = cost, "Accepted proposal");
            self.current = candidate;
            self.cost = cost;
        } else {
            trace!(pass, old_cost = self.cost, new_cost = cost, "Rejected proposal");
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dependencies;
    use crate::model::{CallSite, ClassDeclaration, MethodDeclaration, Parameter};
    use pretty_assertions::assert_eq;

    fn ordering(class: &ClassDeclaration) -> Ordering {
        Dependencies::build(class).unwrap().initial_ordering()
    }

    #[test]
    fn test_callee_moves_below_caller() {
        let mut class = ClassDeclaration::new("Service");
        class.methods = vec![
            MethodDeclaration::new("helper", 1, 3),
            MethodDeclaration::new("unrelated", 4, 6),
            MethodDeclaration::new("handle", 7, 10),
        ];
        class.call_sites = vec![CallSite::call("helper", 0, 8, 9).inside(2)];
        let initial = ordering(&class);

        let reorderer = Reorderer::default();
        let optimized = reorderer.reorder(&initial).unwrap();
        let scorer = reorderer.scorer();
        assert!(scorer.penalty(&optimized) < scorer.penalty(&initial));
        assert_eq!(optimized.declaration_before_usage_cases(), 0);
        assert_eq!(optimized.index_distance(MethodId(2), MethodId(0)).unwrap(), 1);
    }

    #[test]
    fn test_second_reorder_keeps_the_result() {
        let mut class = ClassDeclaration::new("Service");
        class.methods = vec![
            MethodDeclaration::new("helper", 1, 3),
            MethodDeclaration::new("unrelated", 4, 6),
            MethodDeclaration::new("handle", 7, 10),
        ];
        class.call_sites = vec![CallSite::call("helper", 0, 8, 9).inside(2)];

        let reorderer = Reorderer::default();
        let once = reorderer.reorder(&ordering(&class)).unwrap();
        assert_eq!(once.signatures(), vec!["handle()", "helper()", "unrelated()"]);
        assert_eq!(reorderer.reorder(&once).unwrap(), once);
    }

    #[test]
    fn test_constructors_pulled_to_front() {
        let mut class = ClassDeclaration::new("Point");
        class.methods = vec![
            MethodDeclaration::new("x", 1, 2),
            MethodDeclaration::constructor("Point", 3, 4),
            MethodDeclaration::new("y", 5, 6),
            MethodDeclaration::constructor("Point", 7, 8)
                .with_parameters(vec![Parameter::new("int"), Parameter::new("int")]),
        ];
        let optimized = Reorderer::default().reorder(&ordering(&class)).unwrap();
        assert_eq!(optimized.constructor_group_split_cases(), 0);
        assert_eq!(optimized.index_of(MethodId(1)).unwrap(), 0);
    }

    #[test]
    fn test_well_ordered_class_is_kept() {
        let mut class = ClassDeclaration::new("Ordered");
        class.methods = vec![
            MethodDeclaration::new("a", 1, 3),
            MethodDeclaration::new("b", 4, 6),
        ];
        class.call_sites = vec![CallSite::call("b", 0, 2, 3).inside(0)];
        let initial = ordering(&class);
        let optimized = Reorderer::default().reorder(&initial).unwrap();
        assert_eq!(optimized, initial);
        assert_eq!(optimized.first_misplaced_method(), None);
    }

    #[test]
    fn test_empty_and_single_method_classes() {
        let empty = ordering(&ClassDeclaration::new("Empty"));
        assert!(Reorderer::default().reorder(&empty).unwrap().is_empty());

        let mut class = ClassDeclaration::new("Single");
        class.methods = vec![MethodDeclaration::new("only", 1, 2)];
        let single = ordering(&class);
        assert_eq!(Reorderer::default().reorder(&single).unwrap(), single);
    }
}
