//! Structural metrics over one ordering
//!
//! All metrics are non-negative counts. Structural metrics look at distinct
//! (caller, callee) pairs; the distant-dependency metric looks at every call
//! site but still counts each pair once.

use super::Ordering;
use crate::model::MethodId;
use std::collections::HashSet;

/// Extra positions a group spans beyond its size. Zero for contiguous or
/// single-member groups.
pub fn group_split(indices: impl IntoIterator<Item = usize>) -> usize {
    let mut count = 0;
    let mut min = usize::MAX;
    let mut max = 0;
    for index in indices {
        count += 1;
        min = min.min(index);
        max = max.max(index);
    }
    if count == 0 {
        return 0;
    }
    (max - min + 1).saturating_sub(count)
}

impl Ordering {
    fn dependency_pairs(&self) -> impl Iterator<Item = (MethodId, MethodId)> + '_ {
        self.permutation().iter().flat_map(move |&caller| {
            self.dependencies_in_appearance_order(caller)
                .iter()
                .map(move |&callee| (caller, callee))
        })
    }

    fn split_of(&self, group: &[MethodId]) -> usize {
        group_split(group.iter().map(|&id| self.position(id)))
    }

    /// Sum of |index distance| over every caller and distinct dependency
    pub fn total_distance(&self) -> usize {
        self.dependency_pairs()
            .map(|(caller, callee)| self.position(callee).abs_diff(self.position(caller)))
            .sum()
    }

    /// Distinct dependencies declared above their caller
    pub fn declaration_before_usage_cases(&self) -> usize {
        self.dependency_pairs()
            .filter(|&(caller, callee)| self.position(callee) < self.position(caller))
            .count()
    }

    pub fn override_group_split_cases(&self) -> usize {
        self.split_of(&self.graph().groups().overrides)
    }

    pub fn overload_group_split_cases(&self) -> usize {
        self.graph()
            .groups()
            .overloads
            .iter()
            .map(|group| self.split_of(group))
            .sum()
    }

    pub fn accessor_group_split_cases(&self) -> usize {
        self.graph()
            .groups()
            .accessors
            .iter()
            .map(|group| self.split_of(group))
            .sum()
    }

    pub fn constructor_group_split_cases(&self) -> usize {
        self.split_of(&self.graph().groups().constructors)
    }

    /// Distinct (caller, callee) pairs with a call site more than
    /// `screen_lines_count` lines away from the callee's declaration
    pub fn distant_dependency_cases(&self, screen_lines_count: usize) -> usize {
        let screen = screen_lines_count as isize;
        let mut distant = HashSet::new();
        for invocation in self.graph().invocations() {
            let call_line = invocation.line as isize + self.line_shift(invocation.caller);
            let callee_line = self.translated_start_line(invocation.callee);
            if (callee_line - call_line).abs() > screen {
                distant.insert((invocation.caller, invocation.callee));
            }
        }
        distant.len()
    }

    /// Dependencies that appear in a caller after one declared further down
    pub fn relative_order_inconsistency_cases(&self) -> usize {
        self.permutation()
            .iter()
            .map(|&caller| {
                let mut running_max = 0;
                let mut violations = 0;
                for index in self.dependency_indices_in_appearance_order(caller) {
                    if index < running_max {
                        violations += 1;
                    } else {
                        running_max = index;
                    }
                }
                violations
            })
            .sum()
    }
}
