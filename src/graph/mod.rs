//! Method dependency graph of one class
//!
//! Edges come from resolved call sites. Everything that does not depend on
//! the declaration order (appearance-ordered dependencies, dependants, the
//! cohesion groups) is computed once here and shared by every `Ordering`.

pub mod appearance;
pub mod dependencies;
pub mod groups;

pub use dependencies::Dependencies;
pub use groups::MethodGroups;

use crate::model::{ClassModel, Method, MethodId};
use crate::resolution::{ResolvedCall, SiteId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One call of `callee` from the body of `caller`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MethodInvocation {
    pub caller: MethodId,
    pub callee: MethodId,
    pub line: usize,
    pub column: usize,
}

impl From<&ResolvedCall> for MethodInvocation {
    fn from(call: &ResolvedCall) -> Self {
        Self {
            caller: call.caller,
            callee: call.callee,
            line: call.line,
            column: call.column,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
    class: Arc<ClassModel>,
    calls: Vec<ResolvedCall>,
    #[serde(skip)]
    call_by_site: HashMap<SiteId, usize>,
    /// Invocations per caller, in appearance order
    #[serde(skip)]
    invocations: Vec<Vec<MethodInvocation>>,
    #[serde(skip)]
    dependencies: Vec<Vec<MethodId>>,
    #[serde(skip)]
    dependants: Vec<Vec<MethodId>>,
    #[serde(skip)]
    groups: MethodGroups,
}

impl DependencyGraph {
    /// Build the graph from calls already resolved against `class`
    pub fn new(class: Arc<ClassModel>, mut calls: Vec<ResolvedCall>) -> Self {
        let method_count = class.len();
        calls.retain(|call| {
            call.caller.index() < method_count && call.callee.index() < method_count
        });

        let mut calls_by_caller: Vec<Vec<&ResolvedCall>> = vec![Vec::new(); method_count];
        for call in &calls {
            calls_by_caller[call.caller.index()].push(call);
        }

        let mut invocations = Vec::with_capacity(method_count);
        let mut dependencies = Vec::with_capacity(method_count);
        for caller_calls in &calls_by_caller {
            let ordered = appearance::calls_in_appearance_order(caller_calls);
            invocations.push(ordered.iter().map(|call| MethodInvocation::from(*call)).collect());
            dependencies.push(appearance::dependencies_in_appearance_order(caller_calls));
        }

        let mut dependants: Vec<Vec<MethodId>> = vec![Vec::new(); method_count];
        let mut seen = HashSet::new();
        for call in &calls {
            if seen.insert((call.callee, call.caller)) {
                dependants[call.callee.index()].push(call.caller);
            }
        }
        for callers in &mut dependants {
            callers.sort();
        }

        let call_by_site = calls
            .iter()
            .enumerate()
            .map(|(index, call)| (call.site, index))
            .collect();
        let groups = MethodGroups::of(&class);

        Self {
            class,
            calls,
            call_by_site,
            invocations,
            dependencies,
            dependants,
            groups,
        }
    }

    pub fn class(&self) -> &Arc<ClassModel> {
        &self.class
    }

    pub fn method(&self, id: MethodId) -> &Method {
        &self.class.methods()[id.index()]
    }

    pub fn method_count(&self) -> usize {
        self.class.len()
    }

    /// Resolved calls in source order of their sites
    pub fn calls(&self) -> &[ResolvedCall] {
        &self.calls
    }

    pub fn invocations_of(&self, caller: MethodId) -> &[MethodInvocation] {
        &self.invocations[caller.index()]
    }

    pub fn invocations(&self) -> impl Iterator<Item = &MethodInvocation> {
        self.invocations.iter().flatten()
    }

    /// Distinct callees of `caller` in appearance order
    pub fn dependencies_of(&self, caller: MethodId) -> &[MethodId] {
        &self.dependencies[caller.index()]
    }

    /// Distinct callers of `callee` in declaration order
    pub fn dependants_of(&self, callee: MethodId) -> &[MethodId] {
        &self.dependants[callee.index()]
    }

    pub fn depends_on(&self, caller: MethodId, callee: MethodId) -> bool {
        self.dependencies_of(caller).contains(&callee)
    }

    /// Whether the node of site `inner` lies inside the node of site `outer`.
    /// Only resolved sites take part in the relation.
    pub fn is_nested_inside(&self, inner: SiteId, outer: SiteId) -> bool {
        match (self.call_by_site.get(&inner), self.call_by_site.get(&outer)) {
            (Some(&inner), Some(&outer)) => {
                self.calls[inner].is_nested_inside(&self.calls[outer])
            }
            _ => false,
        }
    }

    /// Every (inner, outer) pair of the nesting relation
    pub fn nesting_pairs(&self) -> Vec<(SiteId, SiteId)> {
        let mut pairs = Vec::new();
        for inner in &self.calls {
            for outer in &self.calls {
                if inner.is_nested_inside(outer) {
                    pairs.push((inner.site, outer.site));
                }
            }
        }
        pairs
    }

    pub fn groups(&self) -> &MethodGroups {
        &self.groups
    }
}
