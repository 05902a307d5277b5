//! Candidate declaration orders of one class
//!
//! An `Ordering` pairs the shared dependency graph with one permutation of
//! its methods. Orderings are values: every transformation returns a new one
//! and leaves the receiver untouched.

pub mod metrics;

use crate::errors::{Error, Result};
use crate::graph::DependencyGraph;
use crate::model::{Accessibility, ClassModel, Method, MethodId};
use im::Vector;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// First method whose position differs from its declaration index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisplacedMethod {
    pub id: MethodId,
    pub signature: String,
    /// Declaration line in the original source
    pub line: usize,
    /// Original index minus the new index; positive means "move up"
    pub shift: isize,
}

#[derive(Clone)]
pub struct Ordering {
    graph: Arc<DependencyGraph>,
    /// Body lengths preceding each method in declaration order, by id
    initial_preceding: Arc<Vec<usize>>,
    current: Vector<MethodId>,
    /// Position of each method in `current`, by id
    positions: Vec<usize>,
    /// Body lengths preceding each method in `current`, by id
    preceding: Vec<usize>,
}

impl Ordering {
    /// The declaration order of the graph's class
    pub fn initial(graph: Arc<DependencyGraph>) -> Self {
        let current: Vector<MethodId> = (0..graph.method_count()).map(MethodId).collect();
        let (positions, preceding) = index_permutation(&graph, &current);
        Self {
            graph,
            initial_preceding: Arc::new(preceding.clone()),
            current,
            positions,
            preceding,
        }
    }

    /// Same graph, another permutation. The caller guarantees bijectivity.
    pub(crate) fn with_permutation(&self, current: Vector<MethodId>) -> Self {
        debug_assert_eq!(current.len(), self.current.len());
        let (positions, preceding) = index_permutation(&self.graph, &current);
        Self {
            graph: Arc::clone(&self.graph),
            initial_preceding: Arc::clone(&self.initial_preceding),
            current,
            positions,
            preceding,
        }
    }

    pub fn graph(&self) -> &Arc<DependencyGraph> {
        &self.graph
    }

    pub fn class(&self) -> &ClassModel {
        self.graph.class()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Method ids in current order
    pub fn permutation(&self) -> &Vector<MethodId> {
        &self.current
    }

    /// Methods in current order
    pub fn methods(&self) -> impl Iterator<Item = &Method> + '_ {
        self.current.iter().map(move |&id| self.graph.method(id))
    }

    pub fn signatures(&self) -> Vec<&str> {
        self.methods().map(Method::signature).collect()
    }

    /// Methods in declaration order
    pub fn initial_methods(&self) -> &[Method] {
        self.class().methods()
    }

    /// Current index of `id`; ids of another class are rejected
    pub fn index_of(&self, id: MethodId) -> Result<usize> {
        self.positions
            .get(id.index())
            .copied()
            .ok_or(Error::NoSuchIndex {
                index: id.index(),
                len: self.len(),
            })
    }

    /// Unchecked `index_of` for ids taken from this ordering's own graph
    pub(crate) fn position(&self, id: MethodId) -> usize {
        self.positions[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &Method {
        self.graph.method(id)
    }

    pub fn method_at(&self, index: usize) -> Result<&Method> {
        self.current
            .get(index)
            .map(|&id| self.graph.method(id))
            .ok_or(Error::NoSuchIndex {
                index,
                len: self.len(),
            })
    }

    pub fn method_by_initial_index(&self, index: usize) -> Result<&Method> {
        self.class().method(MethodId(index)).ok_or(Error::NoSuchIndex {
            index,
            len: self.len(),
        })
    }

    pub fn dependencies_in_appearance_order(&self, caller: MethodId) -> &[MethodId] {
        self.graph.dependencies_of(caller)
    }

    /// Current indices of `caller`'s dependencies, in appearance order
    pub fn dependency_indices_in_appearance_order(&self, caller: MethodId) -> Vec<usize> {
        self.dependencies_in_appearance_order(caller)
            .iter()
            .map(|&callee| self.position(callee))
            .collect()
    }

    pub fn dependants(&self, callee: MethodId) -> &[MethodId] {
        self.graph.dependants_of(callee)
    }

    pub fn has_dependencies(&self, id: MethodId) -> bool {
        !self.graph.dependencies_of(id).is_empty()
    }

    pub fn has_dependants(&self, id: MethodId) -> bool {
        !self.graph.dependants_of(id).is_empty()
    }

    /// A public method that neither calls nor is called by another method
    pub fn is_interface_method(&self, id: MethodId) -> bool {
        self.method(id).accessibility() == Accessibility::Public
            && !self.has_dependencies(id)
            && !self.has_dependants(id)
    }

    pub fn depends_on(&self, caller: MethodId, callee: MethodId) -> bool {
        self.graph.depends_on(caller, callee)
    }

    /// Signed number of positions from `caller` to `callee`
    pub fn index_distance(&self, caller: MethodId, callee: MethodId) -> Result<isize> {
        Ok(self.index_of(callee)? as isize - self.index_of(caller)? as isize)
    }

    /// Signed number of lines from `caller`'s declaration to `callee`'s
    pub fn line_distance(&self, caller: MethodId, callee: MethodId) -> Result<isize> {
        self.index_of(caller)?;
        self.index_of(callee)?;
        Ok(self.translated_start_line(callee) - self.translated_start_line(caller))
    }

    /// Where an original source line would end up under this ordering
    pub fn translate_line(&self, line: usize) -> Result<isize> {
        self.current
            .iter()
            .find(|&&id| self.method(id).contains_line(line))
            .map(|&id| line as isize + self.line_shift(id))
            .ok_or(Error::LineOutsideMethods { line })
    }

    /// Lines a method's body moves by relative to the original source
    pub(crate) fn line_shift(&self, id: MethodId) -> isize {
        self.preceding[id.index()] as isize - self.initial_preceding[id.index()] as isize
    }

    pub(crate) fn translated_start_line(&self, id: MethodId) -> isize {
        self.method(id).initial_line() as isize + self.line_shift(id)
    }

    /// Move one method by `shift` positions; negative moves towards the top
    pub fn move_method_by(&self, id: MethodId, shift: isize) -> Result<Ordering> {
        let index = self.index_of(id)?;
        let target = index as isize + shift;
        if target < 0 || target >= self.len() as isize {
            return Err(Error::IndexOutOfRange {
                index,
                shift,
                len: self.len(),
            });
        }
        let mut current = self.current.clone();
        current.remove(index);
        current.insert(target as usize, id);
        Ok(self.with_permutation(current))
    }

    /// Same class, methods declared in `order`
    pub fn reorder(&self, order: &[MethodId]) -> Result<Ordering> {
        let mut seen = vec![false; self.len()];
        let is_permutation = order.len() == self.len()
            && order.iter().all(|id| match seen.get_mut(id.index()) {
                Some(slot) if !*slot => {
                    *slot = true;
                    true
                }
                _ => false,
            });
        if !is_permutation {
            return Err(Error::PermutationMismatch {
                current: self.signatures().join(", "),
                proposed: order
                    .iter()
                    .map(|&id| {
                        self.class()
                            .method(id)
                            .map_or_else(|| id.to_string(), |m| m.signature().to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        Ok(self.with_permutation(order.iter().copied().collect()))
    }

    /// First method, in current order, that no longer sits at its declaration index
    pub fn first_misplaced_method(&self) -> Option<MisplacedMethod> {
        self.current
            .iter()
            .enumerate()
            .find(|&(index, id)| index != id.index())
            .map(|(index, &id)| {
                let method = self.method(id);
                MisplacedMethod {
                    id,
                    signature: method.signature().to_string(),
                    line: method.initial_line(),
                    shift: method.initial_index() as isize - index as isize,
                }
            })
    }
}

impl fmt::Debug for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ordering")
            .field("class", &self.class().name())
            .field("methods", &self.signatures())
            .finish()
    }
}

impl PartialEq for Ordering {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.current == other.current
    }
}

impl Eq for Ordering {}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.class().name(), self.signatures().join(", "))
    }
}

/// Positions and preceding-length prefix sums for a permutation
fn index_permutation(
    graph: &DependencyGraph,
    current: &Vector<MethodId>,
) -> (Vec<usize>, Vec<usize>) {
    let mut positions = vec![0; current.len()];
    let mut preceding = vec![0; current.len()];
    let mut total = 0;
    for (position, &id) in current.iter().enumerate() {
        positions[id.index()] = position;
        preceding[id.index()] = total;
        total += graph.method(id).length();
    }
    (positions, preceding)
}
