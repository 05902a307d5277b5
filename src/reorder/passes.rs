//! Candidate permutations proposed by the reordering passes
//!
//! Every function here is pure: it reads an ordering and returns the method
//! ids of a proposed ordering, or `None` when the pass has nothing to offer.

use crate::model::MethodId;
use crate::ordering::Ordering;
use std::collections::{HashSet, VecDeque};

/// Breadth-first walk over dependencies in appearance order, starting at
/// `seed`. Methods the walk cannot reach are picked up in declaration order.
pub fn breadth_first(ordering: &Ordering, seed: MethodId) -> Vec<MethodId> {
    let mut visited = vec![false; ordering.len()];
    let mut queue = VecDeque::from([seed]);
    visited[seed.index()] = true;
    let mut order = Vec::with_capacity(ordering.len());
    let mut next_unvisited = 0;

    while order.len() < ordering.len() {
        let current = match queue.pop_front() {
            Some(current) => current,
            None => {
                while visited[next_unvisited] {
                    next_unvisited += 1;
                }
                visited[next_unvisited] = true;
                MethodId(next_unvisited)
            }
        };
        order.push(current);
        for &dependency in ordering.dependencies_in_appearance_order(current) {
            if !visited[dependency.index()] {
                visited[dependency.index()] = true;
                queue.push_back(dependency);
            }
        }
    }
    order
}

/// Groups ordered by the current position of their first member
pub fn groups_by_first_appearance<'a>(
    ordering: &Ordering,
    groups: &'a [Vec<MethodId>],
) -> Vec<&'a [MethodId]> {
    let mut ordered: Vec<&[MethodId]> = groups
        .iter()
        .filter(|group| group.len() > 1)
        .map(Vec::as_slice)
        .collect();
    ordered.sort_by_key(|group| group.iter().map(|&id| ordering.position(id)).min());
    ordered
}

/// Move every member of `group` to sit right before its last member,
/// keeping the members' relative order
pub fn gather_group(ordering: &Ordering, group: &[MethodId]) -> Option<Vec<MethodId>> {
    if group.len() < 2 {
        return None;
    }
    let members: HashSet<MethodId> = group.iter().copied().collect();
    let last = *group.iter().max_by_key(|&&id| ordering.position(id))?;
    let moved: Vec<MethodId> = ordering
        .permutation()
        .iter()
        .copied()
        .filter(|id| members.contains(id) && *id != last)
        .collect();

    let mut order = Vec::with_capacity(ordering.len());
    for &id in ordering.permutation() {
        if id == last {
            order.extend_from_slice(&moved);
            order.push(id);
        } else if !members.contains(&id) {
            order.push(id);
        }
    }
    Some(order)
}

/// Reassign the slots occupied by `caller`'s dependencies so that they are
/// declared in the order the caller uses them
pub fn align_relative_order(ordering: &Ordering, caller: MethodId) -> Option<Vec<MethodId>> {
    let dependencies = ordering.dependencies_in_appearance_order(caller);
    if dependencies.len() < 2 {
        return None;
    }
    let mut slots = ordering.dependency_indices_in_appearance_order(caller);
    slots.sort_unstable();

    let mut order: Vec<MethodId> = ordering.permutation().iter().copied().collect();
    for (&slot, &dependency) in slots.iter().zip(dependencies) {
        order[slot] = dependency;
    }
    Some(order)
}

/// When every dependency of `caller` is declared below it, place them right
/// after the caller in appearance order
pub fn pull_dependencies(ordering: &Ordering, caller: MethodId) -> Option<Vec<MethodId>> {
    let dependencies = ordering.dependencies_in_appearance_order(caller);
    let caller_index = ordering.position(caller);
    if dependencies.is_empty()
        || dependencies
            .iter()
            .any(|&dependency| ordering.position(dependency) <= caller_index)
    {
        return None;
    }

    let pulled: HashSet<MethodId> = dependencies.iter().copied().collect();
    let mut order = Vec::with_capacity(ordering.len());
    for &id in ordering.permutation() {
        if pulled.contains(&id) {
            continue;
        }
        order.push(id);
        if id == caller {
            order.extend_from_slice(dependencies);
        }
    }
    Some(order)
}

/// All constructors first, every other method after them, both keeping
/// their current relative order
pub fn constructors_first(ordering: &Ordering) -> Option<Vec<MethodId>> {
    if ordering.graph().groups().constructors.is_empty() {
        return None;
    }
    let (mut order, others): (Vec<MethodId>, Vec<MethodId>) = ordering
        .permutation()
        .iter()
        .copied()
        .partition(|&id| ordering.method(id).is_constructor());
    order.extend(others);
    Some(order)
}
