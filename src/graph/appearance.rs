//! Appearance order of a caller's dependencies
//!
//! Call sites of one caller form a forest through their nesting relation:
//! a site's parent is the nearest enclosing site resolved in the same caller.
//! Siblings and roots are ordered by position, and a post-order walk puts
//! every nested call before the call that encloses it.

use crate::model::MethodId;
use crate::resolution::{ResolvedCall, SiteId};
use std::collections::{HashMap, HashSet};

/// Resolved calls of one caller emitted in appearance order
pub fn calls_in_appearance_order<'a>(calls: &[&'a ResolvedCall]) -> Vec<&'a ResolvedCall> {
    let by_site: HashMap<SiteId, usize> = calls
        .iter()
        .enumerate()
        .map(|(index, call)| (call.site, index))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); calls.len()];
    let mut roots = Vec::new();
    for (index, call) in calls.iter().enumerate() {
        let enclosing = call
            .enclosing_sites
            .iter()
            .find_map(|site| by_site.get(site).copied());
        match enclosing {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }
    }

    let position = |index: &usize| {
        let call = calls[*index];
        (call.line, call.column, call.site)
    };
    roots.sort_by_key(position);
    for siblings in &mut children {
        siblings.sort_by_key(position);
    }

    let mut ordered = Vec::with_capacity(calls.len());
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&root| (root, false)).collect();
    while let Some((index, expanded)) = stack.pop() {
        if expanded {
            ordered.push(calls[index]);
            continue;
        }
        stack.push((index, true));
        stack.extend(children[index].iter().rev().map(|&child| (child, false)));
    }
    ordered
}

/// Distinct callees of one caller, in the order they first appear
pub fn dependencies_in_appearance_order(calls: &[&ResolvedCall]) -> Vec<MethodId> {
    let mut seen = HashSet::new();
    calls_in_appearance_order(calls)
        .into_iter()
        .map(|call| call.callee)
        .filter(|callee| seen.insert(*callee))
        .collect()
}
