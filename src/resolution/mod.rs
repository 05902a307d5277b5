//! Call resolution: attributing raw call sites to methods of the same class
//!
//! Only calls that can be pinned to a method declared in the analysed class
//! survive. Everything else (calls on other receivers, unknown names, arity
//! mismatches, sites outside method bodies) is dropped without error.
//!
//! Overloads with the same arity are not disambiguated by argument types:
//! the first declared match wins. This is a known source of misattribution
//! and is kept as is.

mod method_call;
mod method_ref;

use crate::errors::{Error, Result};
use crate::model::{CallKind, CallSite, ClassModel, MethodId};
use serde::Serialize;
use tracing::trace;

/// Index of a call site in the class declaration's `call_sites`
pub type SiteId = usize;

/// A call site whose caller and callee are both known
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCall {
    pub site: SiteId,
    pub caller: MethodId,
    pub callee: MethodId,
    pub line: usize,
    pub column: usize,
    pub is_method_reference: bool,
    /// Sites whose nodes are syntactic ancestors of this one, nearest first
    pub enclosing_sites: Vec<SiteId>,
}

impl ResolvedCall {
    /// Whether this call's node lies inside `other`'s node
    pub fn is_nested_inside(&self, other: &ResolvedCall) -> bool {
        self.site != other.site && self.enclosing_sites.contains(&other.site)
    }
}

/// Resolves call sites against one class model
pub struct CallResolver<'a> {
    class: &'a ClassModel,
}

impl<'a> CallResolver<'a> {
    pub fn new(class: &'a ClassModel) -> Self {
        Self { class }
    }

    /// Resolve every site, validating the structural references first
    pub fn resolve(&self, sites: &[CallSite]) -> Result<Vec<ResolvedCall>> {
        validate_sites(self.class, sites)?;

        let mut resolved = Vec::new();
        for (site_id, site) in sites.iter().enumerate() {
            match self.resolve_site(site) {
                Some((caller, callee)) => resolved.push(ResolvedCall {
                    site: site_id,
                    caller,
                    callee,
                    line: site.line,
                    column: site.column,
                    is_method_reference: site.is_method_reference(),
                    enclosing_sites: enclosing_sites(sites, site_id),
                }),
                None => trace!(
                    site = site_id,
                    name = %site.name,
                    line = site.line,
                    "Dropped unresolved call site"
                ),
            }
        }
        Ok(resolved)
    }

    /// Resolve one site to its (caller, callee) pair
    pub fn resolve_site(&self, site: &CallSite) -> Option<(MethodId, MethodId)> {
        let caller = MethodId(site.enclosing_method?);
        let callee = match &site.kind {
            CallKind::Call {
                qualifier,
                arg_count,
            } => method_call::resolve(self.class, &site.name, qualifier, *arg_count),
            CallKind::MethodReference { qualifier } => {
                method_ref::resolve(self.class, &site.name, qualifier)
            }
        }?;
        Some((caller, callee))
    }
}

/// Check indices and spans so that later stages can rely on them
fn validate_sites(class: &ClassModel, sites: &[CallSite]) -> Result<()> {
    for (site_id, site) in sites.iter().enumerate() {
        if let Some(parent) = site.parent {
            if parent >= sites.len() || parent == site_id {
                return Err(Error::invalid_model(format!(
                    "call site #{} refers to parent site #{} of {}",
                    site_id,
                    parent,
                    sites.len()
                )));
            }
        }
        if let Some(method_index) = site.enclosing_method {
            let method = class.method(MethodId(method_index)).ok_or_else(|| {
                Error::invalid_model(format!(
                    "call site #{} lies in method #{} but class {} has {} methods",
                    site_id,
                    method_index,
                    class.name(),
                    class.len()
                ))
            })?;
            if !method.contains_line(site.line) {
                return Err(Error::invalid_model(format!(
                    "call site #{} at line {} is outside {} (lines {}-{})",
                    site_id,
                    site.line,
                    method.signature(),
                    method.initial_line(),
                    method.end_line()
                )));
            }
        }
    }

    for site_id in 0..sites.len() {
        let mut steps = 0;
        let mut current = sites[site_id].parent;
        while let Some(parent) = current {
            steps += 1;
            if steps > sites.len() {
                return Err(Error::invalid_model(format!(
                    "call site #{} has a cyclic parent chain",
                    site_id
                )));
            }
            current = sites[parent].parent;
        }
    }
    Ok(())
}

/// Ancestor chain of a site through parent links, nearest first
fn enclosing_sites(sites: &[CallSite], site_id: SiteId) -> Vec<SiteId> {
    std::iter::successors(sites[site_id].parent, |&parent| sites[parent].parent).collect()
}
