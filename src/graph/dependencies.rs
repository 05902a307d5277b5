//! The dependency information handed to consumers

use super::DependencyGraph;
use crate::errors::Result;
use crate::model::{ClassDeclaration, ClassModel};
use crate::ordering::Ordering;
use crate::resolution::CallResolver;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Class model plus resolved calls of one class.
///
/// Serializes as `{ "class": .., "calls": [..] }` for visualization tools.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Dependencies {
    graph: Arc<DependencyGraph>,
}

impl Dependencies {
    /// Validate a declaration, resolve its call sites and build the graph
    pub fn build(declaration: &ClassDeclaration) -> Result<Self> {
        let class = Arc::new(ClassModel::new(declaration)?);
        let calls = CallResolver::new(&class).resolve(&declaration.call_sites)?;
        debug!(
            class = %class.name(),
            methods = class.len(),
            sites = declaration.call_sites.len(),
            resolved = calls.len(),
            "Built dependency graph"
        );
        Ok(Self {
            graph: Arc::new(DependencyGraph::new(class, calls)),
        })
    }

    pub fn graph(&self) -> &Arc<DependencyGraph> {
        &self.graph
    }

    pub fn class(&self) -> &ClassModel {
        self.graph.class()
    }

    /// Ordering in declaration order
    pub fn initial_ordering(&self) -> Ordering {
        Ordering::initial(Arc::clone(&self.graph))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<DependencyGraph> for Dependencies {
    fn from(graph: DependencyGraph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }
}
