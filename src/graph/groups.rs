//! Method groups that are expected to be declared contiguously

use crate::model::{ClassModel, MethodId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Cohesion groups of one class, each listed in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodGroups {
    /// Every method carrying an override annotation
    pub overrides: Vec<MethodId>,
    /// Overloaded non-constructor methods, one group per name
    pub overloads: Vec<Vec<MethodId>>,
    /// Getters and setters, one group per property
    pub accessors: Vec<Vec<MethodId>>,
    /// Every constructor
    pub constructors: Vec<MethodId>,
}

impl MethodGroups {
    pub fn of(class: &ClassModel) -> Self {
        let overrides = class
            .methods()
            .iter()
            .filter(|m| m.is_override())
            .map(|m| m.id())
            .collect();

        let mut by_name: BTreeMap<&str, Vec<MethodId>> = BTreeMap::new();
        for method in class.methods() {
            if method.is_overloaded() && !method.is_constructor() {
                by_name.entry(method.name()).or_default().push(method.id());
            }
        }
        let mut overloads: Vec<Vec<MethodId>> = by_name.into_values().collect();
        overloads.sort_by_key(|group| group[0]);

        let mut accessors: Vec<Vec<MethodId>> = class.property_accessors().into_values().collect();
        accessors.sort_by_key(|group| group[0]);

        let constructors = class
            .methods()
            .iter()
            .filter(|m| m.is_constructor())
            .map(|m| m.id())
            .collect();

        Self {
            overrides,
            overloads,
            accessors,
            constructors,
        }
    }
}
