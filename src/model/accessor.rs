//! Property accessor (getter/setter) classification

use super::declaration::{Accessibility, MethodDeclaration};
use super::signature::{declared_arg_count, is_variable_arity};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static GETTER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^get[A-Z][A-Za-z0-9_]*$").unwrap());
static BOOLEAN_GETTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^is[A-Z][A-Za-z0-9_]*$").unwrap());
static SETTER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^set[A-Z][A-Za-z0-9_]*$").unwrap());
static ACCESSOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:set|get|is)([A-Z][A-Za-z0-9_]*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A getter or setter together with the property it exposes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyAccessor {
    pub kind: AccessorKind,
    pub property: String,
}

/// Classify a declaration as a property accessor, if it is one
pub fn classify_accessor(declaration: &MethodDeclaration) -> Option<PropertyAccessor> {
    let kind = if is_getter(declaration) {
        AccessorKind::Getter
    } else if is_setter(declaration) {
        AccessorKind::Setter
    } else {
        return None;
    };
    property_name(&declaration.name).map(|property| PropertyAccessor { kind, property })
}

fn is_getter(declaration: &MethodDeclaration) -> bool {
    declaration.accessibility == Accessibility::Public
        && !declaration.is_constructor
        && declaration.parameters.is_empty()
        && !declaration.return_type.is_void()
        && (GETTER_PATTERN.is_match(&declaration.name)
            || BOOLEAN_GETTER_PATTERN.is_match(&declaration.name)
                && declaration.return_type.is_boolean())
}

fn is_setter(declaration: &MethodDeclaration) -> bool {
    declaration.accessibility == Accessibility::Public
        && !declaration.is_constructor
        && declared_arg_count(&declaration.parameters) == 1
        && !is_variable_arity(&declaration.parameters)
        && declaration.return_type.is_void()
        && SETTER_PATTERN.is_match(&declaration.name)
}

/// `getFirstName` -> `firstName`; `None` when the name has no accessor prefix
pub fn property_name(method_name: &str) -> Option<String> {
    ACCESSOR_PATTERN
        .captures(method_name)
        .and_then(|captures| captures.get(1))
        .map(|remainder| {
            let mut chars = remainder.as_str().chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            }
        })
}
