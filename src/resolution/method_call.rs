//! Resolution of round-parenthesis calls

use crate::model::{ClassModel, Method, MethodId, Qualifier};

/// Only unqualified and `this.`-qualified calls can target this class
pub(super) fn targets_enclosing_class(qualifier: &Qualifier) -> bool {
    matches!(qualifier, Qualifier::Unqualified | Qualifier::This)
}

/// A declared method accepts `arg_count` arguments either exactly or through
/// its variable-arity tail
pub(super) fn arity_matches(method: &Method, arg_count: usize) -> bool {
    method.arg_count() == arg_count || method.is_variable_arity() && method.arg_count() <= arg_count
}

pub(super) fn resolve(
    class: &ClassModel,
    name: &str,
    qualifier: &Qualifier,
    arg_count: usize,
) -> Option<MethodId> {
    if !targets_enclosing_class(qualifier) {
        return None;
    }
    class
        .methods_by_name(name)
        .find(|method| arity_matches(method, arg_count))
        .map(Method::id)
}
