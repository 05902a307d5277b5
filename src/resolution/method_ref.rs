//! Resolution of method references (`Type::name`, `this::name`)

use crate::model::{ClassModel, Method, MethodId, Qualifier};

pub(super) fn resolve(class: &ClassModel, name: &str, qualifier: &Qualifier) -> Option<MethodId> {
    match qualifier {
        Qualifier::Named(type_name) if type_name == class.name() => {
            class.static_methods_by_name(name).next().map(Method::id)
        }
        Qualifier::This => class.instance_methods_by_name(name).next().map(Method::id),
        _ => None,
    }
}
