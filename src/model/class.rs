//! Immutable method records and the per-class model built from declarations

use super::accessor::{classify_accessor, AccessorKind, PropertyAccessor};
use super::declaration::{Accessibility, ClassDeclaration, MethodDeclaration};
use super::signature::{declared_arg_count, is_variable_arity, render_signature};
use crate::errors::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

const OVERRIDE_ANNOTATION: &str = "Override";

/// Stable identifier of a method: its declaration index within the class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodId(pub usize);

impl MethodId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of one declared method with every derived attribute
#[derive(Debug, Clone, Serialize)]
pub struct Method {
    id: MethodId,
    signature: String,
    name: String,
    line: usize,
    column: usize,
    length: usize,
    arg_count: usize,
    variable_arity: bool,
    is_static: bool,
    accessibility: Accessibility,
    is_override: bool,
    is_overloaded: bool,
    is_constructor: bool,
    returns_void: bool,
    accessor: Option<PropertyAccessor>,
}

impl Method {
    fn from_declaration(
        id: MethodId,
        declaration: &MethodDeclaration,
        is_overloaded: bool,
    ) -> Result<Self> {
        if declaration.end_line < declaration.line {
            return Err(Error::invalid_model(format!(
                "method {} ends at line {} before its declaration at line {}",
                declaration.name, declaration.end_line, declaration.line
            )));
        }

        let is_constructor = declaration.is_constructor;
        let is_override = !is_constructor
            && declaration.annotations.iter().any(|annotation| {
                annotation.rsplit('.').next() == Some(OVERRIDE_ANNOTATION)
            });

        Ok(Self {
            id,
            signature: render_signature(&declaration.name, &declaration.parameters),
            name: declaration.name.clone(),
            line: declaration.line,
            column: declaration.column,
            length: declaration.end_line - declaration.line,
            arg_count: declared_arg_count(&declaration.parameters),
            variable_arity: is_variable_arity(&declaration.parameters),
            is_static: declaration.is_static,
            accessibility: declaration.accessibility,
            is_override,
            is_overloaded,
            is_constructor,
            returns_void: !is_constructor && declaration.return_type.is_void(),
            accessor: classify_accessor(declaration),
        })
    }

    pub fn id(&self) -> MethodId {
        self.id
    }

    /// Declaration index in the original source order
    pub fn initial_index(&self) -> usize {
        self.id.0
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line of the declaration in the original source
    pub fn initial_line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Body length in lines (closing-brace line minus declaration line)
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end_line(&self) -> usize {
        self.line + self.length
    }

    /// Whether `line` falls inside the method's original span
    pub fn contains_line(&self, line: usize) -> bool {
        self.line <= line && line <= self.end_line()
    }

    /// Declared minimum number of arguments
    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    pub fn is_variable_arity(&self) -> bool {
        self.variable_arity
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_instance(&self) -> bool {
        !self.is_static
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn is_override(&self) -> bool {
        self.is_override
    }

    pub fn is_overloaded(&self) -> bool {
        self.is_overloaded
    }

    pub fn is_constructor(&self) -> bool {
        self.is_constructor
    }

    pub fn returns_void(&self) -> bool {
        self.returns_void
    }

    pub fn is_getter(&self) -> bool {
        matches!(&self.accessor, Some(a) if a.kind == AccessorKind::Getter)
    }

    pub fn is_setter(&self) -> bool {
        matches!(&self.accessor, Some(a) if a.kind == AccessorKind::Setter)
    }

    pub fn is_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Property exposed by a getter or setter
    pub fn accessible_property_name(&self) -> Result<&str> {
        self.accessor
            .as_ref()
            .map(|accessor| accessor.property.as_str())
            .ok_or_else(|| Error::NotAnAccessor {
                signature: self.signature.clone(),
            })
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.signature == other.signature
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature.hash(state);
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}

/// The methods of one class, indexed by declaration order
#[derive(Debug, Clone, Serialize)]
pub struct ClassModel {
    name: String,
    methods: Vec<Method>,
}

impl ClassModel {
    /// Build and validate the model for one class declaration
    pub fn new(declaration: &ClassDeclaration) -> Result<Self> {
        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for method in &declaration.methods {
            *name_counts.entry(method.name.as_str()).or_default() += 1;
        }

        let methods = declaration
            .methods
            .iter()
            .enumerate()
            .map(|(index, method)| {
                let overloaded = name_counts.get(method.name.as_str()).copied().unwrap_or(0) > 1;
                Method::from_declaration(MethodId(index), method, overloaded)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut signatures = HashSet::new();
        if let Some(duplicate) = methods.iter().find(|m| !signatures.insert(m.signature())) {
            return Err(Error::invalid_model(format!(
                "class {} declares {} more than once",
                declaration.name,
                duplicate.signature()
            )));
        }

        Ok(Self {
            name: declaration.name.clone(),
            methods,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.0)
    }

    pub fn method_by_signature(&self, signature: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.signature() == signature)
    }

    pub fn methods_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods.iter().filter(move |m| m.name() == name)
    }

    pub fn static_methods_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods_by_name(name).filter(|m| m.is_static())
    }

    pub fn instance_methods_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods_by_name(name).filter(|m| m.is_instance())
    }

    /// Getters and setters grouped by the property they expose
    pub fn property_accessors(&self) -> BTreeMap<&str, Vec<MethodId>> {
        let mut accessors: BTreeMap<&str, Vec<MethodId>> = BTreeMap::new();
        for method in &self.methods {
            if let Ok(property) = method.accessible_property_name() {
                accessors.entry(property).or_default().push(method.id());
            }
        }
        accessors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::declaration::{Parameter, ReturnType};

    fn class_with(methods: Vec<MethodDeclaration>) -> ClassDeclaration {
        ClassDeclaration {
            name: "Sample".into(),
            methods,
            call_sites: Vec::new(),
        }
    }

    #[test]
    fn test_method_attributes() {
        let class = class_with(vec![
            MethodDeclaration::constructor("Sample", 3, 5),
            MethodDeclaration::new("compute", 7, 12)
                .with_parameters(vec![Parameter::new("int"), Parameter::variable_arity("long")])
                .with_accessibility(Accessibility::Private)
                .with_static(true)
                .with_return_type(ReturnType::Named("int".into())),
            MethodDeclaration::new("toString", 14, 16)
                .with_accessibility(Accessibility::Public)
                .with_annotation("Override")
                .with_return_type(ReturnType::Named("String".into())),
        ]);
        let model = ClassModel::new(&class).unwrap();

        let ctor = &model.methods()[0];
        assert!(ctor.is_constructor());
        assert!(!ctor.returns_void());
        assert_eq!(ctor.signature(), "Sample()");

        let compute = &model.methods()[1];
        assert_eq!(compute.signature(), "compute(int,long...)");
        assert_eq!(compute.arg_count(), 1);
        assert!(compute.is_variable_arity());
        assert!(compute.is_static());
        assert_eq!(compute.length(), 5);
        assert!(compute.contains_line(12));
        assert!(!compute.contains_line(13));

        let to_string = &model.methods()[2];
        assert!(to_string.is_override());
        assert!(!to_string.is_overloaded());
        assert!(to_string.accessible_property_name().is_err());
    }

    #[test]
    fn test_overloaded_flag() {
        let class = class_with(vec![
            MethodDeclaration::new("add", 1, 2),
            MethodDeclaration::new("add", 3, 4).with_parameters(vec![Parameter::new("int")]),
            MethodDeclaration::new("remove", 5, 6),
        ]);
        let model = ClassModel::new(&class).unwrap();
        assert!(model.methods()[0].is_overloaded());
        assert!(model.methods()[1].is_overloaded());
        assert!(!model.methods()[2].is_overloaded());
        assert_eq!(model.methods_by_name("add").count(), 2);
    }

    #[test]
    fn test_constructor_is_never_override() {
        let class = class_with(vec![
            MethodDeclaration::constructor("Sample", 1, 2).with_annotation("java.lang.Override")
        ]);
        let model = ClassModel::new(&class).unwrap();
        assert!(!model.methods()[0].is_override());
    }

    #[test]
    fn test_duplicate_signature_is_rejected() {
        let class = class_with(vec![
            MethodDeclaration::new("run", 1, 2).with_parameters(vec![Parameter::new("List<A>")]),
            MethodDeclaration::new("run", 3, 4).with_parameters(vec![Parameter::new("List<B>")]),
        ]);
        let err = ClassModel::new(&class).unwrap_err();
        assert!(matches!(err, Error::InvalidModel { .. }));
    }

    #[test]
    fn test_inverted_line_span_is_rejected() {
        let class = class_with(vec![MethodDeclaration::new("run", 10, 4)]);
        assert!(ClassModel::new(&class).is_err());
    }

    #[test]
    fn test_property_accessors_grouping() {
        let public = |name: &str| {
            MethodDeclaration::new(name, 1, 1).with_accessibility(Accessibility::Public)
        };
        let class = class_with(vec![
            public("getSize").with_return_type(ReturnType::Named("int".into())),
            public("isOpen").with_return_type(ReturnType::Boolean),
            public("setSize").with_parameters(vec![Parameter::new("int")]),
            public("close"),
        ]);
        let model = ClassModel::new(&class).unwrap();
        let accessors = model.property_accessors();
        assert_eq!(accessors.len(), 2);
        assert_eq!(accessors["size"], vec![MethodId(0), MethodId(2)]);
        assert_eq!(accessors["open"], vec![MethodId(1)]);
    }

    #[test]
    fn test_static_and_instance_lookup() {
        let class = class_with(vec![
            MethodDeclaration::new("of", 1, 2).with_static(true),
            MethodDeclaration::new("of", 3, 4).with_parameters(vec![Parameter::new("int")]),
        ]);
        let model = ClassModel::new(&class).unwrap();
        let statics: Vec<_> = model.static_methods_by_name("of").map(Method::id).collect();
        let instances: Vec<_> = model.instance_methods_by_name("of").map(Method::id).collect();
        assert_eq!(statics, vec![MethodId(0)]);
        assert_eq!(instances, vec![MethodId(1)]);
    }
}
