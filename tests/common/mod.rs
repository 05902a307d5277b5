// Test utility module for method-order integration tests
#![allow(dead_code)]

use method_order::{
    Accessibility, CallSite, ClassDeclaration, Dependencies, MethodDeclaration, Ordering,
    Parameter, Qualifier, ReturnType,
};

/// Builds class declarations whose methods are laid out one after another,
/// separated by a blank line
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    class: ClassDeclaration,
    next_line: usize,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            class: ClassDeclaration::new(name),
            next_line: 1,
        }
    }

    /// Add a declaration; its line span is replaced by the next free one
    pub fn declare(mut self, mut declaration: MethodDeclaration, body_lines: usize) -> Self {
        declaration.line = self.next_line;
        declaration.end_line = self.next_line + body_lines;
        self.next_line = declaration.end_line + 2;
        self.class.methods.push(declaration);
        self
    }

    pub fn method(self, name: &str, body_lines: usize) -> Self {
        self.declare(MethodDeclaration::new(name, 0, 0), body_lines)
    }

    pub fn public_method(self, name: &str, body_lines: usize) -> Self {
        self.declare(
            MethodDeclaration::new(name, 0, 0).with_accessibility(Accessibility::Public),
            body_lines,
        )
    }

    pub fn getter(self, name: &str) -> Self {
        self.declare(
            MethodDeclaration::new(name, 0, 0)
                .with_accessibility(Accessibility::Public)
                .with_return_type(ReturnType::Named("String".into())),
            2,
        )
    }

    pub fn setter(self, name: &str) -> Self {
        self.declare(
            MethodDeclaration::new(name, 0, 0)
                .with_accessibility(Accessibility::Public)
                .with_parameters(vec![Parameter::new("String")]),
            2,
        )
    }

    pub fn constructor(self, parameters: &[&str], body_lines: usize) -> Self {
        let name = self.class.name.clone();
        let parameters = parameters.iter().map(|&p| Parameter::new(p)).collect();
        self.declare(
            MethodDeclaration::constructor(name, 0, 0).with_parameters(parameters),
            body_lines,
        )
    }

    fn index_of(&self, name: &str) -> usize {
        self.class
            .methods
            .iter()
            .position(|m| m.name == name)
            .unwrap_or_else(|| panic!("no method named {}", name))
    }

    /// Next free line inside the caller's body
    fn site_line(&self, caller: usize) -> usize {
        let method = &self.class.methods[caller];
        let used = self
            .class
            .call_sites
            .iter()
            .filter(|site| site.enclosing_method == Some(caller))
            .count();
        (method.line + 1 + used).min(method.end_line)
    }

    /// `caller` calls the first method named `callee` with matching arity
    pub fn calls(self, caller: &str, callee: &str) -> Self {
        let arg_count = self.class.methods[self.index_of(callee)].parameters.len();
        self.calls_with(caller, callee, arg_count)
    }

    pub fn calls_with(mut self, caller: &str, callee: &str, arg_count: usize) -> Self {
        let caller = self.index_of(caller);
        let line = self.site_line(caller);
        self.class
            .call_sites
            .push(CallSite::call(callee, arg_count, line, 9).inside(caller));
        self
    }

    /// Raw site, for tests that need exact positions or nesting
    pub fn site(mut self, site: CallSite) -> Self {
        self.class.call_sites.push(site);
        self
    }

    pub fn this_reference(mut self, caller: &str, callee: &str) -> Self {
        let caller = self.index_of(caller);
        let line = self.site_line(caller);
        self.class.call_sites.push(
            CallSite::method_reference(Qualifier::This, callee, line, 17).inside(caller),
        );
        self
    }

    pub fn line_of(&self, name: &str) -> usize {
        self.class.methods[self.index_of(name)].line
    }

    pub fn build(self) -> ClassDeclaration {
        self.class
    }

    pub fn dependencies(self) -> Dependencies {
        Dependencies::build(&self.class).expect("valid fixture class")
    }

    pub fn ordering(self) -> Ordering {
        self.dependencies().initial_ordering()
    }
}

/// Shape of one generated method
#[derive(Debug, Clone, Copy)]
pub enum GeneratedKind {
    Plain,
    Constructor,
    Getter,
    Setter,
    Override,
}

/// A generated class: method `i` has `i` parameters so every call resolves
/// to exactly one target, and names repeat to form overload groups.
/// Setter `i` shares its property with getter `i - 1`.
pub fn generated_class(
    methods: &[(usize, GeneratedKind)],
    edges: &[(usize, usize, bool)],
) -> ClassDeclaration {
    let mut builder = ClassBuilder::new("Gen");
    for (index, &(body_lines, kind)) in methods.iter().enumerate() {
        let ints = vec![Parameter::new("int"); index];
        let declaration = match kind {
            GeneratedKind::Plain => {
                MethodDeclaration::new(format!("m{}", index % 4), 0, 0).with_parameters(ints)
            }
            GeneratedKind::Constructor => {
                MethodDeclaration::constructor("Gen", 0, 0).with_parameters(ints)
            }
            GeneratedKind::Getter => MethodDeclaration::new(format!("getF{}", index), 0, 0)
                .with_accessibility(Accessibility::Public)
                .with_return_type(ReturnType::Named("int".into())),
            GeneratedKind::Setter => {
                let property = match index {
                    0 => "Unpaired".to_string(),
                    _ => format!("F{}", index - 1),
                };
                MethodDeclaration::new(format!("set{}", property), 0, 0)
                    .with_accessibility(Accessibility::Public)
                    .with_parameters(vec![Parameter::new("int")])
            }
            GeneratedKind::Override => MethodDeclaration::new(format!("m{}", index % 4), 0, 0)
                .with_parameters(ints)
                .with_annotation("Override"),
        };
        builder = builder.declare(declaration, body_lines);
    }

    let mut class = builder.build();
    let count = class.methods.len();
    if count == 0 {
        return class;
    }
    for (position, &(caller, callee, nested)) in edges.iter().enumerate() {
        let (caller, callee) = (caller % count, callee % count);
        let target = &class.methods[callee];
        let span = class.methods[caller].end_line - class.methods[caller].line;
        let line = class.methods[caller].line + position % (span + 1);
        let mut site = CallSite::call(target.name.clone(), target.parameters.len(), line, position)
            .inside(caller);
        if nested {
            site.parent = class
                .call_sites
                .iter()
                .rposition(|other| other.enclosing_method == Some(caller));
        }
        class.call_sites.push(site);
    }
    class
}
