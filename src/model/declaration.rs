//! Raw class declarations as handed over by a source-model provider.
//!
//! These types are plain data: the provider fills them from its own AST and
//! the rest of the crate derives everything else. They deserialize from JSON
//! so a provider running out of process can pass a class over the wire.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// One class with its declared methods and every call site found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Simple class name, used to recognise `ClassName::method` references
    pub name: String,
    /// Methods and constructors in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    /// Call and method-reference sites in source order
    #[serde(default)]
    pub call_sites: Vec<CallSite>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            call_sites: Vec::new(),
        }
    }

    /// Parse a class declaration from its JSON form
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Access modifier of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

/// Declared return type, reduced to what accessor detection needs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    #[default]
    Void,
    Boolean,
    Named(String),
}

impl ReturnType {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Primitive `boolean` or the boxed `Boolean`
    pub fn is_boolean(&self) -> bool {
        match self {
            Self::Boolean => true,
            Self::Named(name) => name == "Boolean" || name == "java.lang.Boolean",
            Self::Void => false,
        }
    }
}

/// A formal parameter of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Type text as written, e.g. `final Map<String, Integer>`
    pub type_name: String,
    #[serde(default)]
    pub array_dimensions: usize,
    #[serde(default)]
    pub variable_arity: bool,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            array_dimensions: 0,
            variable_arity: false,
        }
    }

    pub fn array(type_name: impl Into<String>, dimensions: usize) -> Self {
        Self {
            array_dimensions: dimensions,
            ..Self::new(type_name)
        }
    }

    pub fn variable_arity(type_name: impl Into<String>) -> Self {
        Self {
            variable_arity: true,
            ..Self::new(type_name)
        }
    }
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_constructor: bool,
    /// Annotation names, simple or qualified (`Override`, `java.lang.Override`)
    #[serde(default)]
    pub annotations: Vec<String>,
    /// Ignored for constructors
    #[serde(default)]
    pub return_type: ReturnType,
    /// Line of the declaration
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    /// Line of the closing brace of the body
    pub end_line: usize,
}

impl MethodDeclaration {
    /// A package-private instance method returning void
    pub fn new(name: impl Into<String>, line: usize, end_line: usize) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            accessibility: Accessibility::Package,
            is_static: false,
            is_constructor: false,
            annotations: Vec::new(),
            return_type: ReturnType::Void,
            line,
            column: 0,
            end_line,
        }
    }

    pub fn constructor(name: impl Into<String>, line: usize, end_line: usize) -> Self {
        Self {
            is_constructor: true,
            accessibility: Accessibility::Public,
            ..Self::new(name, line, end_line)
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// What a call expression or method reference is qualified with
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    /// `foo()`
    #[default]
    Unqualified,
    /// `this.foo()` or `this::foo`
    This,
    /// Any other receiver or type: `other.foo()`, `Type::foo`
    Named(String),
}

/// Syntactic kind of a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallKind {
    /// Round-parenthesis invocation
    Call {
        #[serde(default)]
        qualifier: Qualifier,
        #[serde(default)]
        arg_count: usize,
    },
    /// `qualifier::name` reference; nothing is invoked at the site itself
    MethodReference { qualifier: Qualifier },
}

/// One call or method-reference site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Name of the referenced method
    pub name: String,
    #[serde(flatten)]
    pub kind: CallKind,
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    /// Declaration index of the method whose body directly contains the site.
    /// Absent for field initialisers and bodies of nested or anonymous classes.
    #[serde(default)]
    pub enclosing_method: Option<usize>,
    /// Index of the nearest call site whose node is a syntactic ancestor
    #[serde(default)]
    pub parent: Option<usize>,
}

impl CallSite {
    /// Unqualified call `name(..)` with `arg_count` arguments
    pub fn call(name: impl Into<String>, arg_count: usize, line: usize, column: usize) -> Self {
        Self {
            name: name.into(),
            kind: CallKind::Call {
                qualifier: Qualifier::Unqualified,
                arg_count,
            },
            line,
            column,
            enclosing_method: None,
            parent: None,
        }
    }

    /// Call with an explicit qualifier
    pub fn qualified_call(
        qualifier: Qualifier,
        name: impl Into<String>,
        arg_count: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind: CallKind::Call {
                qualifier,
                arg_count,
            },
            ..Self::call(name, arg_count, line, column)
        }
    }

    pub fn method_reference(
        qualifier: Qualifier,
        name: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind: CallKind::MethodReference { qualifier },
            ..Self::call(name, 0, line, column)
        }
    }

    pub fn inside(mut self, method_index: usize) -> Self {
        self.enclosing_method = Some(method_index);
        self
    }

    pub fn nested_in(mut self, site_index: usize) -> Self {
        self.parent = Some(site_index);
        self
    }

    pub fn is_method_reference(&self) -> bool {
        matches!(self.kind, CallKind::MethodReference { .. })
    }
}
