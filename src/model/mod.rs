//! Class model: raw declarations from the source-model provider and the
//! immutable method records derived from them.

pub mod accessor;
pub mod class;
pub mod declaration;
pub mod signature;

pub use accessor::{AccessorKind, PropertyAccessor};
pub use class::{ClassModel, Method, MethodId};
pub use declaration::{
    Accessibility, CallKind, CallSite, ClassDeclaration, MethodDeclaration, Parameter, Qualifier,
    ReturnType,
};
