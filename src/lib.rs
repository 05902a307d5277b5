// Export modules for library usage
pub mod config;
pub mod consumer;
pub mod errors;
pub mod graph;
pub mod model;
pub mod ordering;
pub mod pipeline;
pub mod reorder;
pub mod resolution;
pub mod scoring;

// Re-export commonly used types
pub use crate::config::{load_config, MethodOrderConfig, PenaltyWeights};

pub use crate::consumer::{DependencyInformationConsumer, Violation, ViolationReporter};

pub use crate::errors::{Error, Result};

pub use crate::graph::{Dependencies, DependencyGraph, MethodGroups, MethodInvocation};

pub use crate::model::{
    Accessibility, CallKind, CallSite, ClassDeclaration, ClassModel, Method, MethodDeclaration,
    MethodId, Parameter, Qualifier, ReturnType,
};

pub use crate::ordering::{MisplacedMethod, Ordering};

pub use crate::pipeline::{analyze_all, analyze_class, ClassReport};

pub use crate::reorder::Reorderer;

pub use crate::resolution::{CallResolver, ResolvedCall};

pub use crate::scoring::{PenaltyBreakdown, PenaltyScorer};
