//! Consumers of per-class dependency information

use crate::config::MethodOrderConfig;
use crate::graph::Dependencies;
use crate::ordering::MisplacedMethod;
use crate::reorder::Reorderer;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Receives the dependency information of every analysed class
pub trait DependencyInformationConsumer {
    fn accept(&mut self, file_path: &Path, dependencies: &Dependencies) -> anyhow::Result<()>;
}

/// A method that is declared away from its recommended position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub file: PathBuf,
    pub class: String,
    pub signature: String,
    /// Declaration line in the analysed file
    pub line: usize,
    /// Positions to move: positive is up, negative is down
    pub shift: isize,
}

impl Violation {
    fn new(file: &Path, class: &str, misplaced: MisplacedMethod) -> Self {
        Self {
            file: file.to_path_buf(),
            class: class.to_string(),
            signature: misplaced.signature,
            line: misplaced.line,
            shift: misplaced.shift,
        }
    }

    pub fn message(&self) -> String {
        let distance = self.shift.unsigned_abs();
        let direction = if self.shift > 0 { "up" } else { "down" };
        let positions = if distance == 1 { "position" } else { "positions" };
        format!(
            "method '{}' should be moved {} {} {}",
            self.signature, distance, positions, direction
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.message())
    }
}

/// Reorders every class and records the first misplaced method, if any
pub struct ViolationReporter {
    reorderer: Reorderer,
    violations: Vec<Violation>,
}

impl Default for ViolationReporter {
    fn default() -> Self {
        Self::new(&MethodOrderConfig::default())
    }
}

impl ViolationReporter {
    pub fn new(config: &MethodOrderConfig) -> Self {
        Self {
            reorderer: Reorderer::new(config),
            violations: Vec::new(),
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl DependencyInformationConsumer for ViolationReporter {
    fn accept(&mut self, file_path: &Path, dependencies: &Dependencies) -> anyhow::Result<()> {
        let initial = dependencies.initial_ordering();
        let optimized = self.reorderer.reorder(&initial)?;
        if let Some(misplaced) = optimized.first_misplaced_method() {
            let violation = Violation::new(file_path, dependencies.class().name(), misplaced);
            tracing::info!(
                file = %file_path.display(),
                method = %violation.signature,
                shift = violation.shift,
                "Found misplaced method"
            );
            self.violations.push(violation);
        }
        Ok(())
    }
}
