//! Entry points running the analysis for one or many classes

use crate::config::MethodOrderConfig;
use crate::consumer::{DependencyInformationConsumer, Violation, ViolationReporter};
use crate::errors::{Error, Result};
use crate::graph::Dependencies;
use crate::model::ClassDeclaration;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info_span;

/// Build the dependency information of one class and hand it to `consumer`
pub fn analyze_class(
    file_path: &Path,
    declaration: &ClassDeclaration,
    consumer: &mut dyn DependencyInformationConsumer,
) -> Result<()> {
    let _span = info_span!(
        "analyze_class",
        file = %file_path.display(),
        class = %declaration.name
    )
    .entered();
    let dependencies = Dependencies::build(declaration)?;
    consumer.accept(file_path, &dependencies).map_err(Error::from)
}

/// Outcome of analysing one class in a batch
#[derive(Debug)]
pub struct ClassReport {
    pub file: PathBuf,
    pub class: String,
    pub result: Result<Option<Violation>>,
}

/// Analyse many classes in parallel, each with its own reporter.
/// A malformed class yields an error entry and does not stop the others.
pub fn analyze_all(
    classes: &[(PathBuf, ClassDeclaration)],
    config: &MethodOrderConfig,
) -> Vec<ClassReport> {
    let _span = info_span!("analyze_all", classes = classes.len()).entered();
    classes
        .par_iter()
        .map(|(file, declaration)| {
            let mut reporter = ViolationReporter::new(config);
            let result = analyze_class(file, declaration, &mut reporter)
                .map(|()| reporter.into_violations().into_iter().next());
            ClassReport {
                file: file.clone(),
                class: declaration.name.clone(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallSite, MethodDeclaration};

    struct Recorder {
        seen: Vec<(PathBuf, usize)>,
    }

    impl DependencyInformationConsumer for Recorder {
        fn accept(&mut self, file_path: &Path, dependencies: &Dependencies) -> anyhow::Result<()> {
            self.seen
                .push((file_path.to_path_buf(), dependencies.graph().calls().len()));
            Ok(())
        }
    }

    struct Failing;

    impl DependencyInformationConsumer for Failing {
        fn accept(&mut self, _: &Path, _: &Dependencies) -> anyhow::Result<()> {
            anyhow::bail!("consumer is closed")
        }
    }

    fn class() -> ClassDeclaration {
        let mut class = ClassDeclaration::new("Job");
        class.methods = vec![
            MethodDeclaration::new("run", 1, 4),
            MethodDeclaration::new("prepare", 5, 8),
        ];
        class.call_sites = vec![CallSite::call("prepare", 0, 2, 5).inside(0)];
        class
    }

    #[test]
    fn test_consumer_receives_dependencies() {
        let mut recorder = Recorder { seen: Vec::new() };
        analyze_class(Path::new("Job.java"), &class(), &mut recorder).unwrap();
        assert_eq!(recorder.seen, vec![(PathBuf::from("Job.java"), 1)]);
    }

    #[test]
    fn test_consumer_errors_are_propagated() {
        let err = analyze_class(Path::new("Job.java"), &class(), &mut Failing).unwrap_err();
        assert!(matches!(err, Error::External(_)));
        assert_eq!(err.to_string(), "consumer is closed");
    }

    #[test]
    fn test_analyze_all_keeps_going_after_invalid_class() {
        let mut broken = class();
        broken.methods[1].end_line = 2;
        let classes = vec![
            (PathBuf::from("Broken.java"), broken),
            (PathBuf::from("Job.java"), class()),
        ];
        let reports = analyze_all(&classes, &MethodOrderConfig::default());
        assert_eq!(reports.len(), 2);
        assert!(matches!(reports[0].result, Err(Error::InvalidModel { .. })));
        assert!(matches!(reports[1].result, Ok(None)));
    }
}
