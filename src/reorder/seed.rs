//! Choice of the method a round's linearization starts from

use crate::model::{Method, MethodId};
use crate::ordering::Ordering;

fn parameter_count(method: &Method) -> usize {
    method.arg_count() + usize::from(method.is_variable_arity())
}

/// The constructor with fewest parameters, else the method with the most
/// distinct dependencies, else the first declared method. Ties go to the
/// method that comes first in the current order.
pub fn select_seed(ordering: &Ordering) -> Option<MethodId> {
    let constructor = ordering
        .methods()
        .filter(|method| method.is_constructor())
        .min_by_key(|method| parameter_count(method));
    if let Some(constructor) = constructor {
        return Some(constructor.id());
    }

    // first of the equally busy methods wins
    let busiest = ordering
        .methods()
        .map(|method| (ordering.dependencies_in_appearance_order(method.id()).len(), method))
        .filter(|(dependencies, _)| *dependencies > 0)
        .fold(None, |best: Option<(usize, &Method)>, (count, method)| match best {
            Some((best_count, _)) if best_count >= count => best,
            _ => Some((count, method)),
        });
    if let Some((_, method)) = busiest {
        return Some(method.id());
    }

    ordering.initial_methods().first().map(Method::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dependencies;
    use crate::model::{CallSite, ClassDeclaration, MethodDeclaration, Parameter};

    fn ordering(methods: Vec<MethodDeclaration>, call_sites: Vec<CallSite>) -> Ordering {
        let mut class = ClassDeclaration::new("Seed");
        class.methods = methods;
        class.call_sites = call_sites;
        Dependencies::build(&class).unwrap().initial_ordering()
    }

    #[test]
    fn test_constructor_with_fewest_parameters() {
        let ordering = ordering(
            vec![
                MethodDeclaration::new("run", 1, 2),
                MethodDeclaration::constructor("Seed", 3, 4)
                    .with_parameters(vec![Parameter::new("int"), Parameter::new("int")]),
                MethodDeclaration::constructor("Seed", 5, 6)
                    .with_parameters(vec![Parameter::new("int")]),
                MethodDeclaration::constructor("Seed", 7, 8)
                    .with_parameters(vec![Parameter::new("long")]),
            ],
            vec![],
        );
        assert_eq!(select_seed(&ordering), Some(MethodId(2)));
    }

    #[test]
    fn test_method_with_most_dependencies() {
        let ordering = ordering(
            vec![
                MethodDeclaration::new("a", 1, 5),
                MethodDeclaration::new("b", 6, 10),
                MethodDeclaration::new("c", 11, 15),
                MethodDeclaration::new("d", 16, 20),
            ],
            vec![
                CallSite::call("d", 0, 2, 1).inside(0),
                CallSite::call("c", 0, 7, 1).inside(1),
                CallSite::call("d", 0, 8, 1).inside(1),
                CallSite::call("a", 0, 12, 1).inside(2),
                CallSite::call("b", 0, 13, 1).inside(2),
            ],
        );
        // b and c both have two dependencies; b comes first
        assert_eq!(select_seed(&ordering), Some(MethodId(1)));

        let moved = ordering.move_method_by(MethodId(2), -2).unwrap();
        assert_eq!(select_seed(&moved), Some(MethodId(2)));
    }

    #[test]
    fn test_first_declared_method_without_dependencies() {
        let ordering = ordering(
            vec![MethodDeclaration::new("x", 1, 2), MethodDeclaration::new("y", 3, 4)],
            vec![],
        );
        let moved = ordering.move_method_by(MethodId(1), -1).unwrap();
        assert_eq!(select_seed(&moved), Some(MethodId(0)));
    }
}
