//! Deterministic method signature rendering
//!
//! A signature is the method name followed by the comma-joined parameter
//! types in parentheses: `process(List,int[],String...)`. Generic arguments,
//! package qualification, annotations and `final` never reach the output.

use super::declaration::Parameter;

/// Render the signature for `name` with the given parameters
pub fn render_signature(name: &str, parameters: &[Parameter]) -> String {
    let parameters_text: Vec<String> = parameters.iter().map(render_parameter_type).collect();
    format!("{}({})", name, parameters_text.join(","))
}

/// Render one parameter type as it appears inside a signature
pub fn render_parameter_type(parameter: &Parameter) -> String {
    let (base, written_dimensions) = split_array_suffix(&strip_generic_arguments(
        &parameter.type_name,
    ));
    let mut type_name = simple_type_name(&base);
    for _ in 0..(parameter.array_dimensions + written_dimensions) {
        type_name.push_str("[]");
    }
    if parameter.variable_arity || base.trim_end().ends_with("...") {
        type_name.push_str("...");
    }
    type_name
}

/// Declared minimum argument count: the variable-arity parameter is optional
pub fn declared_arg_count(parameters: &[Parameter]) -> usize {
    if is_variable_arity(parameters) {
        parameters.len() - 1
    } else {
        parameters.len()
    }
}

/// Only the last parameter can be variable-arity
pub fn is_variable_arity(parameters: &[Parameter]) -> bool {
    parameters
        .last()
        .map(|p| p.variable_arity || p.type_name.trim_end().ends_with("..."))
        .unwrap_or(false)
}

fn strip_generic_arguments(type_text: &str) -> String {
    let mut depth = 0usize;
    let mut result = String::with_capacity(type_text.len());
    for c in type_text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => result.push(c),
            _ => {}
        }
    }
    result
}

/// Strip trailing `[]` pairs, returning the remaining text and their count
fn split_array_suffix(type_text: &str) -> (String, usize) {
    let mut text = type_text.trim_end().to_string();
    let mut dimensions = 0;
    loop {
        let trimmed = text.trim_end();
        if let Some(rest) = trimmed.strip_suffix(']') {
            if let Some(rest) = rest.trim_end().strip_suffix('[') {
                text = rest.to_string();
                dimensions += 1;
                continue;
            }
        }
        break;
    }
    (text, dimensions)
}

/// Last dotted segment of the type word, ignoring modifiers and annotations
fn simple_type_name(type_text: &str) -> String {
    type_text
        .trim_end_matches("...")
        .split_whitespace()
        .filter(|word| *word != "final" && !word.starts_with('@'))
        .last()
        .map(|word| word.rsplit('.').next().unwrap_or(word).to_string())
        .unwrap_or_default()
}
