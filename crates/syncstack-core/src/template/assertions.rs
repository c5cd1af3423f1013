//! Template assertions for tests.
//!
//! `has_resource_properties` passes when at least one resource of the given
//! type matches the expected properties. Objects match partially (extra keys
//! in the template are ignored, at any depth); arrays and scalars must match
//! exactly.

use serde_json::Value;

use super::Template;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    #[error("template has no resources of type {0}")]
    NoResourcesOfType(String),

    #[error("none of the {candidates} {resource_type} resources match; first mismatch at {path}")]
    NoMatch {
        resource_type: String,
        candidates: usize,
        path: String,
    },

    #[error("expected {expected} {resource_type} resources, found {actual}")]
    CountMismatch {
        resource_type: String,
        expected: usize,
        actual: usize,
    },
}

pub fn has_resource_properties(
    template: &Template,
    resource_type: &str,
    expected: &Value,
) -> Result<(), AssertionError> {
    let mut candidates = 0;
    let mut first_mismatch = None;

    for (_, resource) in template.resources_of_type(resource_type) {
        candidates += 1;
        match mismatch(&resource.properties, expected, "Properties") {
            None => return Ok(()),
            Some(path) => {
                first_mismatch.get_or_insert(path);
            }
        }
    }

    match first_mismatch {
        None => Err(AssertionError::NoResourcesOfType(resource_type.to_string())),
        Some(path) => Err(AssertionError::NoMatch {
            resource_type: resource_type.to_string(),
            candidates,
            path,
        }),
    }
}

pub fn resource_count_is(
    template: &Template,
    resource_type: &str,
    expected: usize,
) -> Result<(), AssertionError> {
    let actual = template.resources_of_type(resource_type).count();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::CountMismatch {
            resource_type: resource_type.to_string(),
            expected,
            actual,
        })
    }
}

/// Returns the path of the first mismatch, if any.
fn mismatch(actual: &Value, expected: &Value, path: &str) -> Option<String> {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => {
            expected.iter().find_map(|(key, want)| {
                let child = format!("{path}.{key}");
                match actual.get(key) {
                    Some(got) => mismatch(got, want, &child),
                    None => Some(child),
                }
            })
        }
        (Value::Array(actual), Value::Array(expected)) => {
            if actual.len() != expected.len() {
                return Some(format!("{path}[len]"));
            }
            actual
                .iter()
                .zip(expected)
                .enumerate()
                .find_map(|(i, (got, want))| mismatch(got, want, &format!("{path}[{i}]")))
        }
        (got, want) if got == want => None,
        _ => Some(path.to_string()),
    }
}
