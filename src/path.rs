//! URL and path resolution shared by both enrichment pipelines.

use crate::types::{FORMAT_PLACEHOLDER, ID_PLACEHOLDER};

/// Build the externally-addressable path for an operation.
///
/// Fixed order: join route prefix and URI template with exactly one slash,
/// drop the `{._format}` placeholder, prepend `api_prefix` unless the path
/// already starts with it, then substitute every `{id}` occurrence when an
/// identifier is supplied.
///
/// Deterministic and idempotent: feeding the output back in with an empty
/// route prefix returns it unchanged.
pub fn resolve_path(
    route_prefix: &str,
    uri_template: &str,
    api_prefix: &str,
    id: Option<&str>,
) -> String {
    let mut path = format!(
        "{}/{}",
        route_prefix.trim_end_matches('/'),
        uri_template.trim_start_matches('/')
    );

    if path.contains(FORMAT_PLACEHOLDER) {
        path = path.replace(FORMAT_PLACEHOLDER, "");
    }

    if !path.starts_with(api_prefix) {
        path = format!("{}{}", api_prefix, path);
    }

    if let Some(id) = id {
        if path.contains(ID_PLACEHOLDER) {
            path = path.replace(ID_PLACEHOLDER, id);
        }
    }

    path
}

/// Extract the trailing path segment of an identifier URL.
///
/// `"/api/widgets/7"` yields `Some("7")`; inputs without a slash or ending
/// in one yield `None`.
pub fn trailing_segment(iri: &str) -> Option<&str> {
    let (_, last) = iri.rsplit_once('/')?;
    if last.is_empty() {
        None
    } else {
        Some(last)
    }
}
