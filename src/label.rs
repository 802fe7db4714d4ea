//! Label-property inference for relation targets.

use tracing::{debug, warn};

use crate::provider::EntityIntrospector;

/// Identifier field skipped by the text-field fallback.
const ID_FIELD: &str = "id";

/// Last-resort label when no candidate list is configured.
const FALLBACK_LABEL: &str = "name";

/// Pick the property to display as the human-readable label of `type_id`.
///
/// Priority: the first configured candidate declared on the type, then the
/// first declared non-`id` text field, then the first candidate
/// unconditionally. The second step follows the introspector's declaration
/// order, which is best-effort: providers without a stable field order may
/// produce a different (but still usable) fallback label.
///
/// Never fails; unknown types and provider failures degrade to the default,
/// because the label is advisory rather than load-bearing.
pub fn infer_label_property<I>(introspector: &I, type_id: &str, candidates: &[String]) -> String
where
    I: EntityIntrospector + ?Sized,
{
    let default = || {
        candidates
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_LABEL)
            .to_string()
    };

    let fields = match introspector.fields_of(type_id) {
        Ok(Some(fields)) => fields,
        Ok(None) => {
            debug!(type_id, "label inference: unknown type, using default");
            return default();
        }
        Err(err) => {
            warn!(type_id, %err, "label inference: introspection failed, using default");
            return default();
        }
    };

    for candidate in candidates {
        if fields.iter().any(|f| &f.name == candidate) {
            return candidate.clone();
        }
    }

    if let Some(field) = fields.iter().find(|f| f.name != ID_FIELD && f.is_text) {
        return field.name.clone();
    }

    default()
}
