//! Operation enrichment - appends `hydra:operation` to JSON-LD item responses.
//!
//! A successfully produced single-item representation is augmented with the
//! full list of item-level operations declared for its resource type, making
//! the API self-documenting for generic clients:
//!
//! ```json
//! {
//!   "@id": "/api/widgets/7",
//!   "@type": "Widget",
//!   "hydra:operation": [
//!     { "@id": "/api/widgets/7", "@type": "hydra:Operation", "method": "GET",
//!       "title": "Retrieves a Widget resource", "returns": "Widget" }
//!   ]
//! }
//! ```

use heck::{AsSnakeCase, AsTitleCase};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::EnrichError;
use crate::path::{resolve_path, trailing_segment};
use crate::provider::ResourceMetadata;
use crate::types::{
    EnrichedOperation, Method, OperationDescriptor, OperationsConfig, ResolvedOperation,
    HYDRA_OPERATION_KEY, HYDRA_OPERATION_TYPE, ID_PLACEHOLDER, JSON_LD_CONTENT_TYPE,
    NO_CONTENT_MARKER,
};

/// Outcome of an enrichment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    /// The re-serialized body with the operation list attached.
    Enriched(String),
    /// An expected precondition did not hold; the body was left untouched.
    Skipped(SkipReason),
}

impl Enrichment {
    /// The enriched body, or `original` when enrichment was skipped.
    pub fn into_body(self, original: &str) -> String {
        match self {
            Enrichment::Enriched(body) => body,
            Enrichment::Skipped(_) => original.to_string(),
        }
    }
}

/// Why an item response was left unmodified.
///
/// Every variant is an expected outcome of the precondition chain, reported
/// so misconfiguration is observable instead of silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The pipeline is disabled by configuration.
    Disabled,
    /// The request did not resolve to a known API operation.
    NoApiOperation,
    /// The originating operation is not a GET.
    NotGet,
    /// The originating operation addresses a collection, not an item.
    NotItemOperation,
    /// The response is not declared as JSON-LD.
    NotJsonLd,
    /// The response body is empty.
    EmptyBody,
    /// The body is not a JSON object carrying `@id` and `@type`.
    MalformedBody,
    /// The resource type declares no item operations.
    NoItemOperations,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::Disabled => "pipeline disabled",
            SkipReason::NoApiOperation => "request did not resolve to a known API operation",
            SkipReason::NotGet => "originating operation is not a GET",
            SkipReason::NotItemOperation => "originating operation is not an item operation",
            SkipReason::NotJsonLd => "response is not JSON-LD",
            SkipReason::EmptyBody => "response body is empty",
            SkipReason::MalformedBody => "body is not an object with @id and @type",
            SkipReason::NoItemOperations => "no item operations declared for the resource type",
        };
        f.write_str(reason)
    }
}

/// Append the available item operations to a JSON-LD item response.
///
/// Preconditions are checked in order; the first that fails yields
/// `Ok(Skipped(reason))`. `operation` is `None` when the host could not
/// resolve the request to a known API operation. Re-running on enriched
/// output recomputes and overwrites the operation list, so a second pass is
/// a no-op rather than a duplication.
///
/// # Errors
///
/// `EnrichError::Provider` when the metadata lookup fails outright. Use
/// [`enrich_or_passthrough`] at a response boundary where failures must
/// degrade to the original body.
pub fn enrich_item_response<M>(
    operation: Option<&ResolvedOperation>,
    content_type: Option<&str>,
    body: &str,
    metadata: &M,
    config: &OperationsConfig,
) -> Result<Enrichment, EnrichError>
where
    M: ResourceMetadata + ?Sized,
{
    if !config.enabled {
        return Ok(Enrichment::Skipped(SkipReason::Disabled));
    }

    let Some(operation) = operation else {
        return Ok(Enrichment::Skipped(SkipReason::NoApiOperation));
    };

    if operation.method != Method::Get {
        return Ok(Enrichment::Skipped(SkipReason::NotGet));
    }

    if !operation.uri_template.contains(ID_PLACEHOLDER) {
        return Ok(Enrichment::Skipped(SkipReason::NotItemOperation));
    }

    if !content_type.is_some_and(|ct| ct.contains(JSON_LD_CONTENT_TYPE)) {
        return Ok(Enrichment::Skipped(SkipReason::NotJsonLd));
    }

    if body.is_empty() {
        return Ok(Enrichment::Skipped(SkipReason::EmptyBody));
    }

    let Ok(Value::Object(mut data)) = serde_json::from_str::<Value>(body) else {
        return Ok(Enrichment::Skipped(SkipReason::MalformedBody));
    };

    let has_identity = data.get("@id").is_some_and(|v| !v.is_null())
        && data.get("@type").is_some_and(|v| !v.is_null());
    if !has_identity {
        return Ok(Enrichment::Skipped(SkipReason::MalformedBody));
    }

    let resource_id = extract_resource_id(&data);
    let operations = item_operations(
        &operation.resource_type,
        resource_id.as_deref(),
        metadata,
        config,
    )?;

    if operations.is_empty() {
        debug!(
            resource_type = operation.resource_type.as_str(),
            "no item operations to attach"
        );
        return Ok(Enrichment::Skipped(SkipReason::NoItemOperations));
    }

    data.insert(
        HYDRA_OPERATION_KEY.to_string(),
        serde_json::to_value(&operations).map_err(|source| EnrichError::Serialize { source })?,
    );

    serde_json::to_string(&Value::Object(data))
        .map(Enrichment::Enriched)
        .map_err(|source| EnrichError::Serialize { source })
}

/// Boundary wrapper for [`enrich_item_response`]: any failure degrades to
/// the original body, so enrichment can never break the response.
pub fn enrich_or_passthrough<M>(
    operation: Option<&ResolvedOperation>,
    content_type: Option<&str>,
    body: &str,
    metadata: &M,
    config: &OperationsConfig,
) -> String
where
    M: ResourceMetadata + ?Sized,
{
    match enrich_item_response(operation, content_type, body, metadata, config) {
        Ok(enrichment) => enrichment.into_body(body),
        Err(err) => {
            warn!(%err, "operation enrichment failed, returning original response");
            body.to_string()
        }
    }
}

/// The resource identifier: explicit `id` field first, else the trailing
/// segment of the `@id` URL.
fn extract_resource_id(data: &Map<String, Value>) -> Option<String> {
    match data.get("id") {
        Some(Value::String(id)) if !id.is_empty() => return Some(id.clone()),
        Some(Value::Number(id)) => return Some(id.to_string()),
        _ => {}
    }

    data.get("@id")
        .and_then(Value::as_str)
        .and_then(trailing_segment)
        .map(str::to_string)
}

/// Build the enriched entries for every item operation of `resource_type`,
/// in descriptor and declaration order.
fn item_operations<M>(
    resource_type: &str,
    resource_id: Option<&str>,
    metadata: &M,
    config: &OperationsConfig,
) -> Result<Vec<EnrichedOperation>, EnrichError>
where
    M: ResourceMetadata + ?Sized,
{
    let mut enriched = Vec::new();

    for descriptor in metadata.describe(resource_type)? {
        for operation in &descriptor.operations {
            if !operation.is_item() {
                continue;
            }

            let url = resolve_path(
                &descriptor.route_prefix,
                &operation.uri_template,
                &config.api_prefix,
                resource_id,
            );

            let title = operation
                .description
                .clone()
                .unwrap_or_else(|| generate_title(operation));

            let (expects, returns) = if operation.method.is_write() {
                (Some(operation.short_name.clone()), None)
            } else if operation.method == Method::Delete {
                (None, Some(NO_CONTENT_MARKER.to_string()))
            } else {
                (None, Some(operation.short_name.clone()))
            };

            enriched.push(EnrichedOperation {
                id: url,
                kind: HYDRA_OPERATION_TYPE.to_string(),
                method: operation.method,
                title,
                expects,
                returns,
            });
        }
    }

    Ok(enriched)
}

/// Generate a title for an operation with no declared description.
///
/// Router-generated names of standard CRUD operations embed the URI template
/// (an `{id}` placeholder or a path separator); anything else is a custom
/// named operation, e.g. `api_configuration_health`, whose name becomes the
/// title once the type-name prefix is stripped.
fn generate_title(operation: &OperationDescriptor) -> String {
    let name = &operation.name;
    let standard = name.contains(ID_PLACEHOLDER) || name.contains('/');

    if !standard && !name.is_empty() {
        let prefix = format!("{}_", AsSnakeCase(operation.short_name.as_str()));
        let custom = name.replace(&prefix, "");
        return AsTitleCase(custom.as_str()).to_string();
    }

    match operation.method {
        Method::Get => format!("Retrieves a {} resource", operation.short_name),
        Method::Put => format!("Replaces the {} resource", operation.short_name),
        Method::Patch => format!("Updates the {} resource", operation.short_name),
        Method::Delete => format!("Deletes the {} resource", operation.short_name),
        Method::Post => format!("Creates a {} resource", operation.short_name),
    }
}
