//! Schema decoration - merges relation extensions into input schemas.
//!
//! For every property the upstream schema generator marked `iri-reference`,
//! the decorator looks up the association target, resolves its collection
//! endpoint and label property, and merges the five `x-*` rendering keys
//! into the property node:
//!
//! ```json
//! {
//!   "customer": {
//!     "type": ["string", "null"],
//!     "format": "iri-reference",
//!     "x-collection": "/api/admin/customers",
//!     "x-label-property": "name",
//!     "x-value-property": "@id",
//!     "x-search-property": "name",
//!     "x-resource-class": "Customer"
//!   }
//! }
//! ```
//!
//! Non-input schemas and unknown types pass through unchanged.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::EnrichError;
use crate::label::infer_label_property;
use crate::path::resolve_path;
use crate::provider::{EntityIntrospector, ResourceMetadata};
use crate::types::{
    DecoratorConfig, Method, RelationExtensions, ResourceDescriptor, SchemaDirection,
    IRI_REFERENCE_FORMAT,
};

/// Builds a JSON Schema for a resource type.
///
/// The capability seam for decorator composition: hosts expose their schema
/// generator behind this trait and wrap it in [`RelationDecorator`].
pub trait SchemaBuilder {
    fn build_schema(&self, type_id: &str, direction: SchemaDirection) -> Value;
}

/// Wraps a base [`SchemaBuilder`] and post-processes its output with
/// [`decorate_schema`].
///
/// Provider failures are logged and swallowed at this seam so a broken
/// metadata backend can never break schema generation.
#[derive(Debug)]
pub struct RelationDecorator<B, M, I> {
    base: B,
    metadata: M,
    introspector: I,
    config: DecoratorConfig,
}

impl<B, M, I> RelationDecorator<B, M, I>
where
    B: SchemaBuilder,
    M: ResourceMetadata,
    I: EntityIntrospector,
{
    pub fn new(base: B, metadata: M, introspector: I, config: DecoratorConfig) -> Self {
        Self {
            base,
            metadata,
            introspector,
            config,
        }
    }
}

impl<B, M, I> SchemaBuilder for RelationDecorator<B, M, I>
where
    B: SchemaBuilder,
    M: ResourceMetadata,
    I: EntityIntrospector,
{
    fn build_schema(&self, type_id: &str, direction: SchemaDirection) -> Value {
        let schema = self.base.build_schema(type_id, direction);
        match decorate_schema(
            &schema,
            type_id,
            direction,
            &self.metadata,
            &self.introspector,
            &self.config,
        ) {
            Ok(decorated) => decorated,
            Err(err) => {
                warn!(type_id, %err, "schema decoration failed, returning base schema");
                schema
            }
        }
    }
}

/// Decorate a built schema with relation extensions.
///
/// Both the top-level `properties` map and the `properties` map of every
/// named entry under `definitions` or `$defs` are processed identically.
/// The schema passes through unchanged when the decorator is disabled, the
/// direction is not [`SchemaDirection::Input`], or `type_id` is not a known
/// persistent entity.
///
/// # Errors
///
/// `EnrichError::Provider` when a metadata lookup fails outright; expected
/// absences (non-association property, unexposed target, no collection
/// operation) leave the affected property untouched instead.
pub fn decorate_schema<M, I>(
    schema: &Value,
    type_id: &str,
    direction: SchemaDirection,
    metadata: &M,
    introspector: &I,
    config: &DecoratorConfig,
) -> Result<Value, EnrichError>
where
    M: ResourceMetadata + ?Sized,
    I: EntityIntrospector + ?Sized,
{
    if !config.enabled {
        return Ok(schema.clone());
    }

    if direction != SchemaDirection::Input {
        debug!(type_id, ?direction, "skipping decoration for non-input schema");
        return Ok(schema.clone());
    }

    if introspector.fields_of(type_id)?.is_none() {
        debug!(type_id, "not a known entity type, skipping decoration");
        return Ok(schema.clone());
    }

    let mut decorated = schema.clone();
    let Some(root) = decorated.as_object_mut() else {
        return Ok(decorated);
    };

    if let Some(Value::Object(properties)) = root.get_mut("properties") {
        decorate_properties(properties, type_id, metadata, introspector, config)?;
    }

    for defs_key in ["definitions", "$defs"] {
        if let Some(Value::Object(definitions)) = root.get_mut(defs_key) {
            for (name, definition) in definitions.iter_mut() {
                let Some(Value::Object(properties)) = definition.get_mut("properties") else {
                    debug!(type_id, definition = name.as_str(), "definition has no properties");
                    continue;
                };
                decorate_properties(properties, type_id, metadata, introspector, config)?;
            }
        }
    }

    Ok(decorated)
}

/// Merge relation extensions into every eligible property of one map.
fn decorate_properties<M, I>(
    properties: &mut Map<String, Value>,
    type_id: &str,
    metadata: &M,
    introspector: &I,
    config: &DecoratorConfig,
) -> Result<(), EnrichError>
where
    M: ResourceMetadata + ?Sized,
    I: EntityIntrospector + ?Sized,
{
    for (name, node) in properties.iter_mut() {
        // Eligibility marker set by the upstream schema generator.
        if node.get("format").and_then(Value::as_str) != Some(IRI_REFERENCE_FORMAT) {
            continue;
        }

        debug!(type_id, property = name.as_str(), "found iri-reference property");

        let Some(extensions) =
            relation_extensions(type_id, name, metadata, introspector, config)?
        else {
            continue;
        };

        if let Some(node) = node.as_object_mut() {
            debug!(type_id, property = name.as_str(), "merging relation extensions");
            extensions.merge_into(node);
        }
    }

    Ok(())
}

/// Derive the relation extensions for one property, if derivable.
///
/// `None` when the property is not an association, the target has no type
/// identifier, or no collection operation is declared for the target.
pub fn relation_extensions<M, I>(
    type_id: &str,
    property: &str,
    metadata: &M,
    introspector: &I,
    config: &DecoratorConfig,
) -> Result<Option<RelationExtensions>, EnrichError>
where
    M: ResourceMetadata + ?Sized,
    I: EntityIntrospector + ?Sized,
{
    if !introspector.is_association(type_id, property)? {
        debug!(type_id, property, "not an association");
        return Ok(None);
    }

    let Some(target) = introspector.association_target(type_id, property)? else {
        debug!(type_id, property, "association has no target type");
        return Ok(None);
    };

    let descriptors = metadata.describe(&target)?;
    let Some((collection, resource_class)) = collection_endpoint(&descriptors, &config.api_prefix)
    else {
        debug!(
            type_id,
            property,
            target = target.as_str(),
            "no collection operation for target"
        );
        return Ok(None);
    };

    let label = infer_label_property(introspector, &target, &config.label_candidates);

    Ok(Some(RelationExtensions {
        collection,
        search_property: label.clone(),
        label_property: label,
        resource_class,
    }))
}

/// First GET collection operation across the descriptors, as
/// `(collection path, target short name)`.
fn collection_endpoint(
    descriptors: &[ResourceDescriptor],
    api_prefix: &str,
) -> Option<(String, String)> {
    for descriptor in descriptors {
        for operation in &descriptor.operations {
            if operation.method == Method::Get && operation.is_collection() {
                let path = resolve_path(
                    &descriptor.route_prefix,
                    &operation.uri_template,
                    api_prefix,
                    None,
                );
                return Some((path, operation.short_name.clone()));
            }
        }
    }
    None
}
