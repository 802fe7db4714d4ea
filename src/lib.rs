//! API Metadata Enrichment
//!
//! Enriches machine-readable API descriptions with derived metadata about
//! inter-resource relationships and available operations, so that generic
//! API consumers (admin UIs, form generators) can render relation pickers
//! and operation affordances without hardcoded knowledge of the resource
//! graph.
//!
//! Two stateless pipelines share one URL-resolution core:
//!
//! - **Schema decoration** ([`decorate_schema`]) merges five `x-*` rendering
//!   keys into every `iri-reference` property of an input-direction JSON
//!   Schema.
//! - **Operation enrichment** ([`enrich_item_response`]) appends a
//!   `hydra:operation` array to a JSON-LD single-item response.
//!
//! Host metadata is supplied through the [`ResourceMetadata`] and
//! [`EntityIntrospector`] traits; [`Registry`] is a declarative in-memory
//! implementation of both.
//!
//! # Example
//!
//! ```
//! use api_enrich::{
//!     decorate_schema, DecoratorConfig, FieldDef, Method, OperationDescriptor,
//!     Registry, ResourceDescriptor, ResourceEntry, SchemaDirection,
//! };
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.insert(
//!     "app.Order",
//!     ResourceEntry {
//!         fields: vec![
//!             FieldDef { name: "id".into(), text: false, association: None },
//!             FieldDef {
//!                 name: "customer".into(),
//!                 text: false,
//!                 association: Some("app.Customer".into()),
//!             },
//!         ],
//!         descriptors: vec![],
//!     },
//! );
//! registry.insert(
//!     "app.Customer",
//!     ResourceEntry {
//!         fields: vec![
//!             FieldDef { name: "id".into(), text: false, association: None },
//!             FieldDef { name: "name".into(), text: true, association: None },
//!         ],
//!         descriptors: vec![ResourceDescriptor {
//!             route_prefix: "/admin".into(),
//!             operations: vec![OperationDescriptor {
//!                 method: Method::Get,
//!                 uri_template: "/customers{._format}".into(),
//!                 name: "_api_/admin/customers{._format}_get_collection".into(),
//!                 description: None,
//!                 short_name: "Customer".into(),
//!             }],
//!         }],
//!     },
//! );
//!
//! let schema = json!({
//!     "properties": {
//!         "customer": { "type": ["string", "null"], "format": "iri-reference" }
//!     }
//! });
//!
//! let decorated = decorate_schema(
//!     &schema,
//!     "app.Order",
//!     SchemaDirection::Input,
//!     &registry,
//!     &registry,
//!     &DecoratorConfig::default(),
//! )
//! .unwrap();
//!
//! let customer = &decorated["properties"]["customer"];
//! assert_eq!(customer["x-collection"], "/api/admin/customers");
//! assert_eq!(customer["x-label-property"], "name");
//! assert_eq!(customer["x-value-property"], "@id");
//! ```
//!
//! # Error philosophy
//!
//! Enrichment is additive and advisory. Expected absences (non-input
//! schemas, unknown types, skipped responses) surface as unchanged values or
//! [`Enrichment::Skipped`]; genuine provider failures surface as typed
//! errors so misconfiguration stays observable, and the boundary adapters
//! ([`RelationDecorator`], [`enrich_or_passthrough`]) convert them back to
//! pass-through so a failure can never break the underlying response.

mod decorator;
mod error;
mod label;
mod loader;
mod operations;
mod path;
mod provider;
mod registry;
mod types;

pub use decorator::{decorate_schema, relation_extensions, RelationDecorator, SchemaBuilder};
pub use error::{EnrichError, LoadError, ProviderError};
pub use label::infer_label_property;
pub use loader::{load_json, load_registry, read_text};
pub use operations::{enrich_item_response, enrich_or_passthrough, Enrichment, SkipReason};
pub use path::{resolve_path, trailing_segment};
pub use provider::{EntityIntrospector, FieldInfo, ResourceMetadata};
pub use registry::{FieldDef, Registry, ResourceEntry};
pub use types::{
    DecoratorConfig, EnrichConfig, EnrichedOperation, Method, OperationDescriptor,
    OperationsConfig, RelationExtensions, ResolvedOperation, ResourceDescriptor, SchemaDirection,
    DEFAULT_API_PREFIX, DEFAULT_LABEL_CANDIDATES, FORMAT_PLACEHOLDER, HYDRA_OPERATION_KEY,
    HYDRA_OPERATION_TYPE, ID_PLACEHOLDER, IRI_REFERENCE_FORMAT, JSON_LD_CONTENT_TYPE,
    NO_CONTENT_MARKER, VALUE_PROPERTY, X_COLLECTION, X_LABEL_PROPERTY, X_RESOURCE_CLASS,
    X_SEARCH_PROPERTY, X_VALUE_PROPERTY,
};
