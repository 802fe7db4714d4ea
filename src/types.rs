//! Core types for API metadata enrichment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema format marker the upstream schema generator emits for relation fields.
pub const IRI_REFERENCE_FORMAT: &str = "iri-reference";

/// Value property advertised to relation pickers; always the JSON-LD identifier.
pub const VALUE_PROPERTY: &str = "@id";

/// Key under which the enriched operation list is attached to a response.
pub const HYDRA_OPERATION_KEY: &str = "hydra:operation";

/// `@type` of every enriched operation entry.
pub const HYDRA_OPERATION_TYPE: &str = "hydra:Operation";

/// Content type marker identifying JSON-LD responses.
pub const JSON_LD_CONTENT_TYPE: &str = "application/ld+json";

/// Identifier placeholder in URI templates; its presence makes an operation
/// an item operation.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Trailing format placeholder stripped during path resolution.
pub const FORMAT_PLACEHOLDER: &str = "{._format}";

/// Return marker for operations that produce no content.
pub const NO_CONTENT_MARKER: &str = "owl:Nothing";

/// Default API path prefix shared by both pipelines.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Default label-property candidates, in priority order.
pub const DEFAULT_LABEL_CANDIDATES: &[&str] = &["name", "title", "label", "displayName"];

/// Schema keys carrying the relation extensions.
pub const X_COLLECTION: &str = "x-collection";
pub const X_LABEL_PROPERTY: &str = "x-label-property";
pub const X_VALUE_PROPERTY: &str = "x-value-property";
pub const X_SEARCH_PROPERTY: &str = "x-search-property";
pub const X_RESOURCE_CLASS: &str = "x-resource-class";

/// HTTP method of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Parse a method name, case-insensitively.
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    /// Write methods carry an `expects` type reference when enriched.
    pub fn is_write(&self) -> bool {
        matches!(self, Method::Put | Method::Patch | Method::Post)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction a schema is built for.
///
/// Only input (write/form) schemas are decorated; output and other
/// directions pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDirection {
    Input,
    Output,
    Other,
}

impl SchemaDirection {
    /// Parse a direction name from configuration or CLI input.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "input" => Some(SchemaDirection::Input),
            "output" => Some(SchemaDirection::Output),
            "other" => Some(SchemaDirection::Other),
            _ => None,
        }
    }
}

/// A single route-level operation declared for a resource type.
///
/// Supplied entirely by the metadata provider; the enrichment engine never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub method: Method,
    /// URI template, with `{id}` for item operations and an optional
    /// trailing `{._format}` placeholder.
    pub uri_template: String,
    /// Internal operation name as registered by the host's router.
    #[serde(default)]
    pub name: String,
    /// Human description; used verbatim as the operation title when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Short name of the resource type the operation serves.
    pub short_name: String,
}

impl OperationDescriptor {
    /// Item operations address one specific instance; their URI template
    /// carries the `{id}` placeholder.
    pub fn is_item(&self) -> bool {
        self.uri_template.contains(ID_PLACEHOLDER)
    }

    /// Collection operations address the set of instances of a type.
    pub fn is_collection(&self) -> bool {
        !self.is_item()
    }
}

/// One configured variant of a resource type, with its operations in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Route prefix applied to every operation of this variant; possibly empty.
    #[serde(default)]
    pub route_prefix: String,
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

/// What the host's routing layer knows about the operation that produced a
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    pub method: Method,
    pub uri_template: String,
    /// Type identifier of the resource class the operation serves.
    pub resource_type: String,
}

/// The five auxiliary keys merged into a relation property's schema node.
///
/// Derived per property per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationExtensions {
    /// Collection endpoint path of the association target.
    pub collection: String,
    /// Property to display in a relation picker.
    pub label_property: String,
    /// Property to filter by; always equal to the label property.
    pub search_property: String,
    /// Short name of the target resource type.
    pub resource_class: String,
}

impl RelationExtensions {
    /// Merge the five keys into a property node.
    ///
    /// Existing unrelated keys are preserved; the five `x-*` keys are added
    /// or overwritten.
    pub fn merge_into(&self, node: &mut Map<String, Value>) {
        node.insert(
            X_COLLECTION.to_string(),
            Value::String(self.collection.clone()),
        );
        node.insert(
            X_LABEL_PROPERTY.to_string(),
            Value::String(self.label_property.clone()),
        );
        node.insert(
            X_VALUE_PROPERTY.to_string(),
            Value::String(VALUE_PROPERTY.to_string()),
        );
        node.insert(
            X_SEARCH_PROPERTY.to_string(),
            Value::String(self.search_property.clone()),
        );
        node.insert(
            X_RESOURCE_CLASS.to_string(),
            Value::String(self.resource_class.clone()),
        );
    }
}

/// One entry in the `hydra:operation` list appended to an item response.
///
/// Exactly one of `expects`/`returns` is set: write methods expect their
/// resource type, DELETE returns [`NO_CONTENT_MARKER`], everything else
/// returns its resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedOperation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub method: Method,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_label_candidates() -> Vec<String> {
    DEFAULT_LABEL_CANDIDATES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Configuration for the schema decorator pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    pub enabled: bool,
    /// API path prefix prepended to collection paths.
    pub api_prefix: String,
    /// Ordering hint for hosts that chain schema post-processors; higher
    /// runs first. Not interpreted by the library itself.
    pub priority: i32,
    /// Label-property candidates, in priority order.
    pub label_candidates: Vec<String>,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_prefix: default_api_prefix(),
            priority: 10,
            label_candidates: default_label_candidates(),
        }
    }
}

/// Configuration for the operation enricher pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsConfig {
    pub enabled: bool,
    /// API path prefix prepended to operation URLs.
    pub api_prefix: String,
    /// Ordering hint for hosts that chain response hooks; negative runs
    /// after the producing layer. Not interpreted by the library itself.
    pub priority: i32,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_prefix: default_api_prefix(),
            priority: -10,
        }
    }
}

/// Combined configuration for both pipelines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub relation_decorator: DecoratorConfig,
    pub hydra_operations: OperationsConfig,
}
