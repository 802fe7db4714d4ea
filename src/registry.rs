//! Declarative in-memory metadata provider.
//!
//! Backs the CLI and the test suites, and doubles as the reference for
//! hosts wiring the provider traits onto real metadata.
//!
//! # Registry file format
//!
//! ```json
//! {
//!   "app.Order": {
//!     "fields": [
//!       { "name": "id" },
//!       { "name": "customer", "association": "app.Customer" }
//!     ],
//!     "descriptors": [
//!       {
//!         "route_prefix": "/admin",
//!         "operations": [
//!           { "method": "GET", "uri_template": "/orders/{id}{._format}", "short_name": "Order" }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::{EntityIntrospector, FieldInfo, ResourceMetadata};
use crate::types::ResourceDescriptor;

/// A declared field in a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// True for text-typed fields (string, text).
    #[serde(default)]
    pub text: bool,
    /// Target type identifier when the field is an association.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<String>,
}

/// One resource type known to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Declared fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Route/operation descriptors, in configuration order.
    #[serde(default)]
    pub descriptors: Vec<ResourceDescriptor>,
}

/// In-memory registry of resource types, keyed by type identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    types: BTreeMap<String, ResourceEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: impl Into<String>, entry: ResourceEntry) {
        self.types.insert(type_id.into(), entry);
    }

    pub fn get(&self, type_id: &str) -> Option<&ResourceEntry> {
        self.types.get(type_id)
    }

    fn field(&self, type_id: &str, field: &str) -> Option<&FieldDef> {
        self.types
            .get(type_id)?
            .fields
            .iter()
            .find(|f| f.name == field)
    }
}

impl ResourceMetadata for Registry {
    fn describe(&self, type_id: &str) -> Result<Vec<ResourceDescriptor>, ProviderError> {
        Ok(self
            .types
            .get(type_id)
            .map(|entry| entry.descriptors.clone())
            .unwrap_or_default())
    }
}

impl EntityIntrospector for Registry {
    fn fields_of(&self, type_id: &str) -> Result<Option<Vec<FieldInfo>>, ProviderError> {
        Ok(self.types.get(type_id).map(|entry| {
            entry
                .fields
                .iter()
                .map(|f| FieldInfo::new(&f.name, f.text))
                .collect()
        }))
    }

    fn is_association(&self, type_id: &str, field: &str) -> Result<bool, ProviderError> {
        Ok(self
            .field(type_id, field)
            .is_some_and(|f| f.association.is_some()))
    }

    fn association_target(
        &self,
        type_id: &str,
        field: &str,
    ) -> Result<Option<String>, ProviderError> {
        Ok(self
            .field(type_id, field)
            .and_then(|f| f.association.clone()))
    }
}
