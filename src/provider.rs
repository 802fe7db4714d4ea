//! Contracts for the externally-supplied metadata providers.
//!
//! The enrichment engine never inspects host metadata directly. The host
//! implements these two traits once per metadata technology and the engine
//! stays decoupled from it; [`crate::Registry`] is the crate-shipped
//! in-memory implementation.

use crate::error::ProviderError;
use crate::types::ResourceDescriptor;

/// A declared field of a persistent entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    /// Whether the field's declared static type is a text type.
    pub is_text: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, is_text: bool) -> Self {
        Self {
            name: name.into(),
            is_text,
        }
    }
}

/// Supplies route-level operation metadata per resource type.
pub trait ResourceMetadata {
    /// Describe the configured variants of a resource type, in
    /// configuration order.
    ///
    /// Unknown or non-API types yield an empty list, not an error.
    fn describe(&self, type_id: &str) -> Result<Vec<ResourceDescriptor>, ProviderError>;
}

/// Reports the fields and associations of persistent entity types.
pub trait EntityIntrospector {
    /// Declared fields of the type, in declaration order.
    ///
    /// Returns `Ok(None)` when the type is not a known persistent entity,
    /// which is distinct from a known type that declares no fields.
    fn fields_of(&self, type_id: &str) -> Result<Option<Vec<FieldInfo>>, ProviderError>;

    /// Whether `field` is a to-one or to-many association on `type_id`.
    fn is_association(&self, type_id: &str, field: &str) -> Result<bool, ProviderError>;

    /// Type identifier of the association target, when `field` is an
    /// association.
    fn association_target(
        &self,
        type_id: &str,
        field: &str,
    ) -> Result<Option<String>, ProviderError>;
}
