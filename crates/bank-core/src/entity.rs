//! # Entity Traits
//!
//! Uniform access to the identifier and partial-update behavior of every
//! entity shape, so the persistence and resource layers can be written once
//! and applied to all five entities.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::identity::Identifier;

/// A domain record with an identifier assigned by the persistence layer.
pub trait Entity: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The identifier newtype for this entity.
    type Id: Identifier;

    /// Lower-case entity name, used in route segments, alert headers and
    /// error parameters (e.g. `"advisor"`).
    const NAME: &'static str;

    /// The identifier, or `None` for a record that was never persisted.
    fn identifier(&self) -> Option<Self::Id>;

    /// Record the identifier assigned by the persistence layer.
    fn set_identifier(&mut self, id: Self::Id);
}

/// Partial update with merge-patch semantics.
///
/// Every field of `Patch` is tri-state. Absent fields leave the record
/// untouched, present fields replace it, and `null` clears optional fields.
/// A `null` on a required field is ignored.
pub trait MergePatch: Entity {
    type Patch: DeserializeOwned + std::fmt::Debug + Send + 'static;

    /// The identifier carried in the patch body.
    fn patch_identifier(patch: &Self::Patch) -> Option<Self::Id>;

    /// Apply the patch in place.
    fn merge(&mut self, patch: Self::Patch);
}

/// Replace a required field only when the patch carries a value.
pub(crate) fn merge_required<T>(field: &mut T, patch: crate::Nullable<T>) {
    if let crate::Nullable::Present(value) = patch {
        *field = value;
    }
}
