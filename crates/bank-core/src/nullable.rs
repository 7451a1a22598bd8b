//! # Tri-State Nullable Field
//!
//! A field of an entity shape can be missing, explicitly `null`, or set.
//! `Option<T>` collapses the first two; [`Nullable`] keeps them apart.
//!
//! ## Wire Format
//!
//! Used together with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`:
//!
//! | JSON            | Value             |
//! |-----------------|-------------------|
//! | key missing     | `Absent`          |
//! | `"key": null`   | `Null`            |
//! | `"key": value`  | `Present(value)`  |
//!
//! Serialization mirrors this: `Absent` fields are skipped, `Null` is written
//! as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field value that distinguishes "never set" from "explicitly empty".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Nullable<T> {
    /// The field was never set (key missing on the wire).
    #[default]
    Absent,
    /// The field was explicitly cleared (`null` on the wire).
    Null,
    /// The field holds a value.
    Present(T),
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the inner value, if any.
    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(v) => Nullable::Present(v),
        }
    }

    /// The inner value, collapsing `Absent` and `Null` to `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(v) => Nullable::Present(f(v)),
        }
    }

    /// Apply a merge-patch value to this field.
    ///
    /// `Absent` leaves the field untouched, `Null` clears it and `Present`
    /// replaces it.
    pub fn merge(&mut self, patch: Nullable<T>) {
        match patch {
            Self::Absent => {}
            other => *self = other,
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    /// `Some` becomes `Present`, `None` becomes an explicit `Null`.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Present(v),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => serializer.serialize_some(v),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    // Only reached when the key is present; a missing key is handled by
    // `#[serde(default)]` on the field.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
