//! # Entity Identifier Newtypes
//!
//! Newtype wrappers for the numeric identifiers assigned by the persistence
//! collaborator. These prevent accidental identifier confusion: you cannot
//! look up an advisor with a `ManagerId`.
//!
//! All identifiers serialize transparently as JSON integers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Common behavior for entity identifiers.
///
/// The repository layer stores records by identifier and allocates new ones
/// from a numeric sequence, so every identifier converts to and from `i64`.
pub trait Identifier:
    Copy + Ord + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Wrap a raw sequence value.
    fn from_raw(raw: i64) -> Self;

    /// The raw sequence value.
    fn raw(self) -> i64;
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl Identifier for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of an [`Advisor`](crate::Advisor).
    AdvisorId
);
identifier!(
    /// Identifier of an [`Agency`](crate::Agency).
    AgencyId
);
identifier!(
    /// Identifier of an [`Appointment`](crate::Appointment).
    AppointmentId
);
identifier!(
    /// Identifier of an [`Enterprise`](crate::Enterprise).
    EnterpriseId
);
identifier!(
    /// Identifier of a [`Manager`](crate::Manager).
    ManagerId
);
identifier!(
    /// Identifier of a [`User`](crate::User).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&AdvisorId(42)).unwrap(), "42");
        let id: ManagerId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ManagerId(7));
    }

    #[test]
    fn display_is_the_number() {
        assert_eq!(AgencyId(1001).to_string(), "1001");
    }

    #[test]
    fn raw_roundtrip() {
        assert_eq!(AppointmentId::from_raw(9).raw(), 9);
        assert_eq!(EnterpriseId::from(3), EnterpriseId(3));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(UserId(1) < UserId(2));
    }
}
