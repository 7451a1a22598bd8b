//! # bank-core: Entity Model for the Bank Advice Application
//!
//! Defines the typed shapes exchanged between the bank advice API and its
//! clients. Every other crate in the workspace depends on `bank-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `AdvisorId`, `AgencyId`, `ManagerId`, and so on:
//!    you cannot pass an `AgencyId` where an `AdvisorId` is expected. On the
//!    wire they are plain integers.
//!
//! 2. **Tri-state optional fields.** [`Nullable`] keeps "never set" (key
//!    missing) apart from "explicitly empty" (`null`). Associations such as
//!    `Advisor::appointments` rely on that distinction: absent means not
//!    loaded, null means none.
//!
//! 3. **No validation.** Shapes enforce presence of required fields through
//!    their types and nothing else. Referential integrity belongs to the
//!    persistence collaborator.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All entity types derive `Debug`, `Clone`, `PartialEq` and implement
//!   `Serialize`/`Deserialize` with camelCase field names.

pub mod authority;
pub mod entity;
pub mod error;
pub mod gender;
pub mod identity;
pub mod model;
pub mod nullable;

pub use authority::Authority;
pub use entity::{Entity, MergePatch};
pub use error::BankError;
pub use gender::Gender;
pub use identity::{
    AdvisorId, AgencyId, AppointmentId, EnterpriseId, Identifier, ManagerId, UserId,
};
pub use model::advisor::{advisor_identifier, Advisor, AdvisorPatch};
pub use model::agency::{Agency, AgencyPatch};
pub use model::appointment::{Appointment, AppointmentPatch};
pub use model::enterprise::{Enterprise, EnterprisePatch};
pub use model::manager::{Manager, ManagerPatch};
pub use model::user::User;
pub use nullable::Nullable;
