//! # Entity Shapes
//!
//! One module per entity. Field names are camelCase on the wire; optional
//! scalars and associations use [`Nullable`](crate::Nullable) so that a
//! missing key and an explicit `null` stay distinct.

pub mod advisor;
pub mod agency;
pub mod appointment;
pub mod enterprise;
pub mod manager;
pub mod user;
