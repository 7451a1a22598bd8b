//! # Route Modules
//!
//! One feature module per entity, each mounted lazily under `/api/<segment>`
//! by the route composer, plus the navigation listing.
//!
//! | Segment       | Module          | Extra routes                        |
//! |---------------|-----------------|-------------------------------------|
//! | `agency`      | [`agency`]      |                                     |
//! | `enterprise`  | [`enterprise`]  |                                     |
//! | `advisor`     | [`advisor`]     | `GET /user`                         |
//! | `manager`     | [`manager`]     | `GET /user`                         |
//! | `appointment` | [`appointment`] | `GET /advisor/{id}`, `GET /manager/{id}` |

pub mod advisor;
pub mod agency;
pub mod appointment;
pub mod enterprise;
pub mod manager;
pub mod navigation;
