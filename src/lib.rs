//! # petstore
//!
//! A single-table record store for pet registrations, keyed by microchip
//! number. The interesting parts live in two places: [`filtering`], which
//! compiles an optional-per-field filter into a parameterized Sea-ORM
//! `Condition`, and [`store`], which runs batched inserts as one atomic
//! transaction. Everything else is plumbing: an entity mapping, payload
//! models with field-mask update semantics, and a thin Axum router.
//!
//! The store itself performs no retries, holds no locks and keeps no state
//! between calls; concurrency control is whatever the backing database
//! provides.

pub mod entity;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

pub use errors::StoreError;
pub use models::{Pet, PetCreate, PetFilter, PetUpdate};
pub use store::RecordStore;
