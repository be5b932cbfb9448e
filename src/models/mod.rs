//! Request/response types and API groups, one module per family of
//! endpoints.

pub mod agents;
pub mod cache;
pub mod common;
pub mod content;
pub mod customers;
pub mod notes;
pub mod passengers;
pub mod payments;
pub mod reservations;
pub mod setup;
pub mod tasks;
pub mod tours;

pub use common::{DateRange, HasSelfLink, Link, PassengerAssignment, PatchOp, Price, UpdateOperation, Warning};
