//! Domain module for the subspace authorization
//!
//! Contains the grant entity and its errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
