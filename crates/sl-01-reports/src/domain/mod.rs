//! Domain module for the reports ledger
//!
//! Contains entities, params, errors, the store key layout, permission
//! names, state transition messages and the genesis state.

pub mod entities;
pub mod errors;
pub mod genesis;
pub mod keys;
pub mod msgs;
pub mod params;
pub mod permissions;

pub use entities::*;
pub use errors::*;
pub use genesis::*;
pub use msgs::*;
pub use params::*;
pub use permissions::ReportsPermissions;
