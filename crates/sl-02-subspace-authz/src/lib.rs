//! # SL-02: Generic Subspace Authorization
//!
//! A delegation grant that lets a grantee execute one message type on the
//! granter's behalf, restricted to a set of subspaces. The crate has no
//! persisted state: [`GenericSubspaceAuthorization::accept`] is a pure
//! predicate evaluated by the delegated-execution engine at call time.
//!
//! ## Architecture
//!
//! - **Domain**: the authorization grant, accept responses, errors
//! - **Ports**: [`GasMeter`] (outbound) and [`ScopedMsg`], the view a
//!   candidate message must expose to be scoped
//! - **Adapters**: [`BasicGasMeter`] and [`InfiniteGasMeter`]
//!
//! ## Metering
//!
//! Acceptance is a linear scan over the granted subspace ids; every element
//! scanned consumes [`AuthzConfig::gas_per_iteration`] units, which bounds
//! the cost of oversized grants.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{BasicGasMeter, InfiniteGasMeter};
pub use config::AuthzConfig;
pub use domain::entities::{AcceptResponse, GenericSubspaceAuthorization};
pub use domain::errors::AuthzError;
pub use ports::outbound::GasMeter;
pub use ports::inbound::ScopedMsg;
