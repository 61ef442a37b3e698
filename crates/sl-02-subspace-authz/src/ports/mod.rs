//! Ports module for the subspace authorization
//!
//! Inbound: the message view being authorized. Outbound: gas metering.

pub mod inbound;
pub mod outbound;

pub use inbound::ScopedMsg;
pub use outbound::GasMeter;
