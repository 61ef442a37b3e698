//! # Integration Flows
//!
//! Each module drives the wired [`crate::fixtures::Ledger`] through one
//! family of cross-module behavior.

pub mod events;
pub mod genesis;
pub mod lifecycle;
pub mod moderation;
