//! Ports module for the reports ledger
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ReportsMsgApi, ReportsQueryApi};
pub use outbound::{
    PostInfo, PostsRegistry, ProfilesRegistry, RelationshipsRegistry, SubspacesRegistry, TimeSource,
};
