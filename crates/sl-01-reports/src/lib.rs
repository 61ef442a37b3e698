//! # SL-01: Reports
//!
//! Subspace-scoped moderation ledger. Each subspace owns a catalog of
//! reasons and a ledger of reports accusing users or posts of violating
//! them. Standard reasons held in the module params can be materialized
//! into any subspace.
//!
//! ## Architecture
//!
//! ```text
//! ReportsMsg ──→ TxRunner ──→ ReportsService ──→ ReportsKeeper ──→ KeyValueStore
//!                  │  (CacheStore overlay)            │
//!                  │                                  ├──→ SubspacesRegistry / PostsRegistry
//!                  │                                  └──→ ProfilesRegistry / RelationshipsRegistry
//!                  └──→ EventPublisher (after commit)
//!
//! Subspaces module ──after_subspace_saved/deleted──→ ReportsKeeperHooks
//! Posts module ─────after_post_deleted──────────────→ ReportsKeeperHooks
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Monotonic ids | Next reason/report ids only grow; deleted ids are never reused |
//! | 2 | Referential integrity | Every report cites reasons stored in its own subspace |
//! | 3 | Cascade completeness | Deleting a reason, post or subspace deletes every dependent report |
//! | 4 | Atomic transitions | A failed transition leaves the store unchanged and publishes nothing |
//! | 5 | One report per target | A reporter reports a given target at most once per subspace |
//! | 6 | Permission before mutation | Every message checks permissions before writing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, params, messages, genesis, store key layout
//! - `ports/` - Inbound message/query APIs, outbound registries and clock
//! - `adapters/` - In-memory registries and time sources
//! - `keeper/` - Store access, cascades, lifecycle hooks, invariant sweep
//! - `service/` - Message and query handlers, atomic transition runner
//!
//! ## Usage
//!
//! ```ignore
//! use sl_01_reports::{ReportsDependencies, ReportsKeeper, ReportsService, TxRunner};
//!
//! let keeper = Arc::new(ReportsKeeper::new(deps, &registry)?);
//! subspaces.register_hooks(Box::new(keeper.hooks()));
//! let service = Arc::new(ReportsService::new(keeper, config, time_source));
//! let runner = TxRunner::new(service, bus);
//!
//! runner.deliver(&mut store, &msg)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod keeper;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{
    FixedTimeSource, InMemoryPosts, InMemoryProfiles, InMemoryRelationships, InMemorySubspaces,
    SystemTimeSource,
};
pub use config::ReportsConfig;
pub use domain::entities::{Reason, Report, ReportTarget, StandardReason};
pub use domain::errors::{CounterKind, ReportsError};
pub use domain::genesis::{GenesisState, SubspaceDataEntry};
pub use domain::keys::KeyPrefix;
pub use domain::msgs::*;
pub use domain::params::Params;
pub use domain::permissions::{register_permissions, ReportsPermissions};
pub use keeper::{
    registered_invariants, InvariantCheck, ReportsDependencies, ReportsKeeper, ReportsKeeperHooks,
};
pub use ports::inbound::{
    PageRequest, PageResponse, QueryReasonsRequest, QueryReasonsResponse, QueryReportsRequest,
    QueryReportsResponse, ReportsMsgApi, ReportsQueryApi,
};
pub use ports::outbound::{
    PostInfo, PostsRegistry, ProfilesRegistry, RelationshipsRegistry, SubspacesRegistry, TimeSource,
};
pub use service::{ReportsService, TxRunner};
