//! # Subspace-Ledger Test Suite
//!
//! Cross-module tests that wire the reports module to the in-memory
//! subspaces, posts, profiles and relationships registries, the event bus and the
//! delegated-authorization grant, the way a node assembles them.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── lib.rs              # This file
//! │   ├── fixtures.rs         # Fully wired ledger used by tests and benches
//! │   └── integration/
//! │       ├── moderation.rs   # Reason and report flows through the runner
//! │       ├── lifecycle.rs    # Subspace and post deletion cascades
//! │       ├── events.rs       # Committed events on the bus
//! │       ├── delegation.rs   # Execution under a generic subspace grant
//! │       └── genesis.rs      # Export/import and permission migration
//! └── benches/
//!     └── ledger_benchmarks.rs
//! ```
//!
//! ## Integration Flows
//!
//! 1. **Subspaces → Reports**: creating a subspace initializes the id
//!    counters; deleting it purges every reason and report.
//! 2. **Posts → Reports**: deleting a post purges the reports targeting it.
//! 3. **Reports → Event Bus**: events reach subscribers only after commit.
//! 4. **Authz → Reports**: a grant scoped to subspaces gates delegated
//!    execution and meters the scan.

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures;
pub mod integration;
