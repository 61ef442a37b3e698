//! Adapters for the outbound ports.

pub mod registries;
pub mod time;

pub use registries::{InMemoryPosts, InMemoryProfiles, InMemoryRelationships, InMemorySubspaces};
pub use time::{FixedTimeSource, SystemTimeSource};
