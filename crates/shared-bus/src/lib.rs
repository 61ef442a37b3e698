//! # Shared Bus - Hooks and Events Between Subspace Modules
//!
//! Two independent directions of communication:
//!
//! ```text
//!   Subspaces / Posts module                      Reports module
//!  ┌──────────────────────┐   after_*_deleted()  ┌──────────────────┐
//!  │ MultiSubspacesHooks  │ ───────────────────→ │  hook subscriber │
//!  │ MultiPostsHooks      │   (same store, same  │  (cascade)       │
//!  └──────────────────────┘    transition)       └──────────────────┘
//!
//!  transition ──emit──→ EventManager ──commit──→ InMemoryEventBus ──→ subscribers
//! ```
//!
//! ## Rules
//!
//! - Hooks run synchronously inside the triggering transition and write
//!   through the transition's own store, so a failing cascade aborts the
//!   whole transition.
//! - Hook chains invoke subscribers in registration order.
//! - Events are buffered per transition and only published once the
//!   transition's writes have been committed.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod hooks;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventManager, EventTopic, ModerationEvent};
pub use hooks::{
    HookError, MultiPostsHooks, MultiReportsHooks, MultiSubspacesHooks, PostsHooks, ReportsHooks,
    SubspacesHooks,
};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
