//! # Lifecycle Hooks
//!
//! Observer interfaces published by the modules that own subspaces, posts
//! and reports. A subscriber (e.g. the reports module) registers itself on the
//! publisher's fan-out chain; the publisher calls the chain after each
//! lifecycle change, handing over the store of the running transition.

use shared_types::{KVStoreError, KeyValueStore, PostId, ReasonId, ReportId, SubspaceId};
use thiserror::Error;
use tracing::debug;

/// Errors raised by a hook subscriber.
///
/// Any error aborts the transition that triggered the hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// The underlying store failed while the hook was cascading.
    #[error("Store fault in hook: {0}")]
    Store(#[from] KVStoreError),

    /// The subscriber rejected the change.
    #[error("Hook subscriber {subscriber} failed: {message}")]
    Subscriber {
        subscriber: &'static str,
        message: String,
    },
}

/// Events fired by the subspaces module.
pub trait SubspacesHooks: Send + Sync {
    /// Called after a subspace has been created or updated.
    fn after_subspace_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError>;

    /// Called after a subspace has been deleted.
    fn after_subspace_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError>;
}

/// Events fired by the posts module.
pub trait PostsHooks: Send + Sync {
    /// Called after a post has been created or edited.
    fn after_post_saved(
        &self,
        _store: &mut dyn KeyValueStore,
        _subspace_id: SubspaceId,
        _post_id: PostId,
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after a post has been deleted.
    fn after_post_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), HookError>;
}

/// Ordered fan-out of [`SubspacesHooks`] subscribers.
#[derive(Default)]
pub struct MultiSubspacesHooks {
    hooks: Vec<Box<dyn SubspacesHooks>>,
}

impl MultiSubspacesHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber; it runs after every earlier registration.
    pub fn register(&mut self, hook: Box<dyn SubspacesHooks>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl SubspacesHooks for MultiSubspacesHooks {
    fn after_subspace_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError> {
        debug!(subspace_id, subscribers = self.hooks.len(), "Dispatching subspace saved");
        for hook in &self.hooks {
            hook.after_subspace_saved(store, subspace_id)?;
        }
        Ok(())
    }

    fn after_subspace_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError> {
        debug!(subspace_id, subscribers = self.hooks.len(), "Dispatching subspace deleted");
        for hook in &self.hooks {
            hook.after_subspace_deleted(store, subspace_id)?;
        }
        Ok(())
    }
}

/// Ordered fan-out of [`PostsHooks`] subscribers.
#[derive(Default)]
pub struct MultiPostsHooks {
    hooks: Vec<Box<dyn PostsHooks>>,
}

impl MultiPostsHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn PostsHooks>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl PostsHooks for MultiPostsHooks {
    fn after_post_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.after_post_saved(store, subspace_id, post_id)?;
        }
        Ok(())
    }

    fn after_post_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), HookError> {
        debug!(subspace_id, post_id, subscribers = self.hooks.len(), "Dispatching post deleted");
        for hook in &self.hooks {
            hook.after_post_deleted(store, subspace_id, post_id)?;
        }
        Ok(())
    }
}

/// Events fired by the reports module.
///
/// Every method defaults to a no-op so subscribers only implement what
/// they observe.
pub trait ReportsHooks: Send + Sync {
    fn after_reason_saved(
        &self,
        _store: &mut dyn KeyValueStore,
        _subspace_id: SubspaceId,
        _reason_id: ReasonId,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn after_reason_deleted(
        &self,
        _store: &mut dyn KeyValueStore,
        _subspace_id: SubspaceId,
        _reason_id: ReasonId,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn after_report_saved(
        &self,
        _store: &mut dyn KeyValueStore,
        _subspace_id: SubspaceId,
        _report_id: ReportId,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn after_report_deleted(
        &self,
        _store: &mut dyn KeyValueStore,
        _subspace_id: SubspaceId,
        _report_id: ReportId,
    ) -> Result<(), HookError> {
        Ok(())
    }
}

/// Ordered fan-out of [`ReportsHooks`] subscribers.
#[derive(Default)]
pub struct MultiReportsHooks {
    hooks: Vec<Box<dyn ReportsHooks>>,
}

impl MultiReportsHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn ReportsHooks>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ReportsHooks for MultiReportsHooks {
    fn after_reason_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.after_reason_saved(store, subspace_id, reason_id)?;
        }
        Ok(())
    }

    fn after_reason_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.after_reason_deleted(store, subspace_id, reason_id)?;
        }
        Ok(())
    }

    fn after_report_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.after_report_saved(store, subspace_id, report_id)?;
        }
        Ok(())
    }

    fn after_report_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.after_report_deleted(store, subspace_id, report_id)?;
        }
        Ok(())
    }
}
