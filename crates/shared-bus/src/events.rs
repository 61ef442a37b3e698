//! # Moderation Events
//!
//! Structured events emitted by successful state transitions. A transition
//! collects its events in an [`EventManager`]; they only reach the bus after
//! the transition's writes have been committed.

use serde::{Deserialize, Serialize};
use shared_types::{Address, PostId, ReasonId, ReportId, SubspaceId, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationEvent {
    // =========================================================================
    // REPORTS
    // =========================================================================
    /// A report was created.
    CreatedReport {
        subspace_id: SubspaceId,
        report_id: ReportId,
        reporter: Address,
        creation_time: Timestamp,
    },

    /// A post was reported (emitted alongside `CreatedReport`).
    ReportedPost {
        subspace_id: SubspaceId,
        post_id: PostId,
        reporter: Address,
    },

    /// A user was reported (emitted alongside `CreatedReport`).
    ReportedUser {
        subspace_id: SubspaceId,
        user: Address,
        reporter: Address,
    },

    /// A report was deleted through the message surface.
    DeletedReport {
        subspace_id: SubspaceId,
        report_id: ReportId,
    },

    // =========================================================================
    // REASONS
    // =========================================================================
    /// A standard reason was materialized inside a subspace.
    SupportedStandardReason {
        subspace_id: SubspaceId,
        standard_reason_id: ReasonId,
        reason_id: ReasonId,
    },

    /// A subspace-local reason was added.
    AddedReason {
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    },

    /// A subspace-local reason was removed.
    RemovedReason {
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    },

    // =========================================================================
    // PARAMS
    // =========================================================================
    /// Module parameters were replaced by the governance authority.
    UpdatedParams { authority: Address },
}

impl ModerationEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CreatedReport { .. }
            | Self::ReportedPost { .. }
            | Self::ReportedUser { .. }
            | Self::DeletedReport { .. } => EventTopic::Reports,
            Self::SupportedStandardReason { .. }
            | Self::AddedReason { .. }
            | Self::RemovedReason { .. } => EventTopic::Reasons,
            Self::UpdatedParams { .. } => EventTopic::Params,
        }
    }

    /// The subspace the event belongs to, if any.
    #[must_use]
    pub fn subspace_id(&self) -> Option<SubspaceId> {
        match self {
            Self::CreatedReport { subspace_id, .. }
            | Self::ReportedPost { subspace_id, .. }
            | Self::ReportedUser { subspace_id, .. }
            | Self::DeletedReport { subspace_id, .. }
            | Self::SupportedStandardReason { subspace_id, .. }
            | Self::AddedReason { subspace_id, .. }
            | Self::RemovedReason { subspace_id, .. } => Some(*subspace_id),
            Self::UpdatedParams { .. } => None,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Report creation and deletion.
    Reports,
    /// Reason lifecycle.
    Reasons,
    /// Module parameter updates.
    Params,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Only events of this subspace. `None` means every subspace.
    pub subspace_id: Option<SubspaceId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            subspace_id: None,
        }
    }

    /// Restrict the filter to one subspace.
    #[must_use]
    pub fn in_subspace(mut self, subspace_id: SubspaceId) -> Self {
        self.subspace_id = Some(subspace_id);
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ModerationEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let subspace_match = match self.subspace_id {
            None => true,
            Some(id) => event.subspace_id() == Some(id),
        };

        topic_match && subspace_match
    }
}

/// Per-transition event buffer.
#[derive(Debug, Default, Clone)]
pub struct EventManager {
    events: Vec<ModerationEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: ModerationEvent) {
        self.events.push(event);
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = ModerationEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[ModerationEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ModerationEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
