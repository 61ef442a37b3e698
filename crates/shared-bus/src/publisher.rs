//! # Moderation Event Bus
//!
//! Committed transitions hand their buffered [`ModerationEvent`]s to an
//! [`EventPublisher`]. The in-memory bus fans them out over a broadcast
//! channel and keeps per-topic tallies of what was published and of who is
//! listening.

use crate::events::{EventFilter, EventTopic, ModerationEvent};
use crate::subscriber::{EventStream, Interest, Subscription, TopicInterest};
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Sink for the events of committed transitions.
pub trait EventPublisher: Send + Sync {
    /// Publish one event, returning how many receivers got it.
    fn publish(&self, event: ModerationEvent) -> usize;

    /// Publish a committed transition's events, in order.
    fn publish_all(&self, events: Vec<ModerationEvent>) -> usize {
        events.into_iter().map(|event| self.publish(event)).sum()
    }

    /// Events published since the bus was created.
    fn events_published(&self) -> u64;
}

/// Broadcast bus for moderation events.
///
/// Sending never blocks, so the synchronous transition runner can publish
/// right after its batch commits.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<ModerationEvent>,
    interest: TopicInterest,
    published: Mutex<HashMap<EventTopic, u64>>,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus whose subscribers lag after `capacity` unread events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            interest: TopicInterest::default(),
            published: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Subscribe to the events accepted by `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let interest = Interest::register(&self.interest, &filter);
        debug!(topics = ?filter.topics, subspace_id = ?filter.subspace_id, "Moderation subscriber registered");
        Subscription::new(self.sender.subscribe(), filter, interest)
    }

    /// `Stream` of the events accepted by `filter`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    /// Live receivers, subscriptions and streams alike.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Live subscriptions whose filter accepts `topic`.
    #[must_use]
    pub fn interested_in(&self, topic: EventTopic) -> usize {
        self.interest.count(topic)
    }

    /// Events published on `topic` so far.
    #[must_use]
    pub fn published_on(&self, topic: EventTopic) -> u64 {
        self.published.lock().get(&topic).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: ModerationEvent) -> usize {
        let topic = event.topic();
        let subspace_id = event.subspace_id();
        *self.published.lock().entry(topic).or_insert(0) += 1;

        // A send error only means nobody is listening right now
        let receivers = self.sender.send(event).unwrap_or(0);
        trace!(?topic, ?subspace_id, receivers, "Moderation event published");
        receivers
    }

    fn events_published(&self) -> u64 {
        self.published.lock().values().sum()
    }
}
