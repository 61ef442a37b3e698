//! # Moderation Event Subscriptions
//!
//! Two ways to read the bus: a [`Subscription`] handle with `recv` and
//! `try_recv`, counted in the bus's per-topic interest while it lives, and an
//! [`EventStream`] for `tokio_stream` combinators. Both skip events their
//! [`EventFilter`] rejects and step over lag instead of failing.

use crate::events::{EventFilter, EventTopic, ModerationEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::{debug, trace};

const CONCRETE_TOPICS: [EventTopic; 3] =
    [EventTopic::Reports, EventTopic::Reasons, EventTopic::Params];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Every publisher handle was dropped.
    #[error("Moderation event bus closed")]
    Closed,
}

/// Live subscriptions per topic, shared between the bus and its handles.
#[derive(Debug, Clone, Default)]
pub(crate) struct TopicInterest(Arc<Mutex<HashMap<EventTopic, usize>>>);

impl TopicInterest {
    pub(crate) fn count(&self, topic: EventTopic) -> usize {
        self.0.lock().get(&topic).copied().unwrap_or(0)
    }
}

/// One subscription's share of [`TopicInterest`], released on drop.
pub(crate) struct Interest {
    registry: TopicInterest,
    topics: Vec<EventTopic>,
}

impl Interest {
    /// Count `filter` under every concrete topic it accepts.
    pub(crate) fn register(registry: &TopicInterest, filter: &EventFilter) -> Self {
        let accepts_all = filter.topics.is_empty() || filter.topics.contains(&EventTopic::All);
        let topics: Vec<EventTopic> = CONCRETE_TOPICS
            .into_iter()
            .filter(|topic| accepts_all || filter.topics.contains(topic))
            .collect();

        let mut counts = registry.0.lock();
        for topic in &topics {
            *counts.entry(*topic).or_insert(0) += 1;
        }
        drop(counts);

        Self {
            registry: registry.clone(),
            topics,
        }
    }
}

impl Drop for Interest {
    fn drop(&mut self) {
        let mut counts = self.registry.0.lock();
        for topic in &self.topics {
            if let Some(count) = counts.get_mut(topic) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    counts.remove(topic);
                }
            }
        }
        trace!(topics = ?self.topics, "Moderation subscriber released");
    }
}

/// Filtered receiver handle. Dropping it withdraws its topic interest.
pub struct Subscription {
    receiver: broadcast::Receiver<ModerationEvent>,
    filter: EventFilter,
    _interest: Interest,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<ModerationEvent>,
        filter: EventFilter,
        interest: Interest,
    ) -> Self {
        Self {
            receiver,
            filter,
            _interest: interest,
        }
    }

    /// Next accepted event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<ModerationEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Moderation subscriber lagged behind the bus");
                }
            }
        }
    }

    /// Next accepted event already buffered.
    ///
    /// `Ok(None)` when nothing accepted is waiting.
    pub fn try_recv(&mut self) -> Result<Option<ModerationEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// Filtered `Stream` over the bus.
pub struct EventStream {
    inner: BroadcastStream<ModerationEvent>,
    filter: EventFilter,
}

impl EventStream {
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<ModerationEvent>, filter: EventFilter) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = ModerationEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if self.filter.matches(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    debug!(skipped, "Moderation event stream lagged behind the bus");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
