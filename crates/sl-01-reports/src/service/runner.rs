//! Atomic transition runner.
//!
//! Each transition writes into a `CacheStore` overlay. Only when the handler
//! succeeds are the buffered writes committed in one batch and the buffered
//! events published on the bus. A failed handler leaves the store and the
//! bus untouched.

use super::ReportsService;
use crate::domain::errors::ReportsError;
use crate::domain::msgs::{ReportsMsg, ReportsResponse};
use shared_bus::{EventManager, EventPublisher};
use shared_types::{Address, CacheStore, KeyValueStore};
use sl_02_subspace_authz::{AuthzConfig, GasMeter, GenericSubspaceAuthorization, ScopedMsg};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TxRunner {
    service: Arc<ReportsService>,
    publisher: Arc<dyn EventPublisher>,
    authz: AuthzConfig,
}

impl TxRunner {
    pub fn new(service: Arc<ReportsService>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            service,
            publisher,
            authz: AuthzConfig::default(),
        }
    }

    pub fn with_authz_config(mut self, authz: AuthzConfig) -> Self {
        self.authz = authz;
        self
    }

    pub fn service(&self) -> &Arc<ReportsService> {
        &self.service
    }

    /// Validate and execute a message as one atomic transition.
    pub fn deliver(
        &self,
        store: &mut dyn KeyValueStore,
        msg: &ReportsMsg,
    ) -> Result<ReportsResponse, ReportsError> {
        msg.validate_basic()?;
        self.execute(store, |cache, events| self.service.handle(cache, events, msg))
    }

    /// Execute a message on behalf of its signer, as allowed by a generic
    /// subspace grant held by `grantee`.
    pub fn deliver_authorized(
        &self,
        store: &mut dyn KeyValueStore,
        grantee: &Address,
        grant: &GenericSubspaceAuthorization,
        meter: &mut dyn GasMeter,
        msg: &ReportsMsg,
    ) -> Result<ReportsResponse, ReportsError> {
        msg.validate_basic()?;

        let response = grant.accept(&self.authz, meter, msg)?;
        if !response.accept {
            warn!(
                grantee = %grantee,
                type_url = msg.type_url(),
                "Grant does not cover message"
            );
            return Err(ReportsError::PermissionDenied {
                subspace_id: msg.scoped_subspace_id().unwrap_or_default(),
                user: grantee.clone(),
                action: "execute this message under the grant",
            });
        }

        self.execute(store, |cache, events| self.service.handle(cache, events, msg))
    }

    /// Run `transition` against a write buffer over `store`, then commit its
    /// writes and publish its events.
    pub fn execute<T, F>(&self, store: &mut dyn KeyValueStore, transition: F) -> Result<T, ReportsError>
    where
        F: FnOnce(&mut dyn KeyValueStore, &mut EventManager) -> Result<T, ReportsError>,
    {
        let mut events = EventManager::new();
        let (value, operations) = {
            let mut cache = CacheStore::new(&*store);
            let overlay: &mut dyn KeyValueStore = &mut cache;
            let value = match transition(overlay, &mut events) {
                Ok(value) => value,
                Err(err) => {
                    warn!(error = %err, "Transition rejected, nothing committed");
                    return Err(err);
                }
            };
            (value, cache.into_operations())
        };

        let writes = operations.len();
        store.atomic_batch_write(operations)?;

        let events = events.into_events();
        let emitted = events.len();
        let delivered = self.publisher.publish_all(events);
        debug!(writes, emitted, delivered, "Transition committed");
        Ok(value)
    }
}
