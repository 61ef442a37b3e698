//! Fully wired ledger shared by the integration tests and the benchmarks.

use shared_bus::InMemoryEventBus;
use shared_types::{
    Address, InMemoryKVStore, KeyValueStore, PermissionRegistry, PostId, ReasonId, ReportId,
    SubspaceId, Timestamp,
};
use sl_01_reports::{
    register_permissions, FixedTimeSource, InMemoryPosts, InMemoryProfiles, InMemoryRelationships,
    InMemorySubspaces, MsgAddReason, MsgCreateReport, ReportTarget, ReportsConfig,
    ReportsDependencies, ReportsError, ReportsKeeper, ReportsMsg, ReportsResponse,
    ReportsService, TxRunner,
};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

pub const GENESIS_TIME: Timestamp = 1_700_000_000;

pub fn address(value: &str) -> Address {
    Address::parse(value).expect("fixture address is valid")
}

/// Owner of every fixture subspace; implicitly holds every permission.
pub fn owner() -> Address {
    address("cosmos1cjf97gpzwmaf30pzvaargfgr884mpp5ak8f7ns")
}

pub fn reporter() -> Address {
    address("desmos1qpzry9x8gf2tvdw")
}

pub fn author() -> Address {
    address("desmos1qpzry9x8gf2tvdwqq")
}

pub fn moderator() -> Address {
    address("desmos1mqz9x8gf2tvdw0s3j")
}

pub fn governance() -> Address {
    address("desmos1qpzry9x8gf2tvdw0s3jn54khce6mua7l")
}

/// Install a test subscriber once per process. `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Startup permission registry: subspace defaults plus the reports names.
pub fn permission_registry() -> PermissionRegistry {
    let mut builder = PermissionRegistry::builder()
        .with_subspace_defaults()
        .expect("subspace defaults register once");
    register_permissions(&mut builder).expect("reports permissions register once");
    builder.build()
}

/// Every module of the ledger wired over one committed store. Every
/// fixture address has a profile.
pub struct Ledger {
    pub store: InMemoryKVStore,
    pub registry: PermissionRegistry,
    pub subspaces: Arc<InMemorySubspaces>,
    pub posts: Arc<InMemoryPosts>,
    pub profiles: Arc<InMemoryProfiles>,
    pub relationships: Arc<InMemoryRelationships>,
    pub clock: Arc<FixedTimeSource>,
    pub bus: Arc<InMemoryEventBus>,
    pub keeper: Arc<ReportsKeeper>,
    pub runner: TxRunner,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Ledger whose params may be updated by [`governance`].
    pub fn new() -> Self {
        Self::with_config(ReportsConfig::default().with_authority(governance()))
    }

    pub fn with_config(config: ReportsConfig) -> Self {
        init_tracing();

        let registry = permission_registry();
        let subspaces = Arc::new(InMemorySubspaces::new());
        let posts = Arc::new(InMemoryPosts::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        for user in [owner(), reporter(), author(), moderator(), governance()] {
            profiles.save_profile(user);
        }
        let relationships = Arc::new(InMemoryRelationships::new());

        let keeper = Arc::new(
            ReportsKeeper::new(
                ReportsDependencies {
                    subspaces: subspaces.clone(),
                    posts: posts.clone(),
                    profiles: profiles.clone(),
                    relationships: relationships.clone(),
                },
                &registry,
            )
            .expect("reports permissions are registered"),
        );
        subspaces.register_hooks(Box::new(keeper.hooks()));
        posts.register_hooks(Box::new(keeper.hooks()));

        let clock = Arc::new(FixedTimeSource::new(GENESIS_TIME));
        let service = Arc::new(ReportsService::new(keeper.clone(), config, clock.clone()));
        let bus = Arc::new(InMemoryEventBus::new());
        let runner = TxRunner::new(service, bus.clone());

        Self {
            store: InMemoryKVStore::new(),
            registry,
            subspaces,
            posts,
            profiles,
            relationships,
            clock,
            bus,
            keeper,
            runner,
        }
    }

    /// Deliver one message as an atomic transition.
    pub fn deliver(&mut self, msg: ReportsMsg) -> Result<ReportsResponse, ReportsError> {
        self.runner.deliver(&mut self.store, &msg)
    }

    /// Create a subspace inside a transition, so the reports hooks commit
    /// with it.
    pub fn create_subspace(
        &mut self,
        subspace_id: SubspaceId,
        owner: Address,
    ) -> Result<(), ReportsError> {
        let subspaces = self.subspaces.clone();
        self.runner.execute(&mut self.store, |store, _| {
            subspaces.save_subspace(store, subspace_id, owner)?;
            Ok(())
        })
    }

    pub fn delete_subspace(&mut self, subspace_id: SubspaceId) -> Result<(), ReportsError> {
        let subspaces = self.subspaces.clone();
        self.runner.execute(&mut self.store, |store, _| {
            subspaces.delete_subspace(store, subspace_id)?;
            Ok(())
        })
    }

    pub fn create_post(
        &mut self,
        subspace_id: SubspaceId,
        post_id: PostId,
        owner: Address,
    ) -> Result<(), ReportsError> {
        let posts = self.posts.clone();
        self.runner.execute(&mut self.store, |store, _| {
            posts.save_post(store, subspace_id, post_id, owner)?;
            Ok(())
        })
    }

    pub fn delete_post(&mut self, subspace_id: SubspaceId, post_id: PostId) -> Result<(), ReportsError> {
        let posts = self.posts.clone();
        self.runner.execute(&mut self.store, |store, _| {
            posts.delete_post(store, subspace_id, post_id)?;
            Ok(())
        })
    }

    /// Grant named permissions, resolved through the startup registry.
    pub fn grant(&self, subspace_id: SubspaceId, user: Address, names: &[&str]) {
        let permissions = names
            .iter()
            .map(|name| self.registry.resolve(name).expect("permission is registered"))
            .collect::<Vec<_>>();
        self.subspaces.set_user_permissions(subspace_id, user, permissions);
    }

    /// Add a reason signed by the subspace [`owner`].
    pub fn add_reason(&mut self, subspace_id: SubspaceId, title: &str) -> Result<ReasonId, ReportsError> {
        let response = self.deliver(ReportsMsg::AddReason(MsgAddReason {
            subspace_id,
            title: title.to_string(),
            description: String::new(),
            signer: owner(),
        }))?;
        match response {
            ReportsResponse::AddReason(response) => Ok(response.reason_id),
            other => panic!("unexpected response {other:?}"),
        }
    }

    pub fn report(
        &mut self,
        subspace_id: SubspaceId,
        reasons_ids: Vec<ReasonId>,
        target: ReportTarget,
        reporter: Address,
    ) -> Result<ReportId, ReportsError> {
        let response = self.deliver(ReportsMsg::CreateReport(MsgCreateReport {
            subspace_id,
            reasons_ids,
            message: "this content breaks the rules".to_string(),
            target,
            reporter,
        }))?;
        match response {
            ReportsResponse::CreateReport(response) => Ok(response.report_id),
            other => panic!("unexpected response {other:?}"),
        }
    }

    /// Every committed entry, in key order.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.store.prefix_scan(&[]).expect("in-memory scan")
    }

    /// Run the invariant sweep over the committed store.
    pub fn sweep(&self) -> (String, bool) {
        self.keeper.all_invariants(&self.store)
    }
}
