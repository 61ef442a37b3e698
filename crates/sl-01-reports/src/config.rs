//! Reports module configuration from environment variables.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::env;
use tracing::warn;

/// Default number of records returned by a paginated query.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Hard cap on the page size a caller can request.
pub const MAX_PAGE_LIMIT: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Address allowed to update the module params. `None` refuses every
    /// params update.
    pub authority: Option<Address>,

    /// Page size used when a query does not set a limit
    pub default_page_limit: usize,

    /// Largest page size honored by queries
    pub max_page_limit: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            authority: None,
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl ReportsConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SL_REPORTS_AUTHORITY`: params update authority (default: unset)
    /// - `SL_REPORTS_DEFAULT_PAGE_LIMIT`: default page size (default: 100)
    /// - `SL_REPORTS_MAX_PAGE_LIMIT`: page size cap (default: 1000)
    pub fn from_env() -> Self {
        let authority = env::var("SL_REPORTS_AUTHORITY")
            .ok()
            .and_then(|value| match Address::parse(value) {
                Ok(address) => Some(address),
                Err(err) => {
                    warn!(error = %err, "Ignoring invalid SL_REPORTS_AUTHORITY");
                    None
                }
            });

        let config = Self {
            authority,
            default_page_limit: env::var("SL_REPORTS_DEFAULT_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_LIMIT),
            max_page_limit: env::var("SL_REPORTS_MAX_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_PAGE_LIMIT),
        };
        config.normalized()
    }

    pub fn with_authority(mut self, authority: Address) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Keep both limits at least 1 and the default below the cap.
    pub fn normalized(mut self) -> Self {
        self.max_page_limit = self.max_page_limit.max(1);
        self.default_page_limit = self.default_page_limit.clamp(1, self.max_page_limit);
        self
    }

    /// Effective page size for a requested limit.
    pub fn page_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_limit)
            .min(self.max_page_limit)
            .max(1)
    }
}
