//! Import orchestrator
//!
//! Runs listing → details → transform → check → upsert for one source, one
//! item at a time with a fixed delay before each detail request. Items are
//! independent: a failure on one is recorded and the loop moves on. A listing
//! failure ends the pass early with whatever was gathered.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{ImportError, SourceError};
use crate::sources::{PhoneRef, PhoneSource};
use crate::transform::{transform_phone, TransformedPhone};
use mpc_common::db::{brands, mobiles, MobilePatch};

pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Sleep before each upstream detail request (skipped for preloaded records)
    pub request_delay: Duration,
    /// Overwrite mobiles whose slug already exists
    pub update_existing: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            update_existing: false,
        }
    }
}

/// Outcome counters for one import pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Newly inserted mobiles
    pub success: usize,
    pub errors: Vec<String>,
    /// Items whose slug was already stored
    pub existing: usize,
    /// Subset of `existing` that was overwritten
    pub updated: usize,
    /// Items attempted
    pub processed: usize,
}

enum ItemOutcome {
    Created,
    Existing,
    Updated,
}

pub struct ImportService {
    db: SqlitePool,
    source: Arc<dyn PhoneSource>,
    options: ImportOptions,
    rng: Mutex<StdRng>,
}

impl ImportService {
    pub fn new(db: SqlitePool, source: Arc<dyn PhoneSource>, options: ImportOptions) -> Self {
        Self {
            db,
            source,
            options,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixed RNG seed for reproducible image selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub async fn import_latest_mobiles(&self, limit: usize) -> ImportResult {
        info!(source = self.source.kind().as_str(), limit, "Importing latest mobiles");
        let listing = self.source.list_latest(limit).await;
        self.run("latest mobiles", listing, limit).await
    }

    pub async fn import_mobiles_by_brand(&self, brand: &str, limit: usize) -> ImportResult {
        info!(source = self.source.kind().as_str(), brand, limit, "Importing mobiles by brand");
        let listing = self.source.list_by_brand(brand, limit).await;
        self.run(&format!("brand '{}'", brand.trim()), listing, limit)
            .await
    }

    pub async fn search_and_import_mobiles(&self, query: &str, limit: usize) -> ImportResult {
        info!(source = self.source.kind().as_str(), query, limit, "Searching and importing mobiles");
        let listing = self.source.search(query, limit).await;
        self.run(&format!("search '{}'", query.trim()), listing, limit)
            .await
    }

    async fn run(
        &self,
        label: &str,
        listing: Result<Vec<PhoneRef>, SourceError>,
        limit: usize,
    ) -> ImportResult {
        let mut result = ImportResult::default();

        let phones = match listing {
            Ok(phones) => phones,
            Err(e) => {
                error!(label, error = %e, "Import listing failed");
                result.errors.push(format!("Failed to list {}: {}", label, e));
                return result;
            }
        };

        debug!(label, count = phones.len(), "Listing returned phones");

        for phone in phones.into_iter().take(limit) {
            // Preloaded records need no detail request, so no throttle
            if phone.preloaded.is_none() && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }
            result.processed += 1;

            match self.import_one(&phone).await {
                Ok(ItemOutcome::Created) => result.success += 1,
                Ok(ItemOutcome::Existing) => result.existing += 1,
                Ok(ItemOutcome::Updated) => {
                    result.existing += 1;
                    result.updated += 1;
                }
                Err(e) => {
                    warn!(phone = %phone.display_name(), error = %e, "Import item failed");
                    result
                        .errors
                        .push(format!("{}: {}", phone.display_name(), e));
                }
            }
        }

        info!(
            label,
            success = result.success,
            existing = result.existing,
            updated = result.updated,
            errors = result.errors.len(),
            "Import pass complete"
        );
        result
    }

    async fn import_one(&self, phone: &PhoneRef) -> Result<ItemOutcome, ImportError> {
        let raw = self.source.fetch_details(phone).await?;

        let TransformedPhone { brand, mobile } = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            transform_phone(&raw, &mut *rng)?
        };

        self.ensure_brand(&brand).await?;

        match mobiles::get_mobile_by_slug(&self.db, &mobile.slug).await? {
            None => {
                let created = mobiles::create_mobile(&self.db, &mobile).await?;
                debug!(slug = %created.slug, "Imported new mobile");
                Ok(ItemOutcome::Created)
            }
            Some(current) if self.options.update_existing => {
                mobiles::update_mobile(&self.db, current.id, MobilePatch::from(mobile)).await?;
                debug!(slug = %current.slug, "Updated existing mobile");
                Ok(ItemOutcome::Updated)
            }
            Some(current) => {
                debug!(slug = %current.slug, "Mobile already stored, skipping");
                Ok(ItemOutcome::Existing)
            }
        }
    }

    async fn ensure_brand(&self, brand: &mpc_common::db::NewBrand) -> Result<(), ImportError> {
        if brands::get_brand_by_slug(&self.db, &brand.slug).await?.is_some() {
            return Ok(());
        }
        match brands::create_brand(&self.db, brand).await {
            Ok(created) => {
                info!(slug = %created.slug, "Created brand from import");
                Ok(())
            }
            // Created concurrently by another request
            Err(mpc_common::Error::Conflict(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
