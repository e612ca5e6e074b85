//! Crawl module
//!
//! Walks every record of an entity kind and hands each one to a callback.
//!
//! # Overview
//!
//! - [`Crawler`] - drives one record stream per kind, one request at a time
//! - [`CrawlConfig`] - limit, throttle and refresh settings for one kind
//! - [`CrawlCallbacks`] - the per-kind callbacks for [`Crawler::crawl_all`]
//! - [`Throttle`] - minimum time between two record callbacks
//!
//! Only the initial list fetch can fail a crawl. A record whose refresh
//! fails is logged and skipped, and a failed page fetch ends the crawl of
//! that kind early.

mod throttle;
mod types;

pub use throttle::Throttle;
pub use types::{CrawlCallbacks, CrawlConfig, CrawlStats, RecordCallback};

use crate::client::GtrClient;
use crate::config::CrawlSettings;
use crate::error::{Error, Result};
use crate::pagination::{StreamOptions, MAX_PAGE_SIZE};
use crate::record::Record;
use crate::types::EntityKind;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sequential crawler over the GtR lists
#[derive(Debug, Clone)]
pub struct Crawler {
    client: GtrClient,
}

impl Crawler {
    /// Create a crawler using `client`
    pub fn new(client: GtrClient) -> Self {
        Self { client }
    }

    /// The underlying client
    pub fn client(&self) -> &GtrClient {
        &self.client
    }

    /// Crawl every record of `kind`, calling `callback` for each.
    ///
    /// Without a callback, or with a limit of zero, nothing is fetched.
    pub async fn crawl(
        &self,
        kind: EntityKind,
        config: &CrawlConfig,
        callback: Option<&mut RecordCallback<'_>>,
    ) -> Result<CrawlStats> {
        let started = Instant::now();
        let mut stats = CrawlStats::new();

        let Some(callback) = callback else {
            debug!(kind = %kind, "No callback, skipping crawl");
            return Ok(stats);
        };
        if !config.allows(0) {
            debug!(kind = %kind, "Limit is zero, skipping crawl");
            return Ok(stats);
        }

        let mut collection = self
            .client
            .list(kind, None, Some(config.page_size))
            .await?;
        let total = collection.record_count();
        info!(kind = %kind, total, "Crawling {}", kind.plural());

        // The collection already sits on page one
        let mut records = collection.records_with(StreamOptions::from_current_page());
        let mut throttle = Throttle::new(config.min_gap);

        while config.allows(stats.records_seen) {
            let Some(summary) = records.next().await else {
                break;
            };
            stats.records_seen += 1;

            match self.prepare(summary, config).await {
                Some(record) => {
                    info!(
                        kind = %kind,
                        id = %record.id().unwrap_or_default(),
                        "Processing {} of {}",
                        stats.records_seen,
                        total
                    );
                    throttle.wait().await;
                    (*callback)(record);
                    stats.records_processed += 1;
                }
                None => {
                    // The failed follow-up still hit the API
                    throttle.wait().await;
                    stats.records_skipped += 1;
                }
            }
        }

        stats.set_duration(started.elapsed().as_millis() as u64);
        info!(
            kind = %kind,
            processed = stats.records_processed,
            skipped = stats.records_skipped,
            duration_ms = stats.duration_ms,
            "Finished crawling {}",
            kind.plural()
        );
        Ok(stats)
    }

    /// Crawl projects, people, organisations and publications in turn.
    ///
    /// Kinds without a callback are left out. Stops at the first kind whose
    /// initial list fetch fails.
    pub async fn crawl_all(
        &self,
        settings: &CrawlSettings,
        mut callbacks: CrawlCallbacks<'_>,
    ) -> Result<Vec<(EntityKind, CrawlStats)>> {
        let mut results = Vec::new();
        for kind in EntityKind::ALL {
            let config = CrawlConfig::from_settings(settings, kind);
            let stats = self.crawl(kind, &config, callbacks.get_mut(kind)).await?;
            results.push((kind, stats));
        }
        Ok(results)
    }

    /// Turn a list summary into the record handed to the callback, or `None`
    /// when a follow-up fetch failed
    async fn prepare(&self, summary: Record, config: &CrawlConfig) -> Option<Record> {
        let mut record = if config.refresh {
            match self.client.refresh(&summary).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(
                        kind = %summary.kind(),
                        id = %summary.id().unwrap_or_default(),
                        error = %e,
                        "Skipping record, refresh failed"
                    );
                    return None;
                }
            }
        } else {
            summary
        };

        if config.load_all_projects && record.kind() == EntityKind::Organisation {
            match self.organisation_projects(&record).await {
                Ok(projects) => record.set_projects(projects),
                Err(e) => {
                    warn!(
                        id = %record.id().unwrap_or_default(),
                        error = %e,
                        "Skipping organisation, project list failed"
                    );
                    return None;
                }
            }
        }

        Some(record)
    }

    async fn organisation_projects(&self, organisation: &Record) -> Result<Vec<Record>> {
        let id = organisation
            .id()
            .ok_or_else(|| Error::missing_field(EntityKind::Organisation.to_string(), "id"))?;

        let mut collection = self
            .client
            .organisation_projects(&id, Some(MAX_PAGE_SIZE))
            .await?;
        let mut projects = Vec::new();
        let mut stream = collection.records_with(StreamOptions::from_current_page());
        while let Some(project) = stream.next().await {
            projects.push(project);
        }

        debug!(id = %id, count = projects.len(), "Loaded organisation projects");
        Ok(projects)
    }
}
