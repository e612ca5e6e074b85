//! Crawl types
//!
//! Per-kind crawl configuration, statistics and record callbacks.

use crate::config::CrawlSettings;
use crate::pagination::MAX_PAGE_SIZE;
use crate::record::Record;
use crate::types::EntityKind;
use std::time::Duration;

/// Callback invoked once per crawled record
pub type RecordCallback<'a> = Box<dyn FnMut(Record) + Send + 'a>;

/// Configuration for crawling one entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Maximum records to take from the list, skipped ones included
    pub limit: Option<u64>,
    /// Minimum wall time per record
    pub min_gap: Duration,
    /// Fetch the full entity before the callback
    pub refresh: bool,
    /// Attach every project of an organisation before the callback
    pub load_all_projects: bool,
    /// Records per list page
    pub page_size: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            limit: None,
            min_gap: Duration::ZERO,
            refresh: true,
            load_all_projects: true,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl CrawlConfig {
    /// Create a new crawl config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for `kind` taken from crawl settings
    pub fn from_settings(settings: &CrawlSettings, kind: EntityKind) -> Self {
        Self {
            limit: settings.limit(kind),
            min_gap: settings.min_request_gap(),
            refresh: settings.refresh,
            load_all_projects: settings.load_all_projects,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Set the record limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the minimum gap between records
    #[must_use]
    pub fn with_min_gap(mut self, gap: Duration) -> Self {
        self.min_gap = gap;
        self
    }

    /// Turn per-record refresh on or off
    #[must_use]
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Turn project loading for organisations on or off
    #[must_use]
    pub fn with_load_all_projects(mut self, load: bool) -> Self {
        self.load_all_projects = load;
        self
    }

    /// Whether the limit allows another record after `seen`
    pub fn allows(&self, seen: u64) -> bool {
        self.limit.map_or(true, |limit| seen < limit)
    }
}

/// Statistics from one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Records taken from the list
    pub records_seen: u64,
    /// Records handed to the callback
    pub records_processed: u64,
    /// Records dropped because a follow-up fetch failed
    pub records_skipped: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CrawlStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// One optional callback per entity kind
#[derive(Default)]
pub struct CrawlCallbacks<'a> {
    project: Option<RecordCallback<'a>>,
    person: Option<RecordCallback<'a>>,
    organisation: Option<RecordCallback<'a>>,
    publication: Option<RecordCallback<'a>>,
}

impl<'a> CrawlCallbacks<'a> {
    /// No callbacks; crawling with this does nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback for `kind`, replacing any earlier one
    #[must_use]
    pub fn on(mut self, kind: EntityKind, callback: impl FnMut(Record) + Send + 'a) -> Self {
        *self.slot(kind) = Some(Box::new(callback));
        self
    }

    /// Callback for `kind`, if registered
    pub fn get_mut(&mut self, kind: EntityKind) -> Option<&mut RecordCallback<'a>> {
        self.slot(kind).as_mut()
    }

    /// Whether a callback is registered for `kind`
    pub fn has(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Project => self.project.is_some(),
            EntityKind::Person => self.person.is_some(),
            EntityKind::Organisation => self.organisation.is_some(),
            EntityKind::Publication => self.publication.is_some(),
        }
    }

    fn slot(&mut self, kind: EntityKind) -> &mut Option<RecordCallback<'a>> {
        match kind {
            EntityKind::Project => &mut self.project,
            EntityKind::Person => &mut self.person,
            EntityKind::Organisation => &mut self.organisation,
            EntityKind::Publication => &mut self.publication,
        }
    }
}

impl std::fmt::Debug for CrawlCallbacks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect();
        f.debug_struct("CrawlCallbacks")
            .field("registered", &registered)
            .finish()
    }
}
