//! Gateway to Research client

use crate::config::ClientConfig;
use crate::decode::Format;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Transport};
use crate::pagination::{
    constrain_page_size, Cursor, Page, PageFetcher, PagedCollection, PAGE_PARAM, PAGE_SIZE_PARAM,
};
use crate::query::set_query_param;
use crate::record::{Listing, Record};
use crate::types::EntityKind;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Client for one GtR API deployment.
///
/// Cheap to clone; clones share the transport. Every call awaits a single
/// request before issuing the next.
#[derive(Clone)]
pub struct GtrClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl GtrClient {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_client_config())?;
        Self::with_transport(config, Arc::new(http))
    }

    /// Create a client using a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Default wire format
    pub fn format(&self) -> Format {
        self.config.format
    }

    /// Default page size, already clamped
    pub fn page_size(&self) -> u32 {
        self.config.effective_page_size()
    }

    /// Collection endpoint for `kind`, e.g. `{base}/project/`
    pub fn endpoint(&self, kind: EntityKind) -> String {
        format!("{}/{}/", self.config.api_root(), kind.item_key())
    }

    /// Endpoint of a single entity
    pub fn entity_url(&self, kind: EntityKind, id: &str) -> String {
        format!("{}{}", self.endpoint(kind), id)
    }

    // ========================================================================
    // Page Fetching
    // ========================================================================

    /// GET `url` as `format` and return the decoded body with its paging state.
    ///
    /// `page` overrides the `page` parameter; `page_size` is clamped to
    /// 25..=100 and overrides `fetchSize`. Anything but a 200 response, and
    /// any body that does not decode, is an error.
    pub async fn fetch(
        &self,
        url: &str,
        format: Format,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Page> {
        let mut url = url.to_string();
        if let Some(page) = page {
            url = set_query_param(&url, PAGE_PARAM, &page.to_string())?;
        }
        if let Some(size) = constrain_page_size(page_size) {
            url = set_query_param(&url, PAGE_SIZE_PARAM, &size.to_string())?;
        }

        debug!(url = %url, format = %format, "Fetching page");
        let response = self.transport.get(&url, format).await?;
        if !response.is_ok() {
            return Err(Error::http_status(response.status, response.body));
        }

        let body = format.decode(&response.body)?;
        let cursor = Cursor::from_headers(&response.headers);
        Ok(Page::new(body, cursor))
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// Paged list of every entity of `kind`
    pub async fn list(
        &self,
        kind: EntityKind,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        let url = self.endpoint(kind);
        self.collection(url, Listing::Entities(kind), page, page_size)
            .await
    }

    /// Paged list of projects
    pub async fn projects(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        self.list(EntityKind::Project, page, page_size).await
    }

    /// Paged list of organisations
    pub async fn organisations(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        self.list(EntityKind::Organisation, page, page_size).await
    }

    /// Paged list of people
    pub async fn people(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        self.list(EntityKind::Person, page, page_size).await
    }

    /// Paged list of publications
    pub async fn publications(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        self.list(EntityKind::Publication, page, page_size).await
    }

    /// Paged list of one organisation's projects
    pub async fn organisation_projects(
        &self,
        id: &str,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        let url = self.entity_url(EntityKind::Organisation, id);
        self.collection(url, Listing::OrganisationProjects, None, page_size)
            .await
    }

    async fn collection(
        &self,
        url: String,
        listing: Listing,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PagedCollection> {
        let page_size = constrain_page_size(page_size).unwrap_or_else(|| self.page_size());
        let format = self.format();
        let first = self.fetch(&url, format, page, Some(page_size)).await?;

        Ok(PagedCollection::new(
            Arc::new(self.clone()),
            url,
            listing,
            format,
            Some(page_size),
            first,
        ))
    }

    // ========================================================================
    // Entities
    // ========================================================================

    /// Full representation of one entity
    pub async fn entity(&self, kind: EntityKind, id: &str) -> Result<Record> {
        let url = self.entity_url(kind, id);
        let page = self.fetch(&url, self.format(), None, None).await?;
        Record::from_entity_body(kind, page.body)
    }

    /// One project
    pub async fn project(&self, id: &str) -> Result<Record> {
        self.entity(EntityKind::Project, id).await
    }

    /// One organisation
    pub async fn organisation(&self, id: &str) -> Result<Record> {
        self.entity(EntityKind::Organisation, id).await
    }

    /// One person
    pub async fn person(&self, id: &str) -> Result<Record> {
        self.entity(EntityKind::Person, id).await
    }

    /// One publication
    pub async fn publication(&self, id: &str) -> Result<Record> {
        self.entity(EntityKind::Publication, id).await
    }

    /// Re-fetch a record by id.
    ///
    /// The result holds only what the entity endpoint returns; relation data
    /// that was embedded in a list summary is not carried over.
    pub async fn refresh(&self, record: &Record) -> Result<Record> {
        let kind = record.kind();
        let id = record
            .id()
            .ok_or_else(|| Error::missing_field(kind.to_string(), "id"))?;
        self.entity(kind, &id).await
    }
}

#[async_trait]
impl PageFetcher for GtrClient {
    async fn fetch_page(
        &self,
        url: &str,
        format: Format,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Page> {
        self.fetch(url, format, page, page_size).await
    }
}

impl std::fmt::Debug for GtrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GtrClient")
            .field("base_url", &self.config.base_url)
            .field("format", &self.config.format)
            .field("page_size", &self.page_size())
            .finish_non_exhaustive()
    }
}
