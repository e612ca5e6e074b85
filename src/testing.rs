//! In-memory GtR gateway for unit tests
//!
//! Serves deterministic list pages and entities in either wire format, with
//! the same paging headers the real API sends, and records every request.

use crate::client::GtrClient;
use crate::config::ClientConfig;
use crate::decode::Format;
use crate::error::Result;
use crate::http::{RawResponse, Transport};
use crate::pagination::{
    LINK_HEADER, PAGE_COUNT_HEADER, PAGE_PARAM, PAGE_SIZE_PARAM, RECORD_COUNT_HEADER,
};
use crate::query::get_query_param;
use crate::types::EntityKind;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub(crate) const BASE_URL: &str = "http://gtr.test/api";

const NAMESPACE: &str = "http://gtr.rcuk.ac.uk/api";

/// Fake API deployment. Record ids look like `project-7`.
#[derive(Default)]
pub(crate) struct FakeGateway {
    counts: HashMap<EntityKind, u32>,
    organisation_projects: HashMap<String, u32>,
    forced_page_size: Option<u32>,
    failing_pages: HashSet<u32>,
    garbled_pages: HashSet<u32>,
    failing_entities: HashSet<String>,
    unpaged_pages: HashSet<u32>,
    slow_pages: HashMap<u32, Duration>,
    unpaged: bool,
    requests: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve `count` records of `kind`
    pub(crate) fn with_records(mut self, kind: EntityKind, count: u32) -> Self {
        self.counts.insert(kind, count);
        self
    }

    /// Ignore the requested `fetchSize` and always page by `size`
    pub(crate) fn with_forced_page_size(mut self, size: u32) -> Self {
        self.forced_page_size = Some(size);
        self
    }

    /// Answer list page `page` with a 500
    pub(crate) fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Answer list page `page` with a body that does not decode
    pub(crate) fn with_garbled_page(mut self, page: u32) -> Self {
        self.garbled_pages.insert(page);
        self
    }

    /// Answer the entity endpoint of `id` with a 404
    pub(crate) fn with_failing_entity(mut self, id: &str) -> Self {
        self.failing_entities.insert(id.to_string());
        self
    }

    /// Give organisation `id` a paged list of `count` projects
    pub(crate) fn with_organisation_projects(mut self, id: &str, count: u32) -> Self {
        self.organisation_projects.insert(id.to_string(), count);
        self
    }

    /// Leave the paging headers off list page `page`
    pub(crate) fn with_unpaged_page(mut self, page: u32) -> Self {
        self.unpaged_pages.insert(page);
        self
    }

    /// Hold every request for page `page` for `delay` before answering
    pub(crate) fn with_slow_page(mut self, page: u32, delay: Duration) -> Self {
        self.slow_pages.insert(page, delay);
        self
    }

    /// Leave the paging headers off every response
    pub(crate) fn without_paging_headers(mut self) -> Self {
        self.unpaged = true;
        self
    }

    /// Client talking to this gateway
    pub(crate) fn client(self: &Arc<Self>, format: Format) -> GtrClient {
        let transport: Arc<dyn Transport> = Arc::clone(self) as Arc<dyn Transport>;
        GtrClient::with_transport(ClientConfig::new(BASE_URL).with_format(format), transport)
            .unwrap()
    }

    /// Every URL requested so far
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests so far
    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of entity (non-list) requests for `kind`
    pub(crate) fn entity_requests(&self, kind: EntityKind) -> usize {
        let prefix = format!("{BASE_URL}/{}/", kind.item_key());
        self.requests()
            .iter()
            .filter_map(|url| url.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.starts_with('?'))
            .count()
    }

    fn respond(&self, url: &str, format: Format) -> RawResponse {
        let parsed = Url::parse(url).unwrap();
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        // Paths are /api/<kind>/ and /api/<kind>/<id>
        let kind = match segments.get(1).copied() {
            Some("project") => EntityKind::Project,
            Some("organisation") => EntityKind::Organisation,
            Some("person") => EntityKind::Person,
            Some("publication") => EntityKind::Publication,
            _ => return RawResponse::new(404, "no such endpoint"),
        };

        match segments.get(2) {
            None => self.list_page(kind, url, format),
            Some(id) => self.entity(kind, id, url, format),
        }
    }

    fn list_page(&self, kind: EntityKind, url: &str, format: Format) -> RawResponse {
        let total = self.counts.get(&kind).copied().unwrap_or(0);
        let (page, size) = self.page_and_size(url);

        if self.failing_pages.contains(&page) {
            return RawResponse::new(500, "upstream failure");
        }
        if self.garbled_pages.contains(&page) {
            return self.paged(RawResponse::new(200, "<<garbled"), kind, "", total, page, size);
        }

        let items: Vec<Value> = window(total, page, size)
            .map(|n| summary(kind, &format!("{}-{n}", kind.item_key())))
            .collect();
        let body = match format {
            Format::Json => json!({ kind.item_key(): items, "page": page }).to_string(),
            Format::Xml => xml_document(kind.plural(), &[(kind.item_key(), items.as_slice())], None),
        };

        self.paged(RawResponse::new(200, body), kind, "", total, page, size)
    }

    fn entity(&self, kind: EntityKind, id: &str, url: &str, format: Format) -> RawResponse {
        if self.failing_entities.contains(id) {
            return RawResponse::new(404, format!("{id} not found"));
        }

        let mut entity = summary(kind, id);
        entity["detail"] = json!("full");

        if kind == EntityKind::Organisation {
            let total = self.organisation_projects.get(id).copied().unwrap_or(0);
            let (page, size) = self.page_and_size(url);
            let projects: Vec<Value> = window(total, page, size)
                .map(|n| summary(EntityKind::Project, &format!("{id}-project-{n}")))
                .collect();
            let body = match format {
                Format::Json => json!({
                    "organisationOverview": {"organisation": entity, "project": projects}
                })
                .to_string(),
                Format::Xml => xml_document(
                    "organisationOverview",
                    &[
                        ("organisation", vec![entity].as_slice()),
                        ("project", projects.as_slice()),
                    ],
                    None,
                ),
            };
            return self.paged(RawResponse::new(200, body), kind, id, total, page, size);
        }

        let body = match (kind, format) {
            (EntityKind::Project, Format::Json) => {
                json!({"projectOverview": {"projectComposition": {"project": entity}}}).to_string()
            }
            (EntityKind::Project, Format::Xml) => xml_document(
                "projectOverview",
                &[("project", vec![entity].as_slice())],
                Some("projectComposition"),
            ),
            (_, Format::Json) => {
                json!({ kind.overview_key(): { kind.item_key(): entity } }).to_string()
            }
            (_, Format::Xml) => {
                xml_document(
                    kind.overview_key(),
                    &[(kind.item_key(), vec![entity].as_slice())],
                    None,
                )
            }
        };
        RawResponse::new(200, body)
    }

    fn page_and_size(&self, url: &str) -> (u32, u32) {
        let page = get_query_param(url, PAGE_PARAM)
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        let size = self.forced_page_size.unwrap_or_else(|| {
            get_query_param(url, PAGE_SIZE_PARAM)
                .and_then(|s| s.parse().ok())
                .unwrap_or(25)
        });
        (page, size)
    }

    fn paged(
        &self,
        mut response: RawResponse,
        kind: EntityKind,
        id: &str,
        total: u32,
        page: u32,
        size: u32,
    ) -> RawResponse {
        if self.unpaged || self.unpaged_pages.contains(&page) {
            return response;
        }

        let pages = total.div_ceil(size).max(1);
        let link = |n: u32| format!("{BASE_URL}/{}/{id}?page={n}&fetchSize={size}", kind.item_key());
        let mut links = vec![format!("<{}>;rel=first", link(1))];
        if page > 1 {
            links.push(format!("<{}>;rel=previous", link(page - 1)));
        }
        if page < pages {
            links.push(format!("<{}>;rel=next", link(page + 1)));
        }
        links.push(format!("<{}>;rel=last", link(pages)));

        let headers: &mut HeaderMap = &mut response.headers;
        headers.insert(RECORD_COUNT_HEADER, HeaderValue::from(total));
        headers.insert(PAGE_COUNT_HEADER, HeaderValue::from(pages));
        headers.insert(
            LINK_HEADER,
            HeaderValue::from_str(&links.join(",")).unwrap(),
        );
        response
    }
}

#[async_trait]
impl Transport for FakeGateway {
    async fn get(&self, url: &str, accept: Format) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        let page: Option<u32> = get_query_param(url, PAGE_PARAM).and_then(|p| p.parse().ok());
        if let Some(delay) = page.and_then(|p| self.slow_pages.get(&p)) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.respond(url, accept))
    }
}

/// 1-based record numbers on `page`
fn window(total: u32, page: u32, size: u32) -> impl Iterator<Item = u32> {
    let start = page.saturating_sub(1).saturating_mul(size) + 1;
    let end = page.saturating_mul(size).min(total);
    start..=end
}

fn summary(kind: EntityKind, id: &str) -> Value {
    let label = match kind {
        EntityKind::Organisation | EntityKind::Person => "name",
        EntityKind::Project | EntityKind::Publication => "title",
    };
    json!({
        "id": id,
        "url": format!("{BASE_URL}/{}/{id}", kind.item_key()),
        label: format!("Summary of {id}"),
    })
}

/// Serialise flat objects as namespaced GtR XML. `url` becomes an attribute.
fn xml_document(root: &str, children: &[(&str, &[Value])], wrapper: Option<&str>) -> String {
    let mut inner = String::new();
    for (name, items) in children {
        for item in *items {
            let url = item["url"].as_str().unwrap_or_default();
            inner.push_str(&format!("<gtr:{name} url=\"{url}\">"));
            for (key, value) in item.as_object().unwrap() {
                if key != "url" {
                    let text = value.as_str().unwrap_or_default();
                    inner.push_str(&format!("<gtr:{key}>{text}</gtr:{key}>"));
                }
            }
            inner.push_str(&format!("</gtr:{name}>"));
        }
    }
    if let Some(wrapper) = wrapper {
        inner = format!("<gtr:{wrapper}>{inner}</gtr:{wrapper}>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><gtr:{root} xmlns:gtr=\"{NAMESPACE}\">{inner}</gtr:{root}>"
    )
}
