//! Projection of page bodies into records

use super::types::Record;
use crate::decode::as_list;
use crate::types::EntityKind;
use serde_json::Value;

/// Which record list a paged body carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// A collection endpoint, e.g. `/project/`, listing entities of one kind
    Entities(EntityKind),
    /// An organisation response, paged over the organisation's projects
    OrganisationProjects,
}

impl Listing {
    /// Kind of the records this listing yields
    pub fn kind(self) -> EntityKind {
        match self {
            Listing::Entities(kind) => kind,
            Listing::OrganisationProjects => EntityKind::Project,
        }
    }

    /// Records held by one page body, in the order the page lists them.
    ///
    /// A lone entry that is not wrapped in an array counts as a one-item list.
    pub fn records(self, body: &Value) -> Vec<Record> {
        let items = match self {
            Listing::Entities(kind) => body.get(kind.item_key()),
            Listing::OrganisationProjects => {
                let overview = body
                    .get(EntityKind::Organisation.overview_key())
                    .unwrap_or(body);
                overview.get(EntityKind::Project.item_key())
            }
        };

        let kind = self.kind();
        as_list(items)
            .into_iter()
            .map(|item| Record::from_item(kind, item.clone()))
            .collect()
    }
}
