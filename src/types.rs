//! Common types used throughout the GtR client
//!
//! Shared type definitions, type aliases, and the entity vocabulary of the API.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Entity Kinds
// ============================================================================

/// The entity collections exposed by the Gateway to Research API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Funded research projects
    Project,
    /// Research organisations, funders and collaborators
    Organisation,
    /// Investigators and project staff
    Person,
    /// Research publications
    Publication,
}

impl EntityKind {
    /// Every kind, in crawl order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Project,
        EntityKind::Person,
        EntityKind::Organisation,
        EntityKind::Publication,
    ];

    /// URL path segment of the collection endpoint, and the key under which
    /// records of this kind appear in list bodies and record views
    pub fn item_key(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Organisation => "organisation",
            EntityKind::Person => "person",
            EntityKind::Publication => "publication",
        }
    }

    /// Envelope element wrapping a single-entity response
    pub fn overview_key(self) -> &'static str {
        match self {
            EntityKind::Project => "projectOverview",
            EntityKind::Organisation => "organisationOverview",
            EntityKind::Person => "personOverview",
            EntityKind::Publication => "publicationOverview",
        }
    }

    /// Plural name, as used for log output
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Organisation => "organisations",
            EntityKind::Person => "people",
            EntityKind::Publication => "publications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.item_key())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for opt-in transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
