//! Generic record type and entity accessors

use crate::decode::{as_list, extract_path, value_text};
use crate::error::{Error, Result};
use crate::types::EntityKind;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role marker carried by principal investigators
const PRINCIPAL_INVESTIGATOR: &str = "PRINCIPAL_INVESTIGATOR";

/// Role marker carried by co-investigators
const CO_INVESTIGATOR: &str = "CO_INVESTIGATOR";

/// One decoded entity.
///
/// The view is an object holding the entity itself under its item key
/// (`project`, `organisation`, `person`, `publication`) next to whatever
/// relations the response embedded (lead organisation, people, projects).
/// XML and JSON responses decode to the same view, so every accessor works
/// for both formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    kind: EntityKind,
    view: Value,
}

impl Record {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a bare entity object, as found in list pages and relation lists
    pub fn from_summary(kind: EntityKind, item: Value) -> Self {
        let mut view = Map::new();
        view.insert(kind.item_key().to_string(), item);
        Self {
            kind,
            view: Value::Object(view),
        }
    }

    /// Build a record from either a bare entity or an object that already
    /// holds the entity under its item key (a project composition, say)
    pub fn from_item(kind: EntityKind, item: Value) -> Self {
        let wrapped = item
            .as_object()
            .is_some_and(|map| map.contains_key(kind.item_key()));
        if wrapped {
            Self { kind, view: item }
        } else {
            Self::from_summary(kind, item)
        }
    }

    /// Build a record from a decoded single-entity response.
    ///
    /// Strips the `<kind>Overview` envelope (present in JSON, consumed as the
    /// root element in XML) and, for projects, the `projectComposition` layer.
    pub fn from_entity_body(kind: EntityKind, body: Value) -> Result<Self> {
        let mut body = body;
        let overview = body.get_mut(kind.overview_key()).map(Value::take);
        let mut view = overview.unwrap_or(body);

        if kind == EntityKind::Project {
            let composition = view.get_mut("projectComposition").map(Value::take);
            if let Some(composition) = composition {
                view = composition;
            }
        }

        let has_entity = view
            .as_object()
            .is_some_and(|map| map.contains_key(kind.item_key()));
        if !has_entity {
            return Err(Error::missing_field(kind.to_string(), kind.item_key()));
        }

        Ok(Self { kind, view })
    }

    // ========================================================================
    // Raw access
    // ========================================================================

    /// Entity kind of this record
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The full decoded view, relations included
    pub fn view(&self) -> &Value {
        &self.view
    }

    /// Consume the record, returning its view
    pub fn into_view(self) -> Value {
        self.view
    }

    /// The entity object itself
    pub fn entity(&self) -> Option<&Value> {
        self.view.get(self.kind.item_key())
    }

    /// Look up a dot-separated path inside the entity object
    pub fn field(&self, path: &str) -> Option<&Value> {
        self.entity().and_then(|entity| extract_path(entity, path))
    }

    /// Text of the value at `path` inside the entity object
    pub fn text(&self, path: &str) -> Option<String> {
        self.field(path).and_then(value_text)
    }

    /// Serialise the view as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.view)?
        } else {
            serde_json::to_string(&self.view)?
        };
        Ok(json)
    }

    // ========================================================================
    // Common fields
    // ========================================================================

    /// Entity identifier
    pub fn id(&self) -> Option<String> {
        self.text("id")
    }

    /// Canonical API URL of the entity
    pub fn url(&self) -> Option<String> {
        self.text("url")
    }

    /// Title (projects and publications)
    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    /// Name (organisations)
    pub fn name(&self) -> Option<String> {
        self.text("name")
    }

    // ========================================================================
    // Project fields
    // ========================================================================

    /// Project status, e.g. `Active` or `Closed`
    pub fn status(&self) -> Option<String> {
        self.text("status")
    }

    /// Project abstract
    pub fn abstract_text(&self) -> Option<String> {
        self.text("abstractText")
    }

    /// Fund start, exactly as served
    pub fn start(&self) -> Option<String> {
        self.text("fund.start")
    }

    /// Fund end, exactly as served
    pub fn end(&self) -> Option<String> {
        self.text("fund.end")
    }

    /// Fund start as a calendar date
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.field("fund.start").and_then(parse_date)
    }

    /// Fund end as a calendar date
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.field("fund.end").and_then(parse_date)
    }

    /// Name of the funding council
    pub fn funder_name(&self) -> Option<String> {
        self.text("fund.funder.name")
    }

    /// Award value in pounds
    pub fn value_pounds(&self) -> Option<f64> {
        match self.field("fund.valuePounds")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Grant category
    pub fn category(&self) -> Option<String> {
        self.text("grantCategory")
    }

    /// Grant reference
    pub fn reference(&self) -> Option<String> {
        self.text("grantReference")
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Lead research organisation of a project
    pub fn lead_organisation(&self) -> Option<Record> {
        if self.kind != EntityKind::Project {
            return None;
        }
        match self.view.get("leadResearchOrganisation")? {
            Value::Null => None,
            lead => Some(Record::from_item(EntityKind::Organisation, lead.clone())),
        }
    }

    /// Organisations taking part in a project
    pub fn organisations(&self) -> Vec<Record> {
        match self.kind {
            EntityKind::Project => self.related(
                &["organisation", "organisations.organisation"],
                EntityKind::Organisation,
            ),
            _ => Vec::new(),
        }
    }

    /// People attached to a project
    pub fn people(&self) -> Vec<Record> {
        match self.kind {
            EntityKind::Project => self.related(
                &["projectPerson", "projectPeople.projectPerson"],
                EntityKind::Person,
            ),
            _ => Vec::new(),
        }
    }

    /// Collaborating organisations of a project
    pub fn collaborators(&self) -> Vec<Record> {
        match self.kind {
            EntityKind::Project => self.related(
                &["collaborator", "collaborations.collaborator"],
                EntityKind::Organisation,
            ),
            _ => Vec::new(),
        }
    }

    /// Projects of an organisation or a person
    pub fn projects(&self) -> Vec<Record> {
        match self.kind {
            EntityKind::Organisation => {
                self.related(&["project", "projects.project"], EntityKind::Project)
            }
            EntityKind::Person => self.related(
                &["projectComposition", "projectCompositions.projectComposition"],
                EntityKind::Project,
            ),
            _ => Vec::new(),
        }
    }

    /// Replace the project list of an organisation
    pub fn set_projects(&mut self, projects: Vec<Record>) {
        let projects = projects
            .into_iter()
            .filter_map(|project| match project.into_view() {
                Value::Object(mut view) => view.remove(EntityKind::Project.item_key()),
                _ => None,
            })
            .collect();

        if let Some(view) = self.view.as_object_mut() {
            view.remove("projects");
            view.insert(
                EntityKind::Project.item_key().to_string(),
                Value::Array(projects),
            );
        }
    }

    // ========================================================================
    // Person fields
    // ========================================================================

    /// Roles a person holds on the project they were listed under
    pub fn project_roles(&self) -> Vec<String> {
        if self.kind != EntityKind::Person {
            return Vec::new();
        }
        as_list(self.field("projectRole"))
            .into_iter()
            .filter_map(value_text)
            .collect()
    }

    /// Whether the person is flagged and listed as a principal investigator
    pub fn is_principal_investigator(&self) -> bool {
        self.has_role("principalInvestigator", PRINCIPAL_INVESTIGATOR)
    }

    /// Whether the person is flagged and listed as a co-investigator
    pub fn is_co_investigator(&self) -> bool {
        self.has_role("coInvestigator", CO_INVESTIGATOR)
    }

    fn has_role(&self, flag: &str, role: &str) -> bool {
        self.field(flag).is_some_and(is_true) && self.project_roles().iter().any(|r| r == role)
    }

    /// Records found at the first of `paths` present in the view
    fn related(&self, paths: &[&str], kind: EntityKind) -> Vec<Record> {
        paths
            .iter()
            .find_map(|path| extract_path(&self.view, path))
            .map(|found| {
                as_list(Some(found))
                    .into_iter()
                    .map(|item| Record::from_item(kind, item.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Interpret a flag that JSON serves as a boolean and XML as text
fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Dates arrive as epoch milliseconds (JSON) or ISO-8601 text (XML)
fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => {
            DateTime::from_timestamp_millis(n.as_i64()?).map(|dt| dt.date_naive())
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(millis) = s.parse::<i64>() {
                return DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive());
            }
            NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}
