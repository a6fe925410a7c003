use crate::utils::error::WaError;
use serde_json::{json, Value};
use std::str::FromStr;

/// Attributes requested for every object returned by a query. The list is
/// dictated by the authoring application's schema.
pub const RETURN_FIELDS: &[&str] = &[
    "id",
    "name",
    "notes",
    "type",
    "path",
    "parent",
    "owner",
    "shortId",
    "category",
    "filePath",
    "workunit",
    "workunit:isDefault",
    "workunit:type",
    "workunit:isDirty",
    "childrenCount",
    "sound:originalWavFilePath",
    "sound:convertedWemFilePath",
    "soundbank:bnkFilePath",
    "@Volume",
    "@IsVoice",
    "@OutputBus",
];

/// Per-call options carrying the full return field list.
pub fn return_options() -> Value {
    json!({ "return": RETURN_FIELDS })
}

/// Hierarchy traversal direction, mapped to its select-transform keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Parent,
    Ancestors,
    Children,
    Descendants,
}

impl Relation {
    pub fn keyword(self) -> &'static str {
        match self {
            Relation::Parent => "parent",
            Relation::Ancestors => "ancestors",
            Relation::Children => "children",
            Relation::Descendants => "descendants",
        }
    }
}

impl FromStr for Relation {
    type Err = WaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Relation::Parent),
            "ancestors" => Ok(Relation::Ancestors),
            "children" => Ok(Relation::Children),
            "descendants" => Ok(Relation::Descendants),
            other => Err(WaError::InvalidConfigValueError {
                field: "relation".to_string(),
                value: other.to_string(),
                reason: "expected one of: parent, ancestors, children, descendants".to_string(),
            }),
        }
    }
}

/// Name predicate applied by the remote service in a where-transform.
///
/// `Matches` carries a regular expression, `Contains` a plain substring. The
/// pattern is substituted into the request verbatim, except that an empty
/// `Matches` pattern falls back to the match-all expression `".+"`. An empty
/// `Contains` substring already matches every name on the server side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    Matches(String),
    Contains(String),
}

impl NameFilter {
    pub fn matches(pattern: impl Into<String>) -> Self {
        NameFilter::Matches(pattern.into())
    }

    pub fn contains(substring: impl Into<String>) -> Self {
        NameFilter::Contains(substring.into())
    }

    pub fn operator(&self) -> &'static str {
        match self {
            NameFilter::Matches(_) => "name:matches",
            NameFilter::Contains(_) => "name:contains",
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            NameFilter::Matches(pattern) if pattern.is_empty() => ".+",
            NameFilter::Matches(pattern) => pattern,
            NameFilter::Contains(substring) => substring,
        }
    }

    fn predicate(&self) -> Value {
        json!({ "where": [self.operator(), self.pattern()] })
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        NameFilter::Matches(".+".to_string())
    }
}

/// `{"from": {"id": [...]}}` — look up known objects by id.
pub fn from_ids(ids: &[String]) -> Value {
    json!({ "from": { "id": ids } })
}

/// Traversal query: start from `ids`, select the relation, filter by name.
pub fn relation_args(ids: &[String], relation: Relation, filter: &NameFilter) -> Value {
    json!({
        "from": { "id": ids },
        "transform": [
            { "select": [relation.keyword()] },
            filter.predicate(),
        ],
    })
}

/// Type query: every object of `type_name`, filtered by name.
pub fn of_type_args(type_name: &str, filter: &NameFilter) -> Value {
    json!({
        "from": { "ofType": [type_name] },
        "transform": [filter.predicate()],
    })
}

/// Create-object payload. Name collisions merge into the existing object.
pub fn create_args(parent: &str, type_name: &str, name: &str) -> Value {
    json!({
        "parent": parent,
        "type": type_name,
        "name": name,
        "onNameConflict": "merge",
    })
}
