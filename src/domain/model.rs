use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One object inside the authored project, as returned by the remote service.
///
/// The attribute set is controlled entirely by the authoring application's
/// schema, so the descriptor stays an open map. Accessors exist only for the
/// keys the query helpers themselves interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WwiseObject {
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl WwiseObject {
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn path(&self) -> Option<&str> {
        self.str_field("path")
    }

    pub fn type_name(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn short_id(&self) -> Option<i64> {
        self.fields.get("shortId").and_then(Value::as_i64)
    }

    /// Generic accessor for any string-valued attribute, including the
    /// namespaced ones like `workunit:type` or `sound:originalWavFilePath`.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// The `version` record of the get-info response. Only the display name is
/// interpreted; the rest of the record is left to the remote schema.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "displayName")]
    pub display_name: String,
}
