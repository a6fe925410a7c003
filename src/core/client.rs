use crate::adapters::wamp::WampSocket;
use crate::core::query::{self, NameFilter, Relation};
use crate::domain::model::{VersionInfo, WwiseObject};
use crate::domain::ports::WaapiRpc;
use crate::utils::error::{Result, WaError};
use serde_json::{json, Value};

pub const FUNC_GET_INFO: &str = "ak.wwise.core.getInfo";
pub const FUNC_GET_SELECTED: &str = "ak.wwise.ui.getSelectedObjects";
pub const FUNC_GET: &str = "ak.wwise.core.object.get";
pub const FUNC_CREATE: &str = "ak.wwise.core.object.create";

/// Query helpers over the authoring application's remote procedure surface.
///
/// Every method builds a small request payload, invokes one of the four
/// remote procedures through the [`WaapiRpc`] port and unwraps the `return`
/// or `objects` field of the response. No state is kept beyond the
/// connection itself.
#[derive(Debug)]
pub struct WaClient<R: WaapiRpc> {
    rpc: R,
}

impl WaClient<WampSocket> {
    /// Connect to a running authoring application at `url`
    /// (typically `ws://127.0.0.1:8080/waapi`).
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(WampSocket::connect(url).await?))
    }

    pub async fn disconnect(self) -> Result<()> {
        self.rpc.close().await
    }
}

impl<R: WaapiRpc> WaClient<R> {
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    /// Version of the connected authoring application (display name).
    pub async fn get_info(&mut self) -> Result<String> {
        let result = self.rpc.call(FUNC_GET_INFO, json!({}), json!({})).await?;
        let version = result
            .get("version")
            .cloned()
            .ok_or_else(|| missing_field(FUNC_GET_INFO, "version"))?;
        let version: VersionInfo = serde_json::from_value(version)?;
        tracing::info!("Connected to Wwise {}", version.display_name);
        Ok(version.display_name)
    }

    /// Objects currently selected in the authoring UI (multi-select aware).
    pub async fn get_selected(&mut self) -> Result<Vec<WwiseObject>> {
        let result = self
            .rpc
            .call(FUNC_GET_SELECTED, json!({}), query::return_options())
            .await?;
        unwrap_objects(FUNC_GET_SELECTED, &result, "objects")
    }

    /// Ids of the current selection.
    pub async fn get_selected_ids(&mut self) -> Result<Vec<String>> {
        let selected = self.get_selected().await?;
        Ok(selected
            .iter()
            .filter_map(|object| object.id().map(str::to_string))
            .collect())
    }

    /// Descriptors for already-known ids.
    pub async fn get_by_ids(&mut self, ids: &[String]) -> Result<Vec<WwiseObject>> {
        let result = self
            .rpc
            .call(FUNC_GET, query::from_ids(ids), query::return_options())
            .await?;
        unwrap_objects(FUNC_GET, &result, "return")
    }

    /// Traverse from `ids` along `relation` and keep the objects whose name
    /// passes `filter`. The eight `get_*_matches` / `get_*_contains` helpers
    /// below are fixed-parameter forms of this query.
    pub async fn related(
        &mut self,
        ids: &[String],
        relation: Relation,
        filter: NameFilter,
    ) -> Result<Vec<WwiseObject>> {
        let args = query::relation_args(ids, relation, &filter);
        let result = self.rpc.call(FUNC_GET, args, query::return_options()).await?;
        unwrap_objects(FUNC_GET, &result, "return")
    }

    pub async fn get_parent_matches(
        &mut self,
        ids: &[String],
        pattern: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Parent, NameFilter::matches(pattern))
            .await
    }

    pub async fn get_ancestors_matches(
        &mut self,
        ids: &[String],
        pattern: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Ancestors, NameFilter::matches(pattern))
            .await
    }

    pub async fn get_children_matches(
        &mut self,
        ids: &[String],
        pattern: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Children, NameFilter::matches(pattern))
            .await
    }

    pub async fn get_descendants_matches(
        &mut self,
        ids: &[String],
        pattern: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Descendants, NameFilter::matches(pattern))
            .await
    }

    pub async fn get_parent_contains(
        &mut self,
        ids: &[String],
        substring: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Parent, NameFilter::contains(substring))
            .await
    }

    pub async fn get_ancestors_contains(
        &mut self,
        ids: &[String],
        substring: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Ancestors, NameFilter::contains(substring))
            .await
    }

    pub async fn get_children_contains(
        &mut self,
        ids: &[String],
        substring: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Children, NameFilter::contains(substring))
            .await
    }

    pub async fn get_descendants_contains(
        &mut self,
        ids: &[String],
        substring: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.related(ids, Relation::Descendants, NameFilter::contains(substring))
            .await
    }

    /// Every object of `type_name` whose name passes `filter`.
    pub async fn of_type(
        &mut self,
        type_name: &str,
        filter: NameFilter,
    ) -> Result<Vec<WwiseObject>> {
        let args = query::of_type_args(type_name, &filter);
        let result = self.rpc.call(FUNC_GET, args, query::return_options()).await?;
        unwrap_objects(FUNC_GET, &result, "return")
    }

    pub async fn get_type_matches(
        &mut self,
        type_name: &str,
        pattern: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.of_type(type_name, NameFilter::matches(pattern)).await
    }

    pub async fn get_type_contains(
        &mut self,
        type_name: &str,
        substring: &str,
    ) -> Result<Vec<WwiseObject>> {
        self.of_type(type_name, NameFilter::contains(substring)).await
    }

    /// Create an object of `type_name` named `name` under `parent` (an object
    /// path or id). A name collision merges into the existing object.
    pub async fn create(
        &mut self,
        parent: &str,
        type_name: &str,
        name: &str,
    ) -> Result<WwiseObject> {
        let args = query::create_args(parent, type_name, name);
        let result = self.rpc.call(FUNC_CREATE, args, json!({})).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Create an object from its full path, e.g.
    /// `\Actor-Mixer Hierarchy\Default Work Unit\New_Sound`: the last path
    /// segment becomes the object name, the rest the parent.
    pub async fn create_from_path(&mut self, path: &str, type_name: &str) -> Result<WwiseObject> {
        let (parent, name) = split_object_path(path)?;
        self.create(parent, type_name, name).await
    }
}

fn split_object_path(path: &str) -> Result<(&str, &str)> {
    match path.rsplit_once('\\') {
        Some((parent, name)) if !parent.is_empty() && !name.is_empty() => Ok((parent, name)),
        _ => Err(WaError::InvalidPathError {
            path: path.to_string(),
        }),
    }
}

fn unwrap_objects(procedure: &str, response: &Value, field: &str) -> Result<Vec<WwiseObject>> {
    let objects = response
        .get(field)
        .cloned()
        .ok_or_else(|| missing_field(procedure, field))?;
    Ok(serde_json::from_value(objects)?)
}

fn missing_field(procedure: &str, field: &str) -> WaError {
    WaError::ProtocolError {
        message: format!("{} response is missing the '{}' field", procedure, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    struct MockRpc {
        calls: Vec<(String, Value, Value)>,
        responses: VecDeque<Value>,
    }

    impl MockRpc {
        fn new(responses: Vec<Value>) -> Self {
            Self {
                calls: Vec::new(),
                responses: responses.into(),
            }
        }
    }

    #[async_trait]
    impl WaapiRpc for MockRpc {
        async fn call(&mut self, procedure: &str, args: Value, options: Value) -> Result<Value> {
            self.calls.push((procedure.to_string(), args, options));
            Ok(self.responses.pop_front().unwrap_or_else(|| json!({})))
        }
    }

    fn ids() -> Vec<String> {
        vec!["{906E2637-B380-439E-A1A6-CE0118406ED2}".to_string()]
    }

    #[tokio::test]
    async fn test_get_info_unwraps_version() {
        let rpc = MockRpc::new(vec![json!({
            "sessionId": "s",
            "version": { "displayName": "2023.1.2.8444", "year": 2023 }
        })]);
        let mut client = WaClient::new(rpc);

        let version = client.get_info().await.unwrap();

        assert_eq!(version, "2023.1.2.8444");
        let (procedure, args, options) = &client.rpc.calls[0];
        assert_eq!(procedure, FUNC_GET_INFO);
        assert_eq!(args, &json!({}));
        assert_eq!(options, &json!({}));
    }

    #[tokio::test]
    async fn test_get_info_missing_version_is_protocol_error() {
        let rpc = MockRpc::new(vec![json!({"sessionId": "s"})]);
        let mut client = WaClient::new(rpc);

        let err = client.get_info().await.unwrap_err();
        assert!(matches!(err, WaError::ProtocolError { .. }));
    }

    #[tokio::test]
    async fn test_get_selected_unwraps_objects_field() {
        let rpc = MockRpc::new(vec![json!({
            "objects": [
                { "id": "{a}", "name": "One" },
                { "id": "{b}", "name": "Two" },
            ]
        })]);
        let mut client = WaClient::new(rpc);

        let selected = client.get_selected().await.unwrap();

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name(), Some("One"));
        let (procedure, _, options) = &client.rpc.calls[0];
        assert_eq!(procedure, FUNC_GET_SELECTED);
        assert_eq!(options, &query::return_options());
    }

    #[tokio::test]
    async fn test_get_selected_ids_collects_ids() {
        let rpc = MockRpc::new(vec![json!({
            "objects": [
                { "id": "{a}" },
                { "name": "no id" },
                { "id": "{b}" },
            ]
        })]);
        let mut client = WaClient::new(rpc);

        let selected_ids = client.get_selected_ids().await.unwrap();
        assert_eq!(selected_ids, vec!["{a}".to_string(), "{b}".to_string()]);
    }

    #[tokio::test]
    async fn test_get_by_ids_forwards_from_clause() {
        let rpc = MockRpc::new(vec![json!({ "return": [] })]);
        let mut client = WaClient::new(rpc);

        client.get_by_ids(&ids()).await.unwrap();

        let (procedure, args, options) = &client.rpc.calls[0];
        assert_eq!(procedure, FUNC_GET);
        assert_eq!(args, &query::from_ids(&ids()));
        assert_eq!(options, &query::return_options());
    }

    #[tokio::test]
    async fn test_relation_helpers_build_correct_transforms() {
        let cases: Vec<(&str, &str)> = vec![
            ("parent", "name:matches"),
            ("ancestors", "name:matches"),
            ("children", "name:matches"),
            ("descendants", "name:matches"),
            ("parent", "name:contains"),
            ("ancestors", "name:contains"),
            ("children", "name:contains"),
            ("descendants", "name:contains"),
        ];

        let responses = cases.iter().map(|_| json!({ "return": [] })).collect();
        let mut client = WaClient::new(MockRpc::new(responses));

        client.get_parent_matches(&ids(), "Music.*").await.unwrap();
        client.get_ancestors_matches(&ids(), "Music.*").await.unwrap();
        client.get_children_matches(&ids(), "Music.*").await.unwrap();
        client.get_descendants_matches(&ids(), "Music.*").await.unwrap();
        client.get_parent_contains(&ids(), "Music").await.unwrap();
        client.get_ancestors_contains(&ids(), "Music").await.unwrap();
        client.get_children_contains(&ids(), "Music").await.unwrap();
        client.get_descendants_contains(&ids(), "Music").await.unwrap();

        for (call, (keyword, operator)) in client.rpc.calls.iter().zip(cases) {
            let (procedure, args, _) = call;
            assert_eq!(procedure, FUNC_GET);
            assert_eq!(args["from"]["id"][0], ids()[0]);
            assert_eq!(args["transform"][0]["select"][0], keyword);
            assert_eq!(args["transform"][1]["where"][0], operator);
        }
    }

    #[tokio::test]
    async fn test_type_queries_build_of_type_clause() {
        let rpc = MockRpc::new(vec![json!({ "return": [] }), json!({ "return": [] })]);
        let mut client = WaClient::new(rpc);

        client.get_type_matches("Sound", "Foot.+").await.unwrap();
        client.get_type_contains("RandomSequenceContainer", "Steps").await.unwrap();

        let (_, args, _) = &client.rpc.calls[0];
        assert_eq!(args["from"]["ofType"][0], "Sound");
        assert_eq!(args["transform"][0]["where"], json!(["name:matches", "Foot.+"]));

        let (_, args, _) = &client.rpc.calls[1];
        assert_eq!(args["from"]["ofType"][0], "RandomSequenceContainer");
        assert_eq!(args["transform"][0]["where"], json!(["name:contains", "Steps"]));
    }

    #[tokio::test]
    async fn test_missing_return_field_is_protocol_error() {
        let rpc = MockRpc::new(vec![json!({ "objects": [] })]);
        let mut client = WaClient::new(rpc);

        let err = client.get_by_ids(&ids()).await.unwrap_err();
        assert!(matches!(err, WaError::ProtocolError { .. }));
    }

    #[tokio::test]
    async fn test_create_from_path_splits_parent_and_name() {
        let rpc = MockRpc::new(vec![json!({ "id": "{new}", "name": "New_Sound" })]);
        let mut client = WaClient::new(rpc);

        let created = client
            .create_from_path(
                "\\Actor-Mixer Hierarchy\\Default Work Unit\\New_Sound",
                "Sound",
            )
            .await
            .unwrap();

        assert_eq!(created.id(), Some("{new}"));
        let (procedure, args, _) = &client.rpc.calls[0];
        assert_eq!(procedure, FUNC_CREATE);
        assert_eq!(args["parent"], "\\Actor-Mixer Hierarchy\\Default Work Unit");
        assert_eq!(args["name"], "New_Sound");
        assert_eq!(args["type"], "Sound");
        assert_eq!(args["onNameConflict"], "merge");
    }

    #[tokio::test]
    async fn test_create_from_path_rejects_pathless_name() {
        let mut client = WaClient::new(MockRpc::new(vec![]));

        let err = client.create_from_path("New_Sound", "Sound").await.unwrap_err();
        assert!(matches!(err, WaError::InvalidPathError { .. }));
    }
}
