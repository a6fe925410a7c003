use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The remote procedure surface the query helpers are written against.
///
/// `procedure` is the remote procedure URI, `args` the request payload and
/// `options` the per-call options (the requested return fields). The returned
/// value is the raw response payload; unwrapping the `return`/`objects`
/// field is the caller's job.
#[async_trait]
pub trait WaapiRpc: Send {
    async fn call(&mut self, procedure: &str, args: Value, options: Value) -> Result<Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
}
