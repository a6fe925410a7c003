pub mod client;
pub mod query;

pub use crate::domain::model::{VersionInfo, WwiseObject};
pub use crate::domain::ports::{ConfigProvider, WaapiRpc};
pub use crate::utils::error::Result;
