pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::wamp::WampSocket;
pub use core::client::WaClient;
pub use domain::model::WwiseObject;
pub use utils::error::{Result, WaError};
