use crate::core::query::{NameFilter, Relation};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "wa-tools")]
#[command(about = "Query helpers for the Wwise authoring API")]
pub struct CliConfig {
    #[arg(long, default_value = crate::config::DEFAULT_WAAPI_URL)]
    pub url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the version of the connected authoring application
    Info,
    /// List the objects currently selected in the authoring UI
    Selected {
        #[arg(long, help = "Print ids only, one per line")]
        ids: bool,
    },
    /// Look up objects by id
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Query objects reachable from the given ids (parent, ancestors,
    /// children or descendants), optionally filtered by name
    Related {
        relation: Relation,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(
            long,
            conflicts_with = "contains",
            help = "Keep names matching this regular expression"
        )]
        matches: Option<String>,
        #[arg(long, help = "Keep names containing this substring")]
        contains: Option<String>,
    },
    /// Query every object of a type, optionally filtered by name
    OfType {
        type_name: String,
        #[arg(
            long,
            conflicts_with = "contains",
            help = "Keep names matching this regular expression"
        )]
        matches: Option<String>,
        #[arg(long, help = "Keep names containing this substring")]
        contains: Option<String>,
    },
    /// Create an object from its full project path
    Create {
        path: String,
        #[arg(long = "type")]
        type_name: String,
    },
}

impl Command {
    pub fn name_filter(&self) -> NameFilter {
        match self {
            Command::Related {
                matches, contains, ..
            }
            | Command::OfType {
                matches, contains, ..
            } => match (matches, contains) {
                (Some(pattern), _) => NameFilter::matches(pattern.clone()),
                (None, Some(substring)) => NameFilter::contains(substring.clone()),
                (None, None) => NameFilter::default(),
            },
            _ => NameFilter::default(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn server_url(&self) -> &str {
        &self.url
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_server_url("url", &self.url)?;
        match &self.command {
            Command::OfType { type_name, .. } | Command::Create { type_name, .. } => {
                validation::validate_non_empty_string("type", type_name)?;
            }
            _ => {}
        }
        Ok(())
    }
}
