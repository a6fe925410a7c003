use clap::Parser;
use wa_tools::config::cli::{CliConfig, Command};
use wa_tools::core::client::WaClient;
use wa_tools::domain::model::WwiseObject;
use wa_tools::domain::ports::ConfigProvider;
use wa_tools::utils::{logger, validation::Validate};
use wa_tools::WaError;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting wa-tools CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        match &e {
            WaError::CannotConnectError => {
                tracing::error!("Connection to the authoring application failed");
                eprintln!(
                    "❌ Could not connect to the Wwise authoring API. \
                     Is a project open and WAAPI enabled?"
                );
            }
            other => {
                tracing::error!("Command failed: {}", other);
                eprintln!("❌ {}", other);
            }
        }
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> wa_tools::Result<()> {
    let mut client = WaClient::connect(config.server_url()).await?;
    let filter = config.command.name_filter();

    match &config.command {
        Command::Info => {
            let version = client.get_info().await?;
            println!("Wwise version: {}", version);
        }
        Command::Selected { ids: true } => {
            for id in client.get_selected_ids().await? {
                println!("{}", id);
            }
        }
        Command::Selected { .. } => {
            print_objects(&client.get_selected().await?)?;
        }
        Command::Get { ids } => {
            print_objects(&client.get_by_ids(ids).await?)?;
        }
        Command::Related { relation, ids, .. } => {
            print_objects(&client.related(ids, *relation, filter).await?)?;
        }
        Command::OfType { type_name, .. } => {
            print_objects(&client.of_type(type_name, filter).await?)?;
        }
        Command::Create { path, type_name } => {
            let created = client.create_from_path(path, type_name).await?;
            print_objects(std::slice::from_ref(&created))?;
        }
    }

    client.disconnect().await
}

fn print_objects(objects: &[WwiseObject]) -> wa_tools::Result<()> {
    println!("{}", serde_json::to_string_pretty(objects)?);
    Ok(())
}
