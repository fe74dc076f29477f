//! Operator binary for the settlement economy.
//!
//! Runs one command against the JSON store and exits. See [`command`] for
//! the accepted commands.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `settlement-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing), `RUST_LOG` over the config
//! 3. Open the JSON file repository in the configured data directory
//! 4. Parse and run the command

mod command;
mod error;

use std::path::Path;

use settlement_core::{SettlementConfig, SettlementService};
use settlement_store::Repository;
use settlement_types::{Blueprint, NewResource, NewSettlement};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "settlement-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, argument parsing or the command fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        data_dir = %config.storage.data_dir.display(),
        "settlement-engine starting"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let service = SettlementService::new(config.storage.repository());

    run(&service, command).await?;
    Ok(())
}

/// Load configuration from [`CONFIG_FILE`], or defaults if it is absent.
fn load_config() -> Result<SettlementConfig, EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(SettlementConfig::from_file(config_path)?)
    } else {
        // An empty document still applies the environment override.
        Ok(SettlementConfig::parse("")?)
    }
}

/// Execute one command, printing its result to stdout.
async fn run<R: Repository>(
    service: &SettlementService<R>,
    command: Command,
) -> Result<(), EngineError> {
    match command {
        Command::List => {
            for s in service.list_settlements().await {
                println!(
                    "{}\t{}\t{} districts\t{} residents",
                    s.id,
                    s.name,
                    s.districts.len(),
                    s.residents.len()
                );
            }
        }
        Command::Create { name, description } => {
            let settlement = service
                .create_settlement(NewSettlement { name, description })
                .await?;
            println!("{}", settlement.id);
        }
        Command::Show(id) => {
            let settlement = service.settlement(id).await?;
            println!("{}", serde_json::to_string_pretty(&settlement)?);
        }
        Command::Saldo(id) => {
            println!("{}", service.saldo(id).await?);
        }
        Command::AddResource {
            settlement,
            kind,
            name,
            amount,
        } => {
            let outcome = service
                .add_resource(settlement, NewResource::material(kind, &name, amount))
                .await?;
            println!("{}", outcome.id());
        }
        Command::AddTool {
            settlement,
            name,
            amount,
        } => {
            let outcome = service
                .add_resource(settlement, NewResource::tool(&name, amount))
                .await?;
            println!("{}", outcome.id());
        }
        Command::Blueprints => {
            for bp in service.blueprints().await {
                println!("{}\t{}\t{:?}", bp.id, bp.name, bp.grade);
            }
        }
        Command::RegisterBlueprint { path } => {
            let json = std::fs::read_to_string(&path).map_err(|source| EngineError::Io {
                path: path.clone(),
                source,
            })?;
            let blueprint: Blueprint = serde_json::from_str(&json)?;
            println!("{}", service.register_blueprint(blueprint).await?);
        }
        Command::Build {
            settlement,
            blueprint,
        } => {
            let built = service.build_district_by_name(settlement, &blueprint).await?;
            println!("{}\t{}", built.id, built.name);
        }
        Command::Advance { settlement, days } => {
            for (kind, change) in service.advance_days(settlement, days).await? {
                println!("{kind}\t{change:+}");
            }
        }
        Command::Yield(id) => {
            println!("{}", service.settlement_daily_yield(id).await?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use settlement_store::InMemoryRepository;
    use settlement_types::{ResourceKind, SettlementId};

    use super::*;

    #[tokio::test]
    async fn run_executes_against_service() {
        let service = SettlementService::new(InMemoryRepository::new());
        run(&service, Command::Create { name: String::from("Ashford"), description: String::new() })
            .await
            .unwrap();
        run(
            &service,
            Command::AddResource {
                settlement: SettlementId::new(1),
                kind: ResourceKind::Ordinary,
                name: String::from("Wood"),
                amount: 3,
            },
        )
        .await
        .unwrap();
        assert_eq!(service.saldo(SettlementId::new(1)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn run_surfaces_service_errors() {
        let service = SettlementService::new(InMemoryRepository::new());
        let err = run(&service, Command::Saldo(SettlementId::new(9))).await.unwrap_err();
        assert!(matches!(err, EngineError::Service { .. }));
    }
}
