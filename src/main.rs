use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bpdesk::cli::{parse_criteria, Cli, Commands};
use bpdesk::config::Config;
use bpdesk::i18n::I18n;
use bpdesk::registry::ServicesManager;
use bpdesk::repository::SqliteRepository;
use bpdesk::terminal::{self, ConsoleWorkbench};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr and to a file next to the database
    let file_appender = tracing_appender::rolling::never(".", "bpdesk.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bpdesk=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database.into();
    }
    config.validate()?;

    let repository = Arc::new(SqliteRepository::open(config.database_path_str()).await?);
    let i18n = Arc::new(match &config.i18n_path {
        Some(path) => I18n::with_overrides_from(path)?,
        None => I18n::new(),
    });
    let input = terminal::shared_input();
    let workbench = Arc::new(ConsoleWorkbench::new(input.clone(), i18n.clone()));
    let services = Arc::new(ServicesManager::with_sqlite(
        workbench, config, i18n, repository,
    ));

    match cli.command {
        Commands::Customers { filter } => {
            let criteria = parse_criteria(&filter)?;
            info!(filters = filter.len(), "choosing customers");
            terminal::run_customer_choose(&services, &criteria).await?;
        }
        Commands::EditCustomer { code } => {
            terminal::run_customer_edit(&services, &input, code).await?;
        }
        Commands::Groups { filter } => {
            let criteria = parse_criteria(&filter)?;
            info!(filters = filter.len(), "choosing groups");
            terminal::run_group_choose(&services, &criteria).await?;
        }
        Commands::EditGroup { code } => {
            terminal::run_group_edit(&services, &input, code).await?;
        }
        Commands::Contacts { filter } => {
            let criteria = parse_criteria(&filter)?;
            info!(filters = filter.len(), "choosing contact persons");
            terminal::run_contact_choose(&services, &criteria).await?;
        }
        Commands::Apps => terminal::print_apps(&services),
    }

    Ok(())
}
