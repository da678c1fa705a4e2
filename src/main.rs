use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genie::cli::{self, Cli, Commands};
use genie::config;
use genie::logging::{LogLevel, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing. Application lines are gated by `Logger`, so the
    // filter lets everything from this crate through.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genie=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::load_config_or_default()?;

    // Client commands stay quiet unless asked otherwise.
    let level = match cli.command {
        Commands::Serve { .. } => cli.log_level.unwrap_or(config.logging.level),
        _ => cli.log_level.unwrap_or(LogLevel::Warning),
    };
    let logger = Logger::new(level);

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(config, logger, host, port).await,
        Commands::Login { username, password } => {
            cli::commands::login(&config, &logger, &username, password).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => cli::commands::register(&config, &logger, &username, &email, password).await,
        Commands::Logout => cli::commands::logout(&config, &logger).await,
        Commands::Whoami { format } => cli::commands::whoami(&config, &logger, format).await,
        Commands::Ask { message } => cli::commands::ask(&config, &logger, &message).await,
        Commands::Users { format } => cli::commands::users(&config, &logger, format).await,
        Commands::Agents { status, format } => {
            cli::commands::agents(&config, &logger, status, format).await
        }
    }
}
