use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

/// Book catalogue service
#[derive(Parser)]
#[command(name = "bookshelf-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Create the database tables and exit
    InitDb,
    /// Load configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            bookshelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "starting bookshelf");
            bookshelf::run(settings).await
        }
        Command::InitDb => {
            bookshelf_telemetry::init(&settings.telemetry)?;
            bookshelf::init_db(settings).await?;
            tracing::info!("database schema is in place");
            Ok(())
        }
        Command::CheckConfig => {
            println!("{:#?}", settings);
            Ok(())
        }
    }
}
