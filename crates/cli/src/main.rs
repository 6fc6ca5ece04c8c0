use anyhow::Context;
use clap::{Parser, Subcommand};

/// Command-line entrypoint for the cinema service
#[derive(Debug, Parser)]
#[command(name = "cinema-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API until Ctrl-C or SIGTERM (default)
    Serve,
    /// Create the database file and any missing table, then exit
    InitDb,
    /// Print the merged OpenAPI document
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Openapi => {
            let registry = cinema_app::registry()?;
            let document = cinema_http::router::openapi_document(&registry);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::InitDb => {
            let settings = load_settings()?;
            let app = cinema_app::prepare(&settings).await?;
            tracing::info!(
                db = %settings.database.url,
                tables = app.registry.collect_tables().len(),
                "database initialized"
            );
            app.db.close().await;
        }
        Command::Serve => {
            let settings = load_settings()?;
            cinema_app::serve(&settings).await?;
        }
    }

    Ok(())
}

fn load_settings() -> anyhow::Result<cinema_kernel::settings::Settings> {
    let settings = cinema_kernel::settings::Settings::load()
        .with_context(|| "failed to load cinema settings")?;
    cinema_telemetry::init(&settings.telemetry)?;
    Ok(settings)
}
