//! Cinema application library
//!
//! The movie, director and genre resources as kernel modules, plus the
//! bootstrap shared by the `cinema-app` binary and the CLI.

pub mod modules;
pub mod utils;

use anyhow::Context;
use cinema_db::Database;
use cinema_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// A registry with every resource module and an open, schema-ready database.
pub struct App {
    pub registry: ModuleRegistry,
    pub db: Database,
}

/// Build a registry holding every resource module.
pub fn registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry)?;
    Ok(registry)
}

/// Open the database described by `settings` and create any missing table.
pub async fn prepare(settings: &Settings) -> anyhow::Result<App> {
    let registry = registry()?;

    let db = Database::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to the database")?;

    db.ensure_schema(&registry.collect_tables())
        .await
        .context("failed to create tables")?;

    Ok(App { registry, db })
}

/// Run the service until shutdown: prepare, start modules, serve, then tear
/// down in reverse.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let App { registry, db } = prepare(settings).await?;

    let ctx = InitCtx {
        settings,
        db: &db,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = cinema_http::start_server(&registry, settings, &db).await;

    let stopped = registry.stop_modules().await;
    db.close().await;

    served?;
    stopped
}
