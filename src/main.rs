use anyhow::Context;
use cinema_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load cinema settings")?;
    cinema_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "cinema-app bootstrap starting"
    );

    cinema_app::serve(&settings).await?;

    tracing::info!("cinema-app shut down");
    Ok(())
}
