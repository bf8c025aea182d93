use anyhow::Context;
use authorbook_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    authorbook_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "authorbook-app bootstrap starting"
    );

    authorbook_app::run(settings).await
}
