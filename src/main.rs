use anyhow::Context;
use library_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load library settings")?;
    library_telemetry::init(&settings.telemetry)?;

    library_app::run(settings).await
}
