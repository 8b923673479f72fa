use assistant_bridge::config::AppConfig;
use assistant_bridge::startup::Application;
use assistant_bridge::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
