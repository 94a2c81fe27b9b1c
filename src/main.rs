mod config;
mod prober;
mod report;
mod runner;

use config::CheckerConfig;
use runner::Runner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CheckerConfig::from_env()?;
    let log_level = config.get_tracing_level()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("api_checker={}", log_level.as_str().to_lowercase()).parse()?,
            ),
        )
        .init();

    tracing::debug!(?config, "configuration loaded");

    let runner = Runner::new(config)?;
    runner.run().await?;

    Ok(())
}
