// src/main.rs

use anyhow::Context;
use tokio::io::{stdin, stdout, BufReader};

use moviehub::app::{init_app_state, Console};
use moviehub::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. ENVIRONMENT
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. CONFIGURATION
    let config = AppConfig::from_env().context("invalid configuration")?;

    // 3. SERVICES
    let app_state = init_app_state(&config).context("failed to initialise application")?;

    // 4. CONSOLE
    let mut console = Console::new(BufReader::new(stdin()), stdout());
    console.run(&app_state).await?;

    log::info!("Bye");
    Ok(())
}
