use dotenvy::dotenv;
use panda_clock::infrastructure::config::AppConfig;
use panda_clock::infrastructure::terminal::run_app;
use panda_clock::utils;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let config = AppConfig::from_env();
    utils::setup_logging(config.log_level);

    if let Err(e) = run_app(config).await {
        error!("Error running dashboard: {:#}", e);
    }
}
