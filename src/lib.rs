pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod terminal;
pub mod widget;

use cli::Args;
use config::WidgetConfig;
use log::{ info, warn };
use std::error::Error;
use std::sync::Arc;
use terminal::TerminalView;
use tokio::io::BufReader;
use widget::ChatWidget;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = WidgetConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server URL: {}", args.server_url);
    info!("Intro Endpoint: {}", config.endpoints.intro);
    info!("Chat Endpoint: {}", config.endpoints.chat);
    info!("Reset Endpoint: {}", config.endpoints.reset);
    info!("History Endpoint: {}", config.endpoints.history);
    info!("Health Endpoint: {}", config.endpoints.health);
    info!("Time Format: {}", config.time_format);
    info!("Startup Health Check: {}", config.check_health);
    info!("-------------------------");

    let backend = client::new_backend(&config.endpoints)?;
    let view = Arc::new(TerminalView::new(config.time_format.clone()));
    let widget = Arc::new(ChatWidget::new(backend, view));
    info!("Conversation ID: {}", widget.conversation_id().await);

    if config.check_health {
        let w = widget.clone();
        tokio::spawn(async move {
            match w.health().await {
                Ok(health) => info!("Backend health: {}", health.status),
                Err(e) => warn!("Backend health check failed: {}", e),
            }
        });
    }

    let loader = widget.clone();
    tokio::spawn(async move { loader.load().await });
    terminal::run_interactive(widget, BufReader::new(tokio::io::stdin())).await
}
