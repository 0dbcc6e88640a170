use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trendline::app::AppContext;
use trendline::cli::{commands, Cli};
use trendline::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with printed views
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    if let Some(url) = cli.base_url.clone() {
        config.api.base_url = url;
    }

    let ctx = AppContext::new(config)?;

    match cli.command.view() {
        Some((view, json)) => {
            commands::show_view(&ctx, view, json).await?;
        }
        None => {
            trendline::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
