mod gateway;
mod handlers;

use clap::{Parser, Subcommand};
use courier_channels::telegram::TelegramBot;
use courier_core::config;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "courier",
    version,
    about = "Courier: long-polling Telegram bot relay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and relaying messages.
    Start,
    /// Show the effective configuration without contacting Telegram.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    match cli.command {
        Commands::Start => {
            cfg.validate()?;
            info!(
                "Starting {} | token: {} | poll timeout: {}s",
                cfg.bot.name,
                cfg.telegram.masked_token(),
                cfg.telegram.poll_timeout_secs
            );

            let bot = Arc::new(TelegramBot::new(cfg.telegram.clone())?);
            let handler = Arc::new(handlers::EchoHandler::new(
                cfg.bot.greeting.clone(),
                cfg.telegram.allowed_users.clone(),
            ));

            let gw = gateway::Gateway::new(bot.clone(), bot, handler, cfg.initial_offset());
            gw.run().await?;
        }
        Commands::Status => {
            println!("Courier status\n");
            println!("Config: {}", cli.config);
            println!("Name: {}", cfg.bot.name);
            println!();
            println!(
                "  telegram: {}",
                if cfg.telegram.bot_token.trim().is_empty() {
                    "missing bot_token".to_string()
                } else {
                    format!("configured ({})", cfg.telegram.masked_token())
                }
            );
            println!("  api url: {}", cfg.telegram.api_url);
            println!("  poll timeout: {}s", cfg.telegram.poll_timeout_secs);
            println!(
                "  allowed updates: {}",
                cfg.telegram.allowed_updates.join(", ")
            );
            println!("  parse mode: {}", cfg.telegram.parse_mode);
            println!("  initial offset: {}", cfg.bot.initial_offset);

            if let Err(e) = cfg.validate() {
                anyhow::bail!("configuration is not usable: {e}");
            }
        }
    }

    Ok(())
}
