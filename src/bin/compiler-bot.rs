use anyhow::{Context, Result};
use clap::Parser;
use compiler_bot::cli::{print_response, Commands, CompilerBotCli, MessageAssembler, OutputFormat};
use compiler_bot::commands::IncomingMessage;
use compiler_bot::{Bot, BotConfig, WandboxBackend};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CompilerBotCli::parse();

    // Initialize tracing
    let level = match cli.verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting compiler-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let backend = WandboxBackend::new(
        &config.wandbox_url,
        Some(Duration::from_secs(CONNECT_TIMEOUT_SECS)),
    )
    .context("Failed to create compilation backend")?;
    let bot = Bot::new(config, Arc::new(backend));

    // Commands that don't need the catalog still work without it.
    if let Err(e) = bot.start().await {
        error!("{e}");
        warn!("Continuing without a compiler catalog");
    }

    let prefix = bot.prefix().to_string();
    match &cli.command {
        Commands::Console => run_console(&bot, &cli).await?,
        Commands::Send { message } => {
            dispatch(&bot, &cli.author, &message.join(" "), cli.format).await;
        }
        Commands::Languages => {
            dispatch(&bot, &cli.author, &format!("{prefix}languages"), cli.format).await;
        }
        Commands::Compilers { language } => {
            let content = format!("{prefix}compilers {language}");
            dispatch(&bot, &cli.author, &content, cli.format).await;
        }
    }

    Ok(())
}

fn load_config(cli: &CompilerBotCli) -> Result<BotConfig> {
    let mut config = BotConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(prefix) = &cli.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(url) = &cli.wandbox_url {
        config.wandbox_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout = Some(timeout);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run_console(bot: &Bot, cli: &CompilerBotCli) -> Result<()> {
    println!(
        "💬 Type commands prefixed with '{}' (e.g. {}help). Ctrl-D to quit.",
        bot.prefix(),
        bot.prefix()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut assembler = MessageAssembler::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if let Some(content) = assembler.push_line(&line) {
            dispatch(bot, &cli.author, &content, cli.format).await;
        }
    }

    if let Some(content) = assembler.finish() {
        dispatch(bot, &cli.author, &content, cli.format).await;
    }

    Ok(())
}

async fn dispatch(bot: &Bot, author: &str, content: &str, format: OutputFormat) {
    let message = IncomingMessage::new(author, content);
    match bot.handle_message(&message).await {
        Some(response) => print_response(&response, format),
        None => println!("⚠️  Not a command. Try {}help", bot.prefix()),
    }
}
