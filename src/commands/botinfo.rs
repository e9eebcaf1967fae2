use crate::bot::Bot;
use crate::commands::{IncomingMessage, Result};
use crate::render::{format_number, format_time, Reply, Response, COLOR_OKAY};
use chrono::Utc;

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let config = bot.config();
    let usage = bot.stats().snapshot().await;
    let catalog = bot.registry().snapshot().await;
    let servers = bot.servers().total_servers().await;

    let uptime = (Utc::now() - bot.started_at()).num_seconds().max(0) as u64;

    let mut description = String::from("Compiler Bot\n==============================\n");
    if let Some(link) = &config.invite_link {
        description.push_str(&format!("[Invitation link]({link})\n"));
    }
    if let Some(link) = &config.vote_link {
        description.push_str(&format!("[Vote for us!]({link})\n"));
    }
    description.push_str("==============================");

    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    let system = format!(
        "**Host:** {}\n**Operating System:** {}\n**CPUs:** {}\n**Version:** {}",
        host,
        std::env::consts::OS,
        num_cpus::get(),
        env!("CARGO_PKG_VERSION")
    );

    let reply = Reply::new()
        .title("Current Bot Info:")
        .description(description)
        .color(COLOR_OKAY)
        .field("Total Servers", format_number(servers as u64), true)
        .field("Commands Run", format_number(usage.commands), true)
        .field("Compilations", format_number(usage.compilations), true)
        .field("Failed Compilations", format_number(usage.failed_compilations), true)
        .field("Languages", format_number(catalog.language_count() as u64), true)
        .field("Uptime", format_time(uptime), true)
        .field("System Info:", system, false)
        .footer(format!(
            "Requested by: {} || powered by {}",
            message.author,
            bot.executor().backend_name()
        ));

    Ok(Response::single(reply))
}
