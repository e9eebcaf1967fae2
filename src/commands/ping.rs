use crate::bot::Bot;
use crate::commands::{IncomingMessage, Result};
use crate::render::{format_time, Reply, Response, COLOR_OKAY};
use chrono::Utc;

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let uptime = (Utc::now() - bot.started_at()).num_seconds().max(0) as u64;

    let reply = Reply::new()
        .title("Pong!")
        .color(COLOR_OKAY)
        .description(format!("Up for {}", format_time(uptime)))
        .footer(format!("Requested by: {}", message.author));

    Ok(Response::single(reply))
}
