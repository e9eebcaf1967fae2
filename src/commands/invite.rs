use crate::bot::Bot;
use crate::commands::{CommandError, IncomingMessage, Result};
use crate::render::{Reply, Response, COLOR_OKAY};

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let link = bot.config().invite_link.as_deref().ok_or_else(|| {
        CommandError::Unavailable("This bot has no invitation link configured".to_string())
    })?;

    let reply = Reply::new()
        .title("Invite me!")
        .color(COLOR_OKAY)
        .description(format!("Click [here]({link}) to add me to your server"))
        .footer(format!("Requested by: {}", message.author));

    Ok(Response::single(reply))
}
