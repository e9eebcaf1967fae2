use crate::bot::Bot;
use crate::commands::{Command, IncomingMessage, Result};
use crate::render::{Reply, Response, COLOR_OKAY};

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let reply = Command::ALL.iter().fold(
        Reply::new()
            .title("Command Usage")
            .color(COLOR_OKAY)
            .footer(format!("Requested by: {}", message.author)),
        |reply, command| {
            reply.field(
                command.usage(bot.prefix()),
                format!("*{}*", command.description()),
                false,
            )
        },
    );

    Ok(Response::single(reply))
}
