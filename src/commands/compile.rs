use crate::bot::Bot;
use crate::commands::parser::parse_compile;
use crate::commands::{CommandError, IncomingMessage, Result};
use crate::render::{build_compilation_reply, Reaction, Response};
use crate::request::CompileRequest;
use tracing::debug;

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let mut input = parse_compile(&message.content, bot.prefix())?;

    if let Some(url) = &input.url {
        input.code = bot.fetch_source(url).await?;
    }

    let registry = bot.registry();
    if !registry.is_ready() {
        return Err(CommandError::RegistryNotReady);
    }

    let catalog = registry.snapshot().await;
    let request = CompileRequest::builder()
        .code(&input.code)
        .target(&input.target)
        .stdin(&input.stdin)
        .save(true)
        .options(&input.options.join(" "))
        .build(&catalog);
    debug!(
        "Compiling for {} with {} ({:?})",
        message.author,
        request.compiler_id(),
        request.resolution()
    );

    let result = bot.executor().compile(&request).await?;

    let reply = build_compilation_reply(&message.author, &result, bot.executor().backend_name());
    let reaction = if result.success {
        bot.success_reaction()
    } else {
        Reaction::failure()
    };

    let language = request.language().unwrap_or(request.compiler_id());
    bot.stats().compilation(language, !result.success).await;

    Ok(Response::single(reply).with_reaction(reaction))
}
