use crate::bot::Bot;
use crate::commands::parser::command_args;
use crate::commands::{CommandError, IncomingMessage, Result};
use crate::render::{build_menu_pages, Response, ITEMS_PER_PAGE};

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let args = command_args(&message.content);
    let [language] = args.as_slice() else {
        return Err(CommandError::Usage(
            "You must supply a language in order view its supported compilers".to_string(),
        ));
    };

    let registry = bot.registry();
    if !registry.is_ready() {
        return Err(CommandError::RegistryNotReady);
    }

    let language = language.to_lowercase();
    let compilers =
        registry
            .get_compilers(&language)
            .await
            .ok_or_else(|| CommandError::UnknownLanguage {
                language: language.clone(),
                prefix: bot.prefix().to_string(),
            })?;

    let pages = build_menu_pages(
        &compilers,
        ITEMS_PER_PAGE,
        &format!("Supported '{language}' compilers:"),
        &message.author,
        None,
    );
    Ok(Response::menu(pages))
}
