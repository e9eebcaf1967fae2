use crate::bot::Bot;
use crate::commands::{CommandError, IncomingMessage, Result};
use crate::render::{build_menu_pages, Response, ITEMS_PER_PAGE};

pub async fn run(bot: &Bot, message: &IncomingMessage) -> Result<Response> {
    let registry = bot.registry();
    if !registry.is_ready() {
        return Err(CommandError::RegistryNotReady);
    }

    let catalog = registry.snapshot().await;
    let items: Vec<String> = catalog.languages().iter().map(|l| l.name.clone()).collect();

    let pages = build_menu_pages(
        &items,
        ITEMS_PER_PAGE,
        "Supported Languages",
        &message.author,
        None,
    );
    Ok(Response::menu(pages))
}
