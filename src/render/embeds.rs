use crate::events::GuildInfo;
use crate::render::format::{conform_external_str, format_number};
use crate::render::reply::{Reply, COLOR_FAIL, COLOR_OKAY};
use crate::request::CompileResult;

pub const ITEMS_PER_PAGE: usize = 15;

pub fn build_compilation_reply(author: &str, result: &CompileResult, powered_by: &str) -> Reply {
    let mut reply = Reply::new().title("Compilation Results");

    reply = match result.status.as_deref() {
        Some("0") => reply
            .field("Status", "Finished with exit code: 0", false)
            .color(COLOR_OKAY),
        Some(status) if !status.is_empty() => reply
            .field("Status", format!("Finished with exit code: {status}"), false)
            .color(COLOR_FAIL),
        _ => reply.color(COLOR_FAIL),
    };

    if let Some(signal) = result.signal.as_deref().filter(|s| !s.is_empty()) {
        reply = reply.field("Signal", signal, false);
    }
    if !result.compiler_output.is_empty() {
        let text = conform_external_str(&result.compiler_output);
        reply = reply.field("Compiler Output", format!("```{text}\n```"), false);
    }
    if !result.program_output.is_empty() {
        let text = conform_external_str(&result.program_output);
        reply = reply.field("Program Output", format!("```\n{text}\n```"), false);
    }
    if let Some(url) = &result.url {
        reply = reply.field("URL", url, false);
    }

    reply.footer(format!("Requested by: {author} | Powered by {powered_by}"))
}

pub fn build_fail_reply(author: &str, error: &str) -> Reply {
    Reply::new()
        .color(COLOR_FAIL)
        .title("Critical error:")
        .description(error)
        .footer(format!("Requested by: {author}"))
}

pub fn build_join_reply(guild: &GuildInfo) -> Reply {
    let mut reply = Reply::new()
        .color(COLOR_OKAY)
        .title("Joined server")
        .field("Name", &guild.name, true)
        .field("Members", format_number(guild.member_count), true)
        .field("Channels", guild.channel_count, true);

    if let Some(icon) = &guild.icon_url {
        reply = reply.thumbnail(icon);
    }
    if let Some(region) = &guild.region {
        reply = reply.field("Region", region, true);
    }
    reply.field("Guild ID", guild.id, true)
}

pub fn build_leave_reply(guild_id: u64, name: Option<&str>) -> Reply {
    let mut reply = Reply::new().color(COLOR_FAIL).title("Left server");
    if let Some(name) = name {
        reply = reply.field("Name", name, true);
    }
    reply.field("Guild ID", guild_id, true)
}

/// Split `items` into numbered pages of `per_page` entries. Always yields at
/// least one page so an empty list still renders.
pub fn build_menu_pages(
    items: &[String],
    per_page: usize,
    title: &str,
    author: &str,
    thumbnail: Option<&str>,
) -> Vec<Reply> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);

    (0..total_pages)
        .map(|page| {
            let start = page * per_page;
            let end = (start + per_page).min(items.len());

            let description: String = items[start..end]
                .iter()
                .enumerate()
                .map(|(i, item)| format!("**{}**) {}\n", start + i + 1, item))
                .collect();

            let mut reply = Reply::new()
                .color(COLOR_OKAY)
                .title(title)
                .description(description)
                .footer(format!(
                    "Requested by {author} | Page {}/{}",
                    page + 1,
                    total_pages
                ));
            if let Some(url) = thumbnail {
                reply = reply.thumbnail(url);
            }
            reply
        })
        .collect()
}
