use crate::cli::options::OutputFormat;
use crate::render::{Reaction, Reply, Response};

/// Print a command response to stdout.
pub fn print_response(response: &Response, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(response) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("❌ Unable to serialize response: {e}"),
        },
        OutputFormat::Text => print!("{}", render_text(response)),
    }
}

/// Plain-text rendering of a response, one block per page.
pub fn render_text(response: &Response) -> String {
    let mut out = String::new();
    let total = response.pages.len();

    for (i, page) in response.pages.iter().enumerate() {
        if total > 1 {
            out.push_str(&format!("── Page {}/{} ──\n", i + 1, total));
        }
        render_reply(page, &mut out);
    }

    if let Some(reaction) = &response.reaction {
        let emoji = match reaction {
            Reaction::Unicode { emoji } => emoji.clone(),
            Reaction::Custom { name, .. } => format!(":{name}:"),
        };
        out.push_str(&format!("[{emoji}]\n"));
    }

    out
}

fn render_reply(reply: &Reply, out: &mut String) {
    if let Some(title) = &reply.title {
        out.push_str(&format!("📦 {title}\n"));
        out.push_str(&"=".repeat(title.chars().count() + 3));
        out.push('\n');
    }
    if let Some(description) = &reply.description {
        out.push_str(description);
        if !description.ends_with('\n') {
            out.push('\n');
        }
    }
    for field in &reply.fields {
        out.push_str(&format!("• {}:\n", field.name));
        for line in field.value.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    if let Some(footer) = &reply.footer {
        out.push_str(&format!("  ({footer})\n"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_reply() {
        let reply = Reply::new()
            .title("Compilation Results")
            .field("Status", "Finished with exit code: 0", false)
            .footer("Requested by: me");
        let text = render_text(&Response::single(reply).with_reaction(Reaction::failure()));

        assert!(text.starts_with("📦 Compilation Results\n"));
        assert!(text.contains("• Status:\n  Finished with exit code: 0\n"));
        assert!(text.contains("(Requested by: me)"));
        assert!(text.ends_with("[❌]\n"));
        assert!(!text.contains("Page"));
    }

    #[test]
    fn test_render_menu_pages() {
        let pages = vec![Reply::new().title("a"), Reply::new().title("b")];
        let text = render_text(&Response::menu(pages));
        assert!(text.contains("── Page 1/2 ──"));
        assert!(text.contains("── Page 2/2 ──"));
    }
}
