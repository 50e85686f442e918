use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::{api::sanitize, config::resource_url};

/// Render the manifest's about text. Relative image paths resolve against
/// the site base like document paths do.
pub fn markdown_to_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::from(resource_url(&dest_url)),
            title,
            id,
        }),
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    sanitize(&html_output)
}

pub fn current_fragment() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

pub fn set_fragment(fragment: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_hash(fragment) {
            tracing::debug!(?err, "could not update location hash");
        }
    }
}

pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.print() {
            tracing::warn!(?err, "print dialog unavailable");
        }
    }
}
