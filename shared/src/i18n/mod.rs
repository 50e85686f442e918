//! User-visible strings for both languages.

pub mod en;
pub mod zh;

use crate::locale::Lang;

/// Every string the reader shows, in one language.
#[derive(Debug)]
pub struct Messages {
    pub untitled: &'static str,
    pub brand_fallback: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    pub prev_button: &'static str,
    pub next_button: &'static str,
    pub clear_button: &'static str,
    pub home_button: &'static str,
    pub print_button: &'static str,
    pub zoom_in: &'static str,
    pub zoom_out: &'static str,
    pub about_nav: &'static str,
    pub articles_heading: &'static str,
    pub about_heading: &'static str,
    pub about_empty: &'static str,
    pub loading: &'static str,
    /// `{}` is the 1-based active match, then the total.
    pub match_status_template: &'static str,
    pub no_matches: &'static str,
    pub pdf_search_hint: &'static str,
    pub no_articles: &'static str,
    pub manifest_failed: &'static str,
    pub article_not_found: &'static str,
    pub resource_missing: &'static str,
    /// `{}` is the underlying cause.
    pub resource_failed_template: &'static str,
    pub unsupported_format: &'static str,
    pub lang_badge: &'static str,
}

pub fn messages(lang: Lang) -> &'static Messages {
    match lang {
        Lang::En => &en::MESSAGES,
        Lang::Zh => &zh::MESSAGES,
    }
}

pub fn fill_one(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

pub fn fill_two(
    template: &str,
    first: impl std::fmt::Display,
    second: impl std::fmt::Display,
) -> String {
    let first_pass = template.replacen("{}", &first.to_string(), 1);
    first_pass.replacen("{}", &second.to_string(), 1)
}
