use super::Messages;

pub const MESSAGES: Messages = Messages {
    untitled: "Untitled",
    brand_fallback: "Kalyna Field Notes",
    search_placeholder: "Search in document",
    search_button: "Find",
    prev_button: "Prev",
    next_button: "Next",
    clear_button: "Clear",
    home_button: "Home",
    print_button: "PDF",
    zoom_in: "Zoom in",
    zoom_out: "Zoom out",
    about_nav: "About",
    articles_heading: "Articles",
    about_heading: "About",
    about_empty: "Nothing here yet.",
    loading: "Loading...",
    match_status_template: "{} / {} matches",
    no_matches: "No matches",
    pdf_search_hint: "Use Ctrl+F to search in PDF",
    no_articles: "No articles yet. Add documents into /articles and update /articles/articles.json.",
    manifest_failed: "Failed to load articles/articles.json",
    article_not_found: "This article ID does not exist in articles.json.",
    resource_missing: "English document not provided.",
    resource_failed_template: "Failed to load the document: {}",
    unsupported_format: "Legacy .doc files are not supported. Please convert the file to .docx or PDF.",
    lang_badge: "EN",
};
