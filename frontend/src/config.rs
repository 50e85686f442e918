/// Configuration for the frontend application

/// Base URL for static assets
/// - For local development: "/"
/// - For a project page: set `READER_BASE_URL=/reader/` at build time
pub const BASE_URL: &str = match option_env!("READER_BASE_URL") {
    Some(base) => base,
    None => "/",
};

/// Paragraph mapping handed to the DOCX converter.
pub const DOCX_STYLE_MAP: &[&str] = &[
    "p[style-name='Title'] => h1.doc-title:fresh",
    "p[style-name='Subtitle'] => p.doc-subtitle:fresh",
    "p[style-name='Heading 1'] => h2:fresh",
    "p[style-name='Heading 2'] => h3:fresh",
    "p[style-name='Heading 3'] => h4:fresh",
    "p[style-name='Quote'] => blockquote:fresh",
];

/// Helper function to construct asset paths
pub fn asset_path(path: &str) -> String {
    // Remove leading slash if present
    let path = path.strip_prefix('/').unwrap_or(path);
    let base = if BASE_URL.ends_with('/') {
        BASE_URL.to_string()
    } else {
        format!("{BASE_URL}/")
    };
    format!("{}{}", base, path)
}

/// Absolute `http(s)` locations are used as-is, everything else is served
/// from under [`BASE_URL`].
pub fn resource_url(path: &str) -> String {
    match url::Url::parse(path) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => path.to_string(),
        _ => asset_path(path),
    }
}
