//! Fixed names and bounds shared by the core and the frontend.

/// Directory that holds the manifest and the article documents.
pub const DOCUMENTS_DIR: &str = "articles";

/// Manifest location relative to the site base.
pub const MANIFEST_PATH: &str = "articles/articles.json";

/// Storage key for the preferred language.
pub const LANGUAGE_KEY: &str = "language";

/// Storage key for the zoom level.
pub const ZOOM_KEY: &str = "zoom-level";

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const MIN_ZOOM: f64 = 0.8;
pub const MAX_ZOOM: f64 = 1.3;
pub const ZOOM_STEP: f64 = 0.1;

/// Fragment appended to PDF URLs so the native viewer shows its toolbar.
pub const PDF_VIEWER_PARAMS: &str = "toolbar=1&navpanes=0&scrollbar=1";
