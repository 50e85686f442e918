use thiserror::Error;

use crate::{
    i18n::{fill_one, messages},
    locale::Lang,
};

/// Failures the reader recovers from by showing an inline notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    #[error("failed to load manifest: {0}")]
    ManifestLoad(String),

    #[error("article `{0}` not found")]
    ArticleNotFound(String),

    #[error("no {0} document provided")]
    ResourceMissing(Lang),

    #[error("failed to load `{path}`: {cause}")]
    ResourceLoad { path: String, cause: String },

    #[error("unsupported document format: `{0}`")]
    UnsupportedFormat(String),
}

impl ReaderError {
    pub fn resource_load(path: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ReaderError::ResourceLoad {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    /// Localized inline notice for this failure.
    pub fn notice(&self, lang: Lang) -> String {
        let t = messages(lang);
        match self {
            ReaderError::ManifestLoad(_) => t.manifest_failed.to_string(),
            ReaderError::ArticleNotFound(_) => t.article_not_found.to_string(),
            ReaderError::ResourceMissing(_) => t.resource_missing.to_string(),
            ReaderError::ResourceLoad {
                cause, ..
            } => fill_one(t.resource_failed_template, cause),
            ReaderError::UnsupportedFormat(_) => t.unsupported_format.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_notice_carries_cause() {
        let err = ReaderError::resource_load("articles/a.docx", "HTTP error: 404");
        assert_eq!(err.notice(Lang::En), "Failed to load the document: HTTP error: 404");
        assert!(err.notice(Lang::Zh).contains("HTTP error: 404"));
        assert_eq!(err.to_string(), "failed to load `articles/a.docx`: HTTP error: 404");
    }

    #[test]
    fn missing_notice_is_per_language() {
        let err = ReaderError::ResourceMissing(Lang::Zh);
        assert_eq!(err.notice(Lang::Zh), "中文文档未提供。");
    }
}
