use serde_json::{Map, Value};
use url::Url;

use crate::{
    config::DOCUMENTS_DIR,
    locale::{Lang, LocalizedText},
};

/// Document format, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pdf,
    Docx,
    /// Pre-2007 binary Word format; never converted.
    LegacyDoc,
    Unknown,
}

impl ResourceKind {
    pub fn infer(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        let ext = match file.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return ResourceKind::Unknown,
        };
        match ext.as_str() {
            "pdf" => ResourceKind::Pdf,
            "docx" => ResourceKind::Docx,
            "doc" => ResourceKind::LegacyDoc,
            _ => ResourceKind::Unknown,
        }
    }

    fn from_declared(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(ResourceKind::Pdf),
            "docx" => Some(ResourceKind::Docx),
            "doc" | "legacy-doc" => Some(ResourceKind::LegacyDoc),
            _ => None,
        }
    }

    /// Whether the rendered body exposes its text to the highlight engine.
    /// The native PDF viewer is an opaque frame; every other kind renders
    /// either converted HTML or a text notice.
    pub fn is_text_searchable(self) -> bool {
        !matches!(self, ResourceKind::Pdf)
    }
}

/// A per-language document reference with a normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub path: String,
    pub kind: ResourceKind,
}

impl ResourceRef {
    pub fn new(raw_path: &str) -> Option<Self> {
        let path = normalize_resource_path(raw_path)?;
        let kind = ResourceKind::infer(&path);
        Some(Self {
            path,
            kind,
        })
    }
}

/// Absolute http(s) URLs are kept; anything else is made relative to the
/// documents directory without doubling its prefix.
pub fn normalize_resource_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(raw) {
        if matches!(url.scheme(), "http" | "https") {
            return Some(raw.to_string());
        }
    }

    let relative = raw.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }
    let prefix = format!("{DOCUMENTS_DIR}/");
    if relative.to_ascii_lowercase().starts_with(&prefix) {
        Some(relative.to_string())
    } else {
        Some(format!("{prefix}{relative}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    pub en: Option<ResourceRef>,
    pub zh: Option<ResourceRef>,
}

impl Sources {
    pub fn get(&self, lang: Lang) -> Option<&ResourceRef> {
        match lang {
            Lang::En => self.en.as_ref(),
            Lang::Zh => self.zh.as_ref(),
        }
    }
}

/// One archived article, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: String,
    pub title: Option<LocalizedText>,
    pub desc: Option<LocalizedText>,
    pub date: String,
    pub sources: Sources,
}

impl ArticleRecord {
    /// Lenient conversion of one manifest entry. Entries without a string id
    /// are rejected; unrecognised fields are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_str()?.trim();
        if id.is_empty() {
            return None;
        }

        let title = localized_field(obj, "title_i18n").or_else(|| localized_field(obj, "title"));
        let desc = localized_field(obj, "desc_i18n").or_else(|| localized_field(obj, "desc"));
        let date = ["date", "updated"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        Some(Self {
            id: id.to_string(),
            title,
            desc,
            date,
            sources: Sources {
                en: source_for(obj, Lang::En),
                zh: source_for(obj, Lang::Zh),
            },
        })
    }

    pub fn source(&self, lang: Lang) -> Option<&ResourceRef> {
        self.sources.get(lang)
    }
}

fn localized_field(obj: &Map<String, Value>, key: &str) -> Option<LocalizedText> {
    let value = obj.get(key)?;
    match value {
        Value::String(s) => Some(LocalizedText::Plain(s.clone()).normalized()),
        Value::Object(map) => {
            let entries = map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect();
            Some(LocalizedText::PerLang(entries))
        },
        _ => None,
    }
}

fn source_for(obj: &Map<String, Value>, lang: Lang) -> Option<ResourceRef> {
    let code = lang.code();
    let nested = |group: &str| obj.get(group).and_then(|g| g.get(code)).cloned();
    let candidates = [
        nested("sources"),
        obj.get(&format!("{code}_pdf")).cloned(),
        nested("pdf"),
        obj.get(&format!("{code}_docx")).cloned(),
        nested("docx"),
        obj.get(code).cloned(),
    ];
    candidates.into_iter().flatten().find_map(|v| resource_from_value(&v))
}

fn resource_from_value(value: &Value) -> Option<ResourceRef> {
    match value {
        Value::String(path) => ResourceRef::new(path),
        Value::Object(obj) => {
            let mut resource = ResourceRef::new(obj.get("path")?.as_str()?)?;
            if let Some(kind) = obj.get("kind").and_then(Value::as_str) {
                if let Some(kind) = ResourceKind::from_declared(kind) {
                    resource.kind = kind;
                }
            }
            Some(resource)
        },
        _ => None,
    }
}

/// Site-wide title, description and about text from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMeta {
    pub title: LocalizedText,
    pub desc: LocalizedText,
    pub about: Option<LocalizedText>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: LocalizedText::pair("Kalyna Field Notes", "Kalyna 前线笔记"),
            desc: LocalizedText::pair(
                "A reading tool and archive for OSINT notes, briefs, and references.",
                "用于整理与阅读 OSINT 笔记、简报与参考资料的归档工具。",
            ),
            about: None,
        }
    }
}

impl SiteMeta {
    /// Missing fields keep their defaults.
    pub fn from_value(value: &Value) -> Self {
        let mut site = Self::default();
        let Some(obj) = value.as_object() else {
            return site;
        };
        if let Some(title) = localized_field(obj, "title") {
            site.title = title;
        }
        if let Some(desc) = localized_field(obj, "desc") {
            site.desc = desc;
        }
        site.about = localized_field(obj, "about");
        site
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kind_is_inferred_from_extension() {
        assert_eq!(ResourceKind::infer("articles/a.PDF"), ResourceKind::Pdf);
        assert_eq!(ResourceKind::infer("articles/b.docx?v=2"), ResourceKind::Docx);
        assert_eq!(ResourceKind::infer("old.doc"), ResourceKind::LegacyDoc);
        assert_eq!(ResourceKind::infer("notes.v1/readme"), ResourceKind::Unknown);
        assert!(ResourceKind::Docx.is_text_searchable());
        assert!(ResourceKind::LegacyDoc.is_text_searchable());
        assert!(!ResourceKind::Pdf.is_text_searchable());
    }

    #[test]
    fn paths_are_normalized_under_documents_dir() {
        assert_eq!(normalize_resource_path("a.pdf").as_deref(), Some("articles/a.pdf"));
        assert_eq!(normalize_resource_path("//a.pdf").as_deref(), Some("articles/a.pdf"));
        assert_eq!(
            normalize_resource_path("/Articles/x/a.pdf").as_deref(),
            Some("Articles/x/a.pdf")
        );
        assert_eq!(
            normalize_resource_path("https://cdn.example.com/a.pdf").as_deref(),
            Some("https://cdn.example.com/a.pdf")
        );
        assert_eq!(normalize_resource_path("  "), None);
    }

    #[test]
    fn sources_accept_legacy_field_shapes() {
        let record = ArticleRecord::from_value(&json!({
            "id": "r1",
            "title": "Report",
            "en_pdf": "r1-en.pdf",
            "docx": { "zh": "r1-zh.docx" }
        }))
        .unwrap();
        assert_eq!(record.source(Lang::En).unwrap().path, "articles/r1-en.pdf");
        assert_eq!(record.source(Lang::Zh).unwrap().kind, ResourceKind::Docx);
        assert_eq!(record.title, Some(LocalizedText::pair("Report", "Report")));
    }

    #[test]
    fn explicit_sources_may_declare_kind() {
        let record = ArticleRecord::from_value(&json!({
            "id": "r2",
            "sources": { "en": { "path": "download?id=7", "kind": "docx" } }
        }))
        .unwrap();
        let en = record.source(Lang::En).unwrap();
        assert_eq!(en.kind, ResourceKind::Docx);
        assert!(record.source(Lang::Zh).is_none());
    }

    #[test]
    fn entries_without_id_are_rejected() {
        assert!(ArticleRecord::from_value(&json!({ "title": "x" })).is_none());
        assert!(ArticleRecord::from_value(&json!({ "id": 3 })).is_none());
        assert!(ArticleRecord::from_value(&json!("a1")).is_none());
    }

    #[test]
    fn site_meta_keeps_defaults_for_missing_fields() {
        let site = SiteMeta::from_value(&json!({ "title": { "en": "Archive" } }));
        assert_eq!(site.desc, SiteMeta::default().desc);
        assert!(site.about.is_none());
    }
}
