use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Display language of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Zh => "zh",
        }
    }

    /// Parse a language code; anything other than `en`/`zh` is rejected.
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "zh" => Some(Lang::Zh),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Lang::En => Lang::Zh,
            Lang::Zh => Lang::En,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A string that is either shared by every language or given per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    PerLang(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Same value for every supported language.
    pub fn uniform(value: impl Into<String>) -> Self {
        let value = value.into();
        LocalizedText::PerLang(
            Lang::ALL
                .iter()
                .map(|lang| (lang.code().to_string(), value.clone()))
                .collect(),
        )
    }

    pub fn pair(en: impl Into<String>, zh: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Lang::En.code().to_string(), en.into());
        map.insert(Lang::Zh.code().to_string(), zh.into());
        LocalizedText::PerLang(map)
    }

    /// Plain strings become a per-language mapping; mappings are kept.
    pub fn normalized(self) -> Self {
        match self {
            LocalizedText::Plain(value) => LocalizedText::uniform(value),
            other => other,
        }
    }

    /// The value for exactly `lang`, without any fallback.
    pub fn get_exact(&self, lang: Lang) -> Option<&str> {
        match self {
            LocalizedText::Plain(value) => non_empty(value),
            LocalizedText::PerLang(map) => map.get(lang.code()).and_then(|v| non_empty(v)),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Resolve `value` for `lang`.
///
/// Mappings fall back to `en`, then `zh`, then `fallback`. Empty strings in
/// a mapping count as absent.
pub fn resolve(value: Option<&LocalizedText>, lang: Lang, fallback: Option<&str>) -> String {
    let fallback = fallback.unwrap_or_default();
    match value {
        None => fallback.to_string(),
        Some(LocalizedText::Plain(value)) => value.clone(),
        Some(LocalizedText::PerLang(map)) => [lang.code(), Lang::En.code(), Lang::Zh.code()]
            .iter()
            .find_map(|code| map.get(*code).and_then(|v| non_empty(v)))
            .unwrap_or(fallback)
            .to_string(),
    }
}

/// Title for list entries: active language, then the other one, then
/// `untitled`.
pub fn pick_with_other(value: Option<&LocalizedText>, lang: Lang, untitled: &str) -> String {
    value
        .and_then(|text| text.get_exact(lang).or_else(|| text.get_exact(lang.other())))
        .map(str::to_string)
        .unwrap_or_else(|| {
            let resolved = resolve(value, lang, None);
            if resolved.is_empty() {
                untitled.to_string()
            } else {
                resolved
            }
        })
}
