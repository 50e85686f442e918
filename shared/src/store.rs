use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    article::{ArticleRecord, SiteMeta},
    error::ReaderError,
};

/// Articles loaded from the manifest, in manifest order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleStore {
    articles: Vec<ArticleRecord>,
    site: SiteMeta,
}

impl ArticleStore {
    pub fn new(articles: Vec<ArticleRecord>, site: SiteMeta) -> Self {
        Self {
            articles,
            site,
        }
    }

    /// Parse a manifest body: either a bare array of records or an object
    /// with an `articles` array and optional `site` metadata.
    pub fn from_manifest_str(body: &str) -> Result<Self, ReaderError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ReaderError::ManifestLoad(e.to_string()))?;
        Ok(Self::from_manifest_value(&value))
    }

    pub fn from_manifest_value(value: &Value) -> Self {
        let (entries, site) = match value {
            Value::Array(items) => (items.as_slice(), SiteMeta::default()),
            Value::Object(obj) => {
                let entries = obj
                    .get("articles")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let site = obj.get("site").map(SiteMeta::from_value).unwrap_or_default();
                (entries, site)
            },
            _ => {
                warn!("manifest is neither an array nor an object; treating as empty");
                (&[][..], SiteMeta::default())
            },
        };

        let mut seen = HashSet::new();
        let mut articles = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let Some(record) = ArticleRecord::from_value(entry) else {
                debug!(index = idx, "dropping malformed manifest entry");
                continue;
            };
            if !seen.insert(record.id.clone()) {
                warn!(id = %record.id, "dropping duplicate manifest entry");
                continue;
            }
            articles.push(record);
        }

        debug!(count = articles.len(), "manifest parsed");
        Self {
            articles,
            site,
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Newest first by plain lexical comparison of `date`; equal dates keep
    /// manifest order.
    pub fn list_sorted_by_recency(&self) -> Vec<&ArticleRecord> {
        let mut items: Vec<&ArticleRecord> = self.articles.iter().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    pub fn site(&self) -> &SiteMeta {
        &self.site
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
