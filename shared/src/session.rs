//! Session-scoped reader state: route, language, zoom, current article and
//! the highlight engine, with one owner for the whole page lifetime.

use tracing::{debug, info, warn};

use crate::{
    article::{ArticleRecord, ResourceKind},
    config::{PDF_VIEWER_PARAMS, ZOOM_STEP},
    error::ReaderError,
    highlight::{Direction, HighlightEngine, SearchReport, TextSurface},
    i18n::messages,
    locale::{pick_with_other, resolve, Lang},
    prefs::{clamp_zoom, PrefStorage, SessionPrefs},
    route::Route,
    store::ArticleStore,
};

/// Identifies one transition or re-render. Async work started under an
/// older generation must not write its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Home,
    Article,
    About,
}

/// How one language half of an article body gets rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPlan {
    /// Point the native viewer at `src`.
    Embed { src: String },
    /// Fetch `path` and run it through the document converter.
    Convert { path: String },
    /// Nothing to load; show the error's notice.
    Notice(ReaderError),
}

impl BodyPlan {
    fn for_record(record: &ArticleRecord, lang: Lang) -> Self {
        let Some(resource) = record.source(lang) else {
            return BodyPlan::Notice(ReaderError::ResourceMissing(lang));
        };
        match resource.kind {
            ResourceKind::Pdf => BodyPlan::Embed {
                src: format!("{}#{}", resource.path, PDF_VIEWER_PARAMS),
            },
            ResourceKind::Docx => BodyPlan::Convert {
                path: resource.path.clone(),
            },
            ResourceKind::LegacyDoc => {
                BodyPlan::Notice(ReaderError::UnsupportedFormat(resource.path.clone()))
            },
            ResourceKind::Unknown => BodyPlan::Notice(ReaderError::resource_load(
                resource.path.clone(),
                "unrecognised document type",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBodies {
    pub en: BodyPlan,
    pub zh: BodyPlan,
}

impl ArticleBodies {
    pub fn get(&self, lang: Lang) -> &BodyPlan {
        match lang {
            Lang::En => &self.en,
            Lang::Zh => &self.zh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleView {
    NotFound { id: String },
    Ready { id: String, bodies: ArticleBodies },
}

impl ArticleView {
    /// The failure behind the not-found state, if this is one.
    pub fn error(&self) -> Option<ReaderError> {
        match self {
            ArticleView::NotFound {
                id,
            } => Some(ReaderError::ArticleNotFound(id.clone())),
            ArticleView::Ready { .. } => None,
        }
    }
}

/// Everything the UI needs to draw the current screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub generation: Generation,
    pub route: Route,
    pub panel: Panel,
    pub lang: Lang,
    pub article: Option<ArticleView>,
}

/// One row of the home list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub href: String,
    pub title: String,
    pub date: String,
    pub has_en: bool,
    pub has_zh: bool,
    pub active: bool,
}

#[derive(Debug)]
pub struct ReaderSession<M> {
    prefs: SessionPrefs,
    store: ArticleStore,
    manifest_error: Option<ReaderError>,
    route: Route,
    current: Option<String>,
    generation: Generation,
    engine: HighlightEngine<M>,
}

impl<M: Clone> ReaderSession<M> {
    pub fn new(prefs: SessionPrefs) -> Self {
        Self {
            prefs,
            store: ArticleStore::default(),
            manifest_error: None,
            route: Route::Home,
            current: None,
            generation: Generation::default(),
            engine: HighlightEngine::new(),
        }
    }

    /// Restore preferences from `storage` and start on the home screen.
    pub fn restore(storage: &dyn PrefStorage) -> Self {
        Self::new(SessionPrefs::load(storage))
    }

    pub fn install_store(&mut self, store: ArticleStore) {
        info!(articles = store.len(), "article store installed");
        self.store = store;
        self.manifest_error = None;
    }

    /// Fall back to an empty list with default site metadata.
    pub fn manifest_failed(&mut self, err: ReaderError) {
        warn!(error = %err, "manifest unavailable; continuing with empty list");
        self.store = ArticleStore::default();
        self.manifest_error = Some(err);
    }

    pub fn manifest_error(&self) -> Option<&ReaderError> {
        self.manifest_error.as_ref()
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn lang(&self) -> Lang {
        self.prefs.lang
    }

    pub fn zoom(&self) -> f64 {
        self.prefs.zoom
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    pub fn current_article(&self) -> Option<&ArticleRecord> {
        self.current.as_deref().and_then(|id| self.store.find_by_id(id))
    }

    pub fn search_report(&self) -> SearchReport {
        self.engine.report()
    }

    pub fn navigate_fragment<S>(&mut self, surface: &mut S, fragment: &str) -> ViewSnapshot
    where
        S: TextSurface<Marker = M>,
    {
        self.navigate(surface, Route::parse(fragment))
    }

    /// Enter `route`. Always clears highlights and starts a new generation,
    /// including when `route` equals the current one.
    pub fn navigate<S>(&mut self, surface: &mut S, route: Route) -> ViewSnapshot
    where
        S: TextSurface<Marker = M>,
    {
        self.engine.clear(surface);
        self.bump_generation();

        self.current = match &route {
            Route::Article(id) if self.store.find_by_id(id).is_some() => Some(id.clone()),
            _ => None,
        };
        debug!(?route, generation = self.generation.0, "route transition");
        self.route = route;
        self.snapshot()
    }

    /// Switch language; in the article view the bodies are planned again
    /// under a new generation.
    pub fn set_language<S>(
        &mut self,
        surface: &mut S,
        lang: Lang,
        storage: &dyn PrefStorage,
    ) -> ViewSnapshot
    where
        S: TextSurface<Marker = M>,
    {
        self.engine.clear(surface);
        self.prefs.lang = lang;
        self.prefs.save(storage);
        if self.current.is_some() {
            self.bump_generation();
        }
        self.snapshot()
    }

    pub fn zoom_by(&mut self, steps: i32, storage: &dyn PrefStorage) -> f64 {
        self.set_zoom(self.prefs.zoom + ZOOM_STEP * f64::from(steps), storage)
    }

    pub fn set_zoom(&mut self, zoom: f64, storage: &dyn PrefStorage) -> f64 {
        self.prefs.zoom = if zoom.is_finite() {
            clamp_zoom(zoom)
        } else {
            SessionPrefs::default().zoom
        };
        self.prefs.save(storage);
        self.prefs.zoom
    }

    /// Whether the visible content exposes text to the highlight engine.
    /// Embedded PDFs do not.
    pub fn content_searchable(&self) -> bool {
        match self.current_article() {
            Some(record) => record
                .source(self.prefs.lang)
                .map_or(true, |r| r.kind.is_text_searchable()),
            None => true,
        }
    }

    pub fn search<S>(&mut self, surface: &mut S, query: &str) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        if !self.content_searchable() {
            return self.engine.clear(surface);
        }
        self.engine.search(surface, query, self.prefs.lang)
    }

    pub fn advance<S>(&mut self, surface: &mut S, direction: Direction) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        self.engine.advance(surface, direction)
    }

    pub fn clear_search<S>(&mut self, surface: &mut S) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        self.engine.clear(surface)
    }

    /// Forget matches whose markers were destroyed by a content swap.
    pub fn content_replaced(&mut self) -> SearchReport {
        self.engine.forget()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let (panel, article) = match &self.route {
            Route::Home => (Panel::Home, None),
            Route::About => (Panel::About, None),
            Route::Article(id) => {
                let view = match self.current_article() {
                    Some(record) => ArticleView::Ready {
                        id: id.clone(),
                        bodies: ArticleBodies {
                            en: BodyPlan::for_record(record, Lang::En),
                            zh: BodyPlan::for_record(record, Lang::Zh),
                        },
                    },
                    None => ArticleView::NotFound {
                        id: id.clone(),
                    },
                };
                (Panel::Article, Some(view))
            },
        };
        ViewSnapshot {
            generation: self.generation,
            route: self.route.clone(),
            panel,
            lang: self.prefs.lang,
            article,
        }
    }

    /// Title and description for the top bar.
    pub fn top_bar(&self) -> (String, String) {
        let lang = self.prefs.lang;
        match self.current_article() {
            Some(record) => (
                resolve(record.title.as_ref(), lang, Some(messages(lang).untitled)),
                resolve(record.desc.as_ref(), lang, None),
            ),
            None => {
                let site = self.store.site();
                (
                    resolve(Some(&site.title), lang, Some(messages(lang).brand_fallback)),
                    resolve(Some(&site.desc), lang, None),
                )
            },
        }
    }

    /// Newest-first rows for the home list, with the current article marked.
    pub fn article_list(&self) -> Vec<ListEntry> {
        let lang = self.prefs.lang;
        let untitled = messages(lang).untitled;
        self.store
            .list_sorted_by_recency()
            .into_iter()
            .map(|record| ListEntry {
                id: record.id.clone(),
                href: Route::Article(record.id.clone()).to_fragment(),
                title: pick_with_other(record.title.as_ref(), lang, untitled),
                date: record.date.clone(),
                has_en: record.source(Lang::En).is_some(),
                has_zh: record.source(Lang::Zh).is_some(),
                active: self.current.as_deref() == Some(record.id.as_str()),
            })
            .collect()
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.next();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        highlight::{HighlightPhase, MemoryDocument, NodeId},
        prefs::MemoryStorage,
    };

    fn store() -> ArticleStore {
        ArticleStore::from_manifest_value(&json!({
            "articles": [
                { "id": "pdf", "date": "2024-01-01", "title": { "en": "Brief", "zh": "简报" },
                  "pdf": { "en": "brief-en.pdf" } },
                { "id": "doc", "date": "2024-03-01", "en": "notes.docx", "zh": "old.doc" }
            ]
        }))
    }

    fn session() -> ReaderSession<NodeId> {
        let mut session = ReaderSession::new(SessionPrefs::default());
        session.install_store(store());
        session
    }

    #[test]
    fn pdf_bodies_embed_and_missing_languages_get_notices() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        let view = s.navigate(&mut doc, Route::Article("pdf".into()));
        let Some(ArticleView::Ready {
            bodies, ..
        }) = view.article
        else {
            panic!("expected ready article");
        };
        assert_eq!(bodies.en, BodyPlan::Embed {
            src: "articles/brief-en.pdf#toolbar=1&navpanes=0&scrollbar=1".into()
        });
        assert_eq!(bodies.zh, BodyPlan::Notice(ReaderError::ResourceMissing(Lang::Zh)));
    }

    #[test]
    fn docx_converts_and_legacy_doc_is_rejected() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        let view = s.navigate(&mut doc, Route::Article("doc".into()));
        let Some(ArticleView::Ready {
            bodies, ..
        }) = view.article
        else {
            panic!("expected ready article");
        };
        assert_eq!(bodies.get(Lang::En), &BodyPlan::Convert {
            path: "articles/notes.docx".into()
        });
        assert!(matches!(bodies.zh, BodyPlan::Notice(ReaderError::UnsupportedFormat(_))));
    }

    #[test]
    fn unknown_id_reports_article_not_found() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        let view = s.navigate(&mut doc, Route::Article("gone".into()));
        let err = view.article.as_ref().and_then(ArticleView::error);
        assert_eq!(err, Some(ReaderError::ArticleNotFound("gone".into())));
        assert_eq!(err.map(|e| e.notice(Lang::En)), Some(messages(Lang::En).article_not_found.into()));

        let ready = s.navigate(&mut doc, Route::Article("pdf".into()));
        assert_eq!(ready.article.as_ref().and_then(ArticleView::error), None);
    }

    #[test]
    fn re_entering_a_route_starts_a_new_generation() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        let first = s.navigate(&mut doc, Route::Article("pdf".into())).generation;
        let second = s.navigate(&mut doc, Route::Article("pdf".into())).generation;
        assert!(second > first);
        assert!(!s.is_current(first));
        assert!(s.is_current(second));
    }

    #[test]
    fn pdf_content_is_not_searchable() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        doc.push_text(root, "Brief text");
        let mut s = session();
        s.navigate(&mut doc, Route::Article("pdf".into()));
        assert!(!s.content_searchable());
        let report = s.search(&mut doc, "brief");
        assert_eq!(report.phase, HighlightPhase::Idle);
        assert!(doc.markers().is_empty());
    }

    #[test]
    fn list_marks_current_article_and_badges() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        s.set_language(&mut doc, Lang::Zh, &MemoryStorage::default());
        s.navigate(&mut doc, Route::Article("pdf".into()));
        let list = s.article_list();
        assert_eq!(list[0].id, "doc");
        assert_eq!(list[0].title, "未命名");
        assert!(list[0].has_en && list[0].has_zh);
        assert!(list[1].active);
        assert_eq!(list[1].title, "简报");
        assert_eq!(list[1].href, "#/article/pdf");
        assert!(!list[1].has_zh);
    }

    #[test]
    fn top_bar_follows_current_article() {
        let mut doc = MemoryDocument::new();
        let mut s = session();
        assert_eq!(s.top_bar().0, "Kalyna Field Notes");
        s.navigate(&mut doc, Route::Article("pdf".into()));
        assert_eq!(s.top_bar().0, "Brief");
        s.navigate(&mut doc, Route::About);
        assert!(s.current_article().is_none());
        assert_eq!(s.top_bar().0, "Kalyna Field Notes");
    }

    #[test]
    fn zoom_is_clamped_and_persisted() {
        let storage = MemoryStorage::default();
        let mut s = session();
        assert_eq!(s.zoom_by(1, &storage), 1.1);
        for _ in 0..10 {
            s.zoom_by(1, &storage);
        }
        assert_eq!(s.zoom(), 1.3);
        assert_eq!(storage.get(crate::config::ZOOM_KEY).as_deref(), Some("1.3"));
        assert_eq!(s.set_zoom(f64::NAN, &storage), 1.0);
    }

    #[test]
    fn manifest_failure_leaves_empty_list_with_default_site() {
        let mut s = session();
        s.manifest_failed(ReaderError::ManifestLoad("HTTP error: 500".into()));
        assert!(s.article_list().is_empty());
        assert!(s.manifest_error().is_some());
        assert_eq!(s.top_bar().1, "A reading tool and archive for OSINT notes, briefs, and references.");
    }
}
