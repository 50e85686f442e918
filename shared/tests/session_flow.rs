use bilingual_reader_shared::{
    config::LANGUAGE_KEY,
    highlight::{Direction, HighlightPhase, MemoryDocument, NodeId},
    prefs::MemoryStorage,
    session::{ArticleView, BodyPlan},
    ArticleStore, Lang, Panel, PrefStorage, ReaderError, ReaderSession, Route, TextSurface,
};
use serde_json::json;

fn manifest() -> ArticleStore {
    ArticleStore::from_manifest_value(&json!({
        "site": { "title": { "en": "Field Notes", "zh": "笔记" } },
        "articles": [
            {
                "id": "brief",
                "date": "2024-06-01",
                "title": { "en": "Brief", "zh": "简报" },
                "en": "brief-en.docx",
                "zh": "brief-zh.docx"
            },
            {
                "id": "scan",
                "date": "2024-01-01",
                "title": "Scan",
                "pdf": { "en": "scan.pdf", "zh": "scan-zh.pdf" }
            }
        ]
    }))
}

/// Two language halves as the frontend lays them out after conversion.
fn rendered_bodies() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let en = doc.push_element(root, Some(Lang::En));
    doc.push_text(en, "Supply lines moved north. Supply depots remain.");
    let zh = doc.push_element(root, Some(Lang::Zh));
    doc.push_text(zh, "补给线北移。补给站仍在。");
    doc
}

fn session() -> ReaderSession<NodeId> {
    let mut session = ReaderSession::restore(&MemoryStorage::default());
    session.install_store(manifest());
    session
}

#[test]
fn missing_article_renders_not_found_from_any_prior_state() {
    let mut doc = rendered_bodies();
    let mut s = session();

    for prior in ["#/", "#/about", "#/article/brief"] {
        s.navigate_fragment(&mut doc, prior);
        let view = s.navigate_fragment(&mut doc, "#/article/missing-id");
        assert_eq!(view.panel, Panel::Article);
        assert_eq!(view.article, Some(ArticleView::NotFound {
            id: "missing-id".into()
        }));
        assert!(s.current_article().is_none());
    }
}

#[test]
fn navigation_clears_highlights() {
    let mut doc = rendered_bodies();
    let before = doc.text_content();
    let mut s = session();
    s.navigate(&mut doc, Route::Article("brief".into()));

    let report = s.search(&mut doc, "supply");
    assert_eq!(report.count, 2);
    assert_eq!(doc.markers().len(), 2);

    s.navigate(&mut doc, Route::About);
    assert!(doc.markers().is_empty());
    assert_eq!(s.search_report().phase, HighlightPhase::Idle);
    assert_eq!(doc.text_content(), before);
}

#[test]
fn language_switch_keeps_route_and_article_and_re_renders() {
    let mut doc = rendered_bodies();
    let storage = MemoryStorage::default();
    let mut s = session();
    let entered = s.navigate(&mut doc, Route::Article("brief".into()));
    s.search(&mut doc, "supply");

    let switched = s.set_language(&mut doc, Lang::Zh, &storage);
    assert_eq!(switched.route, entered.route);
    assert_eq!(switched.lang, Lang::Zh);
    assert!(switched.generation > entered.generation);
    assert!(!s.is_current(entered.generation));
    assert_eq!(s.current_article().map(|a| a.id.as_str()), Some("brief"));
    assert!(doc.markers().is_empty());
    assert_eq!(switched.article, entered.article);
    assert_eq!(storage.get(LANGUAGE_KEY).as_deref(), Some("zh"));

    let report = s.search(&mut doc, "补给");
    assert_eq!(report.count, 2);
}

#[test]
fn search_advance_cycle_through_the_session() {
    let mut doc = rendered_bodies();
    let mut s = session();
    s.navigate(&mut doc, Route::Article("brief".into()));

    let report = s.search(&mut doc, "  SUPPLY ");
    assert_eq!((report.count, report.active), (2, Some(0)));
    assert_eq!(s.advance(&mut doc, Direction::Backward).active, Some(1));
    assert_eq!(s.advance(&mut doc, Direction::Forward).active, Some(0));
    assert_eq!(report.status(Lang::En), "1 / 2 matches");

    let cleared = s.clear_search(&mut doc);
    assert_eq!(cleared.count, 0);
    assert!(doc.markers().is_empty());
}

#[test]
fn pdf_article_search_is_disabled_per_language() {
    let mut doc = rendered_bodies();
    let mut s = session();
    let view = s.navigate(&mut doc, Route::Article("scan".into()));
    let Some(ArticleView::Ready {
        bodies, ..
    }) = view.article
    else {
        panic!("expected ready article");
    };
    assert!(matches!(bodies.en, BodyPlan::Embed { .. }));
    assert!(!s.content_searchable());
    assert_eq!(s.search(&mut doc, "supply").count, 0);
    assert!(doc.markers().is_empty());
}

#[test]
fn prefs_survive_a_reload() {
    let storage = MemoryStorage::default();
    let mut doc = rendered_bodies();
    {
        let mut s = session();
        s.set_language(&mut doc, Lang::Zh, &storage);
        s.zoom_by(2, &storage);
    }
    let restored: ReaderSession<NodeId> = ReaderSession::restore(&storage);
    assert_eq!(restored.lang(), Lang::Zh);
    assert_eq!(restored.zoom(), 1.2);
}

#[test]
fn manifest_failure_is_not_fatal() {
    let mut doc = rendered_bodies();
    let mut s = session();
    let err = ArticleStore::from_manifest_str("<html>404</html>").unwrap_err();
    s.manifest_failed(err);
    assert!(matches!(s.manifest_error(), Some(ReaderError::ManifestLoad(_))));

    let view = s.navigate_fragment(&mut doc, "#/article/brief");
    assert!(matches!(view.article, Some(ArticleView::NotFound { .. })));
    assert_eq!(s.search(&mut doc, "补给").count, 0);
    assert_eq!(s.search(&mut doc, "supply").count, 2);
}
