use bilingual_reader_shared::{
    highlight::{Direction, HighlightEngine, MemoryDocument, NodeId, TextSurface},
    Lang,
};

fn article() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let en = doc.push_element(root, Some(Lang::En));
    let para = doc.push_element(en, None);
    doc.push_text(para, "Aaa bridge. The Bridge at dawn; ");
    doc.push_text(para, "bridges again and aaaa.");
    let quote = doc.push_element(en, None);
    doc.push_text(quote, "ÉCOLE école Ecole");
    let zh = doc.push_element(root, Some(Lang::Zh));
    doc.push_text(zh, "桥梁 bridge 桥");
    doc
}

#[test]
fn search_then_clear_restores_text_for_many_queries() {
    let queries = ["a", "aa", "bridge", "BRIDGE", "école", " at ", "e", "桥", "zzz", "dawn; b"];
    let mut doc = article();
    let original = doc.text_content();
    let mut engine: HighlightEngine<NodeId> = HighlightEngine::new();

    for lang in [Lang::En, Lang::Zh] {
        for query in queries {
            engine.search(&mut doc, query, lang);
            engine.clear(&mut doc);
            assert_eq!(doc.text_content(), original, "query {query:?} in {lang}");
            assert!(doc.markers().is_empty());
        }
    }
}

#[test]
fn matches_follow_document_order_and_do_not_overlap() {
    let mut doc = article();
    let mut engine = HighlightEngine::new();
    let report = engine.search(&mut doc, "aa", Lang::En);

    // "Aaa" gives one match, "aaaa" gives two.
    assert_eq!(report.count, 3);
    let texts: Vec<String> = engine.matches().iter().map(|m| doc.marker_text(*m)).collect();
    assert_eq!(texts, vec!["Aa", "aa", "aa"]);
    assert_eq!(doc.markers(), engine.matches());
}

#[test]
fn case_folding_covers_non_ascii() {
    let mut doc = article();
    let mut engine = HighlightEngine::new();
    assert_eq!(engine.search(&mut doc, "école", Lang::En).count, 2);
}

#[test]
fn matches_spanning_sibling_text_nodes_are_not_joined() {
    let mut doc = article();
    let mut engine = HighlightEngine::new();
    assert_eq!(engine.search(&mut doc, "dawn; bridges", Lang::En).count, 0);
}

#[test]
fn cycling_visits_every_match_once() {
    let mut doc = article();
    let mut engine = HighlightEngine::new();
    let n = engine.search(&mut doc, "bridge", Lang::En).count;
    assert_eq!(n, 3);

    let mut seen = vec![engine.report().active];
    for _ in 1..n {
        seen.push(engine.advance(&mut doc, Direction::Forward).active);
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(engine.advance(&mut doc, Direction::Forward).active, Some(0));
    assert_eq!(doc.active_markers(), vec![engine.matches()[0]]);
}
