use bilingual_reader_shared::{
    highlight::Direction, i18n::messages, ArticleView, BodyPlan, Lang, Panel, ReaderSession,
};
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::{
    api,
    components::{
        article_body::BodyState, article_list::ArticleList, toolbar::Toolbar,
    },
    hooks::use_hash_change,
    pages::{
        article::{BodyAction, Bodies},
        AboutPage, ArticlePage, HomePage,
    },
    storage::BrowserStorage,
    surface::DomSurface,
    utils::{current_fragment, print_page, set_fragment},
};

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(|| ReaderSession::<Element>::restore(&BrowserStorage));
    let content_ref = use_node_ref();
    let redraw = use_force_update();
    let manifest_loading = use_state(|| true);
    let bodies = use_reducer(Bodies::default);

    let surface = {
        let content_ref = content_ref.clone();
        move || DomSurface::from(content_ref.get())
    };

    let navigate = {
        let session = session.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        Callback::from(move |fragment: String| {
            session.borrow_mut().navigate_fragment(&mut surface(), &fragment);
            redraw.force_update();
        })
    };

    // Manifest first, then the route the page was opened on.
    {
        let session = session.clone();
        let navigate = navigate.clone();
        let manifest_loading = manifest_loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_manifest().await {
                    Ok(store) => session.borrow_mut().install_store(store),
                    Err(err) => session.borrow_mut().manifest_failed(err),
                }
                manifest_loading.set(false);
                navigate.emit(current_fragment());
            });
            || ()
        });
    }

    {
        let navigate = navigate.clone();
        use_hash_change(move |fragment| navigate.emit(fragment));
    }

    // Every new generation re-plans the bodies; conversions started under an
    // older one are dropped when they finish.
    let generation = session.borrow().generation();
    {
        let session = session.clone();
        let bodies = bodies.clone();
        let surface = surface.clone();
        use_effect_with(generation, move |generation| {
            let generation = *generation;
            bodies.dispatch(BodyAction::Reset(generation));

            let plans = match session.borrow().snapshot().article {
                Some(ArticleView::Ready {
                    bodies, ..
                }) => Some(bodies),
                _ => None,
            };
            for (lang, path) in plans.iter().flat_map(|plans| {
                Lang::ALL.into_iter().filter_map(move |lang| match plans.get(lang) {
                    BodyPlan::Convert {
                        path,
                    } => Some((lang, path.clone())),
                    _ => None,
                })
            }) {
                let session = session.clone();
                let bodies = bodies.clone();
                let surface = surface.clone();
                spawn_local(async move {
                    let state = match api::load_docx(&path).await {
                        Ok(html) => BodyState::Ready(html.into()),
                        Err(err) => {
                            warn!(%err, "document unavailable");
                            BodyState::Failed(err)
                        },
                    };
                    if !session.borrow().is_current(generation) {
                        debug!(%path, ?generation, "discarding stale document");
                        return;
                    }
                    session.borrow_mut().clear_search(&mut surface());
                    bodies.dispatch(BodyAction::Loaded {
                        generation,
                        lang,
                        state,
                    });
                });
            }
            || ()
        });
    }

    let on_search = {
        let session = session.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        Callback::from(move |query: String| {
            session.borrow_mut().search(&mut surface(), &query);
            redraw.force_update();
        })
    };

    let on_step = {
        let session = session.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        Callback::from(move |direction: Direction| {
            session.borrow_mut().advance(&mut surface(), direction);
            redraw.force_update();
        })
    };

    let on_clear = {
        let session = session.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            session.borrow_mut().clear_search(&mut surface());
            redraw.force_update();
        })
    };

    let on_lang = {
        let session = session.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        Callback::from(move |lang: Lang| {
            session.borrow_mut().set_language(&mut surface(), lang, &BrowserStorage);
            redraw.force_update();
        })
    };

    let on_zoom = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |steps: i32| {
            session.borrow_mut().zoom_by(steps, &BrowserStorage);
            redraw.force_update();
        })
    };

    let on_replaced = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            session.borrow_mut().content_replaced();
            redraw.force_update();
        })
    };

    let on_home = Callback::from(|_: ()| set_fragment("#/"));
    let on_print = Callback::from(|_: ()| print_page());

    let s = session.borrow();
    let view = s.snapshot();
    let lang = view.lang;
    let t = messages(lang);
    let (title, desc) = s.top_bar();
    let site = s.store().site().clone();

    let main = match (view.panel, view.article) {
        (Panel::Article, Some(article)) => html! {
            <ArticlePage
                view={article}
                lang={lang}
                zoom={s.zoom()}
                bodies={(*bodies).clone()}
                content_ref={content_ref.clone()}
                on_replaced={on_replaced}
            />
        },
        (Panel::About, _) => html! { <AboutPage site={site} lang={lang} /> },
        _ => html! { <HomePage site={site} lang={lang} /> },
    };

    html! {
        <div class={classes!("reader", format!("lang-{}", lang.code()))}>
            <header class="topbar">
                <div class="brand">
                    <h1>{ title }</h1>
                    if !desc.is_empty() {
                        <p class="hint">{ desc }</p>
                    }
                </div>
                <nav class="topnav">
                    <a href="#/">{ t.articles_heading }</a>
                    <a href="#/about">{ t.about_nav }</a>
                </nav>
            </header>
            <Toolbar
                lang={lang}
                zoom={s.zoom()}
                report={s.search_report()}
                searchable={s.content_searchable()}
                show_home={view.panel == Panel::Article}
                on_search={on_search}
                on_step={on_step}
                on_clear={on_clear}
                on_lang={on_lang}
                on_zoom={on_zoom}
                on_print={on_print}
                on_home={on_home}
            />
            <div class="layout">
                <ArticleList
                    entries={s.article_list()}
                    lang={lang}
                    loading={*manifest_loading}
                    error={s.manifest_error().cloned()}
                />
                <main class="pane">{ main }</main>
            </div>
        </div>
    }
}
