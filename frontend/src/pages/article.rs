use std::rc::Rc;

use bilingual_reader_shared::{ArticleView, Generation, Lang};
use tracing::debug;
use yew::prelude::*;

use crate::components::article_body::{ArticleBody, BodyState};

/// Loaded document halves for one generation.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Bodies {
    pub generation: Generation,
    pub en: BodyState,
    pub zh: BodyState,
}

impl Bodies {
    pub fn get(&self, lang: Lang) -> &BodyState {
        match lang {
            Lang::En => &self.en,
            Lang::Zh => &self.zh,
        }
    }
}

pub enum BodyAction {
    /// A new generation started; everything is pending again.
    Reset(Generation),
    Loaded {
        generation: Generation,
        lang: Lang,
        state: BodyState,
    },
}

impl Reducible for Bodies {
    type Action = BodyAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            BodyAction::Reset(generation) => Rc::new(Bodies {
                generation,
                ..Bodies::default()
            }),
            BodyAction::Loaded {
                generation, ..
            } if generation != self.generation => {
                debug!(?generation, current = ?self.generation, "dropping stale body");
                self
            },
            BodyAction::Loaded {
                lang,
                state,
                ..
            } => {
                let mut next = (*self).clone();
                match lang {
                    Lang::En => next.en = state,
                    Lang::Zh => next.zh = state,
                }
                Rc::new(next)
            },
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct ArticlePageProps {
    pub view: ArticleView,
    pub lang: Lang,
    pub zoom: f64,
    pub bodies: Bodies,
    /// Attached to the element the search engine scans.
    pub content_ref: NodeRef,
    #[prop_or_default]
    pub on_replaced: Callback<()>,
}

#[function_component(ArticlePage)]
pub fn article_page(props: &ArticlePageProps) -> Html {
    let plans = match &props.view {
        ArticleView::NotFound {
            id,
        } => {
            let notice = props
                .view
                .error()
                .map(|err| err.notice(props.lang))
                .unwrap_or_default();
            return html! {
                <section class="view view-article">
                    <p class="notice not-found" data-article={id.clone()}>{ notice }</p>
                </section>
            };
        },
        ArticleView::Ready {
            bodies, ..
        } => bodies,
    };

    // Scaled content keeps its layout box, so pad the pane for the overflow.
    let zoom_style = format!("transform: scale({}); transform-origin: top center;", props.zoom);
    let pad = if props.zoom > 1.0 {
        ((props.zoom - 1.0) * 260.0).round()
    } else {
        0.0
    };
    let pane_style = format!("padding-bottom: {pad}px;");

    html! {
        <section class="view view-article" style={pane_style}>
            <div class="doc" ref={props.content_ref.clone()} style={zoom_style}>
                { for Lang::ALL.into_iter().map(|half| html! {
                    <ArticleBody
                        key={half.code()}
                        half={half}
                        plan={plans.get(half).clone()}
                        state={props.bodies.get(half).clone()}
                        on_replaced={props.on_replaced.clone()}
                    />
                }) }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(bodies: Rc<Bodies>, action: BodyAction) -> Rc<Bodies> {
        bodies.reduce(action)
    }

    #[test]
    fn loaded_body_lands_in_its_half() {
        let g1 = Generation::default().next();
        let bodies = reduce(Rc::new(Bodies::default()), BodyAction::Reset(g1));
        let bodies = reduce(bodies, BodyAction::Loaded {
            generation: g1,
            lang: Lang::Zh,
            state: BodyState::Ready("<p>正文</p>".into()),
        });
        assert_eq!(bodies.get(Lang::Zh), &BodyState::Ready("<p>正文</p>".into()));
        assert_eq!(bodies.get(Lang::En), &BodyState::Pending);
    }

    #[test]
    fn body_from_an_older_generation_is_dropped() {
        let g1 = Generation::default().next();
        let g2 = g1.next();
        let bodies = reduce(Rc::new(Bodies::default()), BodyAction::Reset(g1));
        let bodies = reduce(bodies, BodyAction::Reset(g2));
        let bodies = reduce(bodies, BodyAction::Loaded {
            generation: g1,
            lang: Lang::En,
            state: BodyState::Ready("<p>stale</p>".into()),
        });
        assert_eq!(bodies.generation, g2);
        assert_eq!(bodies.en, BodyState::Pending);
    }

    #[test]
    fn reset_discards_loaded_halves() {
        let g1 = Generation::default().next();
        let bodies = reduce(Rc::new(Bodies::default()), BodyAction::Reset(g1));
        let bodies = reduce(bodies, BodyAction::Loaded {
            generation: g1,
            lang: Lang::En,
            state: BodyState::Ready("<p>old</p>".into()),
        });
        let bodies = reduce(bodies, BodyAction::Reset(g1.next()));
        assert_eq!(*bodies, Bodies {
            generation: g1.next(),
            ..Bodies::default()
        });
    }
}
