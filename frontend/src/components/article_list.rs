use bilingual_reader_shared::{i18n::messages, session::ListEntry, Lang, ReaderError};
use yew::prelude::*;

use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};

#[derive(Properties, Clone, PartialEq)]
pub struct ArticleListProps {
    pub entries: Vec<ListEntry>,
    pub lang: Lang,
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<ReaderError>,
}

#[function_component(ArticleList)]
pub fn article_list(props: &ArticleListProps) -> Html {
    let t = messages(props.lang);

    let body = if props.loading {
        html! { <LoadingSpinner size={SpinnerSize::Small} label={t.loading} /> }
    } else if let Some(err) = &props.error {
        html! { <p class="notice">{ err.notice(props.lang) }</p> }
    } else if props.entries.is_empty() {
        html! { <p class="notice">{ t.no_articles }</p> }
    } else {
        let en_badge = messages(Lang::En).lang_badge;
        let zh_badge = messages(Lang::Zh).lang_badge;
        html! {
            <ul class="article-list">
                { for props.entries.iter().map(|entry| html! {
                    <li key={entry.id.clone()} class={classes!(entry.active.then_some("active"))}>
                        <a href={entry.href.clone()}>{ &entry.title }</a>
                        <div class="meta">
                            if !entry.date.is_empty() {
                                <span class="date">{ &entry.date }</span>
                            }
                            if entry.has_en {
                                <span class="badge">{ en_badge }</span>
                            }
                            if entry.has_zh {
                                <span class="badge">{ zh_badge }</span>
                            }
                        </div>
                    </li>
                }) }
            </ul>
        }
    };

    html! {
        <nav class="sidebar">
            <h2>{ t.articles_heading }</h2>
            { body }
        </nav>
    }
}
