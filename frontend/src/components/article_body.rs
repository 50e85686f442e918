use bilingual_reader_shared::{i18n::messages, BodyPlan, Lang, ReaderError};
use yew::prelude::*;

use crate::{
    components::{loading_spinner::LoadingSpinner, raw_html::RawHtml},
    config::resource_url,
};

/// Progress of one converted document half.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum BodyState {
    #[default]
    Pending,
    Ready(AttrValue),
    Failed(ReaderError),
}

#[derive(Properties, Clone, PartialEq)]
pub struct ArticleBodyProps {
    /// Language of this half; notices are worded in it.
    pub half: Lang,
    pub plan: BodyPlan,
    pub state: BodyState,
    #[prop_or_default]
    pub on_replaced: Callback<()>,
}

#[function_component(ArticleBody)]
pub fn article_body(props: &ArticleBodyProps) -> Html {
    let lang = props.half;
    let notice = |err: &ReaderError| html! { <p class="notice">{ err.notice(lang) }</p> };

    let content = match (&props.plan, &props.state) {
        (BodyPlan::Embed { src }, _) => html! {
            <iframe class="pdf-frame" src={resource_url(src)} title={lang.code()} />
        },
        (BodyPlan::Notice(err), _) => notice(err),
        (BodyPlan::Convert { .. }, BodyState::Pending) => html! {
            <LoadingSpinner label={messages(lang).loading} />
        },
        (BodyPlan::Convert { .. }, BodyState::Ready(html)) => html! {
            <RawHtml
                html={html.clone()}
                class={classes!("doc-body")}
                on_replaced={props.on_replaced.clone()}
            />
        },
        (BodyPlan::Convert { .. }, BodyState::Failed(err)) => notice(err),
    };

    html! {
        <section class="doc-half" data-lang={lang.code()}>
            { content }
        </section>
    }
}
