use bilingual_reader_shared::{i18n::messages, resolve, Lang, SiteMeta};
use yew::prelude::*;

use crate::{components::raw_html::RawHtml, utils::markdown_to_html};

#[derive(Properties, Clone, PartialEq)]
pub struct AboutPageProps {
    pub site: SiteMeta,
    pub lang: Lang,
}

#[function_component(AboutPage)]
pub fn about_page(props: &AboutPageProps) -> Html {
    let t = messages(props.lang);
    let source = resolve(props.site.about.as_ref(), props.lang, None);
    let rendered = use_memo(source, |source| AttrValue::from(markdown_to_html(source)));

    html! {
        <section class="view view-about">
            <h2>{ t.about_heading }</h2>
            if rendered.is_empty() {
                <p class="notice">{ t.about_empty }</p>
            } else {
                <RawHtml html={(*rendered).clone()} class={classes!("about-body")} />
            }
        </section>
    }
}
