use bilingual_reader_shared::{i18n::messages, resolve, Lang, SiteMeta};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct HomePageProps {
    pub site: SiteMeta,
    pub lang: Lang,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let t = messages(props.lang);
    let title = resolve(Some(&props.site.title), props.lang, Some(t.brand_fallback));
    let desc = resolve(Some(&props.site.desc), props.lang, None);

    html! {
        <section class="view view-home">
            <h2>{ title }</h2>
            if !desc.is_empty() {
                <p class="lead">{ desc }</p>
            }
        </section>
    }
}
