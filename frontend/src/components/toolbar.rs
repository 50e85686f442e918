use bilingual_reader_shared::{
    highlight::Direction, i18n::messages, prefs::zoom_label, Lang, SearchReport,
};
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ToolbarProps {
    pub lang: Lang,
    pub zoom: f64,
    pub report: SearchReport,
    /// False while the visible body is an embedded PDF.
    pub searchable: bool,
    pub show_home: bool,
    pub on_search: Callback<String>,
    pub on_step: Callback<Direction>,
    pub on_clear: Callback<()>,
    pub on_lang: Callback<Lang>,
    pub on_zoom: Callback<i32>,
    pub on_print: Callback<()>,
    pub on_home: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let t = messages(props.lang);
    let input_ref = use_node_ref();

    let read_query = {
        let input_ref = input_ref.clone();
        move || {
            input_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default()
        }
    };

    let on_find = {
        let on_search = props.on_search.clone();
        let read_query = read_query.clone();
        Callback::from(move |_: MouseEvent| on_search.emit(read_query()))
    };

    let on_keydown = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_search.emit(read_query());
            }
        })
    };

    let on_clear = {
        let input_ref = input_ref.clone();
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            on_clear.emit(());
        })
    };

    let step = |direction: Direction| {
        let on_step = props.on_step.clone();
        Callback::from(move |_: MouseEvent| on_step.emit(direction))
    };

    let pick_lang = |lang: Lang| {
        let on_lang = props.on_lang.clone();
        Callback::from(move |_: Event| on_lang.emit(lang))
    };

    let zoom = |steps: i32| {
        let on_zoom = props.on_zoom.clone();
        Callback::from(move |_: MouseEvent| on_zoom.emit(steps))
    };

    let status = if props.searchable {
        props.report.status(props.lang)
    } else {
        t.pdf_search_hint.to_string()
    };

    html! {
        <div class="toolbar">
            if props.show_home {
                <button class="btn" onclick={props.on_home.reform(|_: MouseEvent| ())}>
                    { t.home_button }
                </button>
            }
            <div class="search">
                <input
                    ref={input_ref}
                    type="search"
                    placeholder={t.search_placeholder}
                    disabled={!props.searchable}
                    onkeydown={on_keydown}
                />
                <button class="btn" onclick={on_find} disabled={!props.searchable}>
                    { t.search_button }
                </button>
                <button class="btn" onclick={step(Direction::Backward)}>{ t.prev_button }</button>
                <button class="btn" onclick={step(Direction::Forward)}>{ t.next_button }</button>
                <button class="btn" onclick={on_clear}>{ t.clear_button }</button>
                <span class="search-status" aria-live="polite">{ status }</span>
            </div>
            <div class="lang-switch" role="radiogroup">
                <label>
                    <input
                        type="radio"
                        name="lang"
                        checked={props.lang == Lang::En}
                        onchange={pick_lang(Lang::En)}
                    />
                    { "EN" }
                </label>
                <label>
                    <input
                        type="radio"
                        name="lang"
                        checked={props.lang == Lang::Zh}
                        onchange={pick_lang(Lang::Zh)}
                    />
                    { "中文" }
                </label>
            </div>
            <div class="zoom">
                <button class="btn" title={t.zoom_out} onclick={zoom(-1)}>{ "−" }</button>
                <span class="zoom-label">{ zoom_label(props.zoom) }</span>
                <button class="btn" title={t.zoom_in} onclick={zoom(1)}>{ "+" }</button>
            </div>
            <button class="btn" onclick={props.on_print.reform(|_: MouseEvent| ())}>
                { t.print_button }
            </button>
        </div>
    }
}
