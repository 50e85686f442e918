use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct RawHtmlProps {
    pub html: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    /// Called after the markup has been replaced.
    #[prop_or_default]
    pub on_replaced: Callback<()>,
}

/// Render converted document HTML into a host element without letting Yew
/// diff its children. Search markers split the text nodes in here, which a
/// VDOM diff would trip over.
#[function_component(RawHtml)]
pub fn raw_html(props: &RawHtmlProps) -> Html {
    let host_ref = use_node_ref();

    {
        let host_ref = host_ref.clone();
        let on_replaced = props.on_replaced.clone();
        use_effect_with(props.html.clone(), move |next_html| {
            if let Some(host) = host_ref.cast::<Element>() {
                host.set_inner_html(next_html.as_str());
                on_replaced.emit(());
            }
            || ()
        });
    }

    html! {
        <div ref={host_ref} class={props.class.clone()} />
    }
}
