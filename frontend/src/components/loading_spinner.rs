use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
}

impl SpinnerSize {
    fn dimension(&self) -> u32 {
        match self {
            SpinnerSize::Small => 20,
            SpinnerSize::Medium => 36,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or(SpinnerSize::Medium)]
    pub size: SpinnerSize,
    /// Announced to screen readers. Kept out of the text content so the
    /// spinner never shows up in search results.
    pub label: AttrValue,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let spinner_style = format!("--spinner-size:{}px;", props.size.dimension());

    html! {
        <div
            class="spinner-row"
            role="status"
            aria-live="polite"
            aria-busy="true"
            aria-label={props.label.clone()}
        >
            <div style={spinner_style} class="spinner" />
        </div>
    }
}
