use web_sys::Event;
use yew::prelude::*;
use yew_hooks::use_event_with_window;

use crate::utils::current_fragment;

/// Call `on_change` with the new location fragment whenever it changes,
/// including changes made through the back and forward buttons.
///
/// # Example
/// ```rust
/// use crate::hooks::use_hash_change;
///
/// #[function_component(Probe)]
/// fn probe() -> Html {
///     let fragment = use_state(String::new);
///     {
///         let fragment = fragment.clone();
///         use_hash_change(move |next| fragment.set(next));
///     }
///     html! { <code>{ (*fragment).clone() }</code> }
/// }
/// ```
#[hook]
pub fn use_hash_change<F>(on_change: F)
where
    F: Fn(String) + 'static,
{
    use_event_with_window("hashchange", move |_: Event| on_change(current_fragment()));
}
