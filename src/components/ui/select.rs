use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Native `<select>` with a leading empty option labelled `placeholder`.
/// `options` are `(value, label)` pairs.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into)] placeholder: String,
    #[prop(optional)] required: bool,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "pr-8", class);

    let on_select = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                on_change.run(select.value());
            }
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            id=id
            required=required
            prop:value=move || value.get()
            on:change=on_select
        >
            <option value="" selected=move || value.get().is_empty()>{placeholder}</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|(v, label)| {
                        let selected_value = v.clone();
                        view! {
                            <option value=v selected=move || value.get() == selected_value>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
