//! Pieces every resource page shares around its own form fields.

use crate::components::ui::{Button, ButtonSize, ButtonVariant, NativeSelect, Spinner};
use leptos::prelude::*;

#[component]
pub fn EditorHeading(noun: &'static str, #[prop(into)] editing: Signal<bool>) -> impl IntoView {
    view! {
        <h1 class="mb-6 text-2xl font-bold text-foreground">
            {move || if editing.get() { format!("Edit {noun}") } else { format!("Add {noun}") }}
        </h1>
    }
}

/// Cancel (edit mode only) + submit. Lives inside the form, so submit is a
/// plain submit button.
#[component]
pub fn FormActions(
    noun: &'static str,
    #[prop(into)] editing: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex justify-end gap-2 md:col-span-full">
            <Show when=move || editing.get() fallback=|| ().into_view()>
                <Button
                    variant=ButtonVariant::Warning
                    attr:r#type="button"
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
            </Show>
            <Button attr:r#type="submit" attr:disabled=move || saving.get()>
                <span class="inline-flex items-center gap-2">
                    <Show when=move || saving.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if editing.get() { format!("Update {noun}") } else { format!("Add {noun}") }}
                </span>
            </Button>
        </div>
    }
}

#[component]
pub fn FilterSelect(
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    all_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="mb-4 flex items-center gap-4">
            <NativeSelect
                class="w-64"
                placeholder=all_label
                options=options
                value=value
                on_change=Callback::new(move |v: String| value.set(v))
            />
        </div>
    }
}

#[component]
pub fn RowActions(
    on_edit: Callback<()>,
    on_delete: Callback<()>,
    #[prop(optional)] on_hard_delete: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="flex gap-3">
            <Button
                variant=ButtonVariant::Link
                size=ButtonSize::Inline
                on:click=move |_| on_edit.run(())
            >
                "Edit"
            </Button>
            <Button
                variant=ButtonVariant::DangerLink
                size=ButtonSize::Inline
                on:click=move |_| on_delete.run(())
            >
                "Delete"
            </Button>
            {on_hard_delete
                .map(|hard| {
                    view! {
                        <Button
                            variant=ButtonVariant::DangerLink
                            size=ButtonSize::Inline
                            class="font-semibold"
                            on:click=move |_| hard.run(())
                        >
                            "Hard Delete"
                        </Button>
                    }
                })}
        </div>
    }
}

/// Shown instead of an empty list.
#[component]
pub fn ListPlaceholder(plural: &'static str, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <div class="text-xs text-muted-foreground">
            {move || if loading.get() { format!("Loading {plural}...") } else { format!("No {plural} yet.") }}
        </div>
    }
}
