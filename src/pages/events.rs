use crate::components::ui::{Card, CardContent, CardItem, CardList, Input, Label, NativeSelect};
use crate::components::{EditorHeading, FilterSelect, FormActions, ListPlaceholder, RowActions};
use crate::models::category_label;
use crate::resource::{Categories, Events, ResourceSchema};
use crate::state::ResourceEditor;
use leptos::prelude::*;

#[component]
pub fn EventsPage() -> impl IntoView {
    let editor = ResourceEditor::new(Events::local());
    // Categories feed the select, the filter and the row labels.
    let categories = ResourceEditor::new(Categories);

    Effect::new(move |_| {
        editor.load();
        categories.load();
    });

    let (noun, plural) = (<Events>::NOUN, <Events>::PLURAL);
    let editing = Signal::derive(move || editor.is_editing());
    let category_options = Signal::derive(move || {
        categories
            .items
            .with(|items| items.iter().map(|c| (c.id.clone(), c.name.clone())).collect())
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        editor.submit();
    };

    view! {
        <main class="mx-auto w-full max-w-4xl p-6">
            <Card class="mb-8">
                <CardContent>
                    <EditorHeading noun=noun editing=editing />
                    <form class="grid grid-cols-1 gap-4 md:grid-cols-2" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="event-title" class="text-xs">"Title"</Label>
                            <Input
                                id="event-title"
                                name="title"
                                placeholder="Title"
                                required=true
                                value=Signal::derive(move || editor.draft_value(|d| d.title.clone()))
                                on_change=Callback::new(move |v: String| editor.edit_draft(|d| d.title = v))
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="event-description" class="text-xs">"Description"</Label>
                            <Input
                                id="event-description"
                                name="description"
                                placeholder="Description"
                                value=Signal::derive(move || editor.draft_value(|d| d.description.clone()))
                                on_change=Callback::new(move |v: String| editor.edit_draft(|d| d.description = v))
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="event-category" class="text-xs">"Category"</Label>
                            <NativeSelect
                                id="event-category"
                                placeholder="Select Category"
                                required=true
                                options=category_options
                                value=Signal::derive(move || editor.draft_value(|d| d.category.clone()))
                                on_change=Callback::new(move |v: String| editor.edit_draft(|d| d.category = v))
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="event-publish-date" class="text-xs">"Publish Date"</Label>
                            <Input
                                id="event-publish-date"
                                name="publishDate"
                                r#type="datetime-local"
                                value=Signal::derive(move || editor.draft_value(|d| d.publish_date.clone()))
                                on_change=Callback::new(move |v: String| editor.edit_draft(|d| d.publish_date = v))
                            />
                        </div>

                        <FormActions
                            noun=noun
                            editing=editing
                            saving=editor.saving
                            on_cancel=Callback::new(move |_: ()| editor.cancel())
                        />
                    </form>
                </CardContent>
            </Card>

            <FilterSelect value=editor.filter options=category_options all_label="All Categories" />

            <Show
                when=move || !editor.visible().is_empty()
                fallback=move || view! { <ListPlaceholder plural=plural loading=editor.loading /> }
            >
                <CardList>
                    {move || {
                        let schema = editor.schema();
                        editor
                            .visible()
                            .into_iter()
                            .map(|event| {
                                let label = categories
                                    .items
                                    .with(|items| category_label(items, event.category.as_deref()));
                                let meta = format!("{label} • {}", schema.display_date(&event));
                                let is_deleted = event.is_deleted;
                                let row_class = if is_deleted { "opacity-60" } else { "" };
                                let delete_id = event.id.clone();
                                let hard_id = event.id.clone();
                                let row = StoredValue::new(event.clone());
                                view! {
                                    <CardItem class=row_class>
                                        <div class="flex flex-col gap-1">
                                            <div class="flex items-center gap-2">
                                                <span class="text-lg font-medium text-foreground">{event.title}</span>
                                                <Show when=move || is_deleted fallback=|| ().into_view()>
                                                    <span class="rounded bg-destructive/10 px-2 py-0.5 text-xs font-medium text-destructive">
                                                        "Deleted"
                                                    </span>
                                                </Show>
                                            </div>
                                            <span class="text-sm text-muted-foreground">{meta}</span>
                                            <p class="text-sm text-foreground/80">{event.description}</p>
                                        </div>
                                        <RowActions
                                            on_edit=Callback::new(move |_: ()| row.with_value(|e| editor.begin_edit(e)))
                                            on_delete=Callback::new(move |_: ()| editor.delete(delete_id.clone()))
                                            on_hard_delete=Callback::new(move |_: ()| editor.hard_delete(hard_id.clone()))
                                        />
                                    </CardItem>
                                }
                            })
                            .collect_view()
                    }}
                </CardList>
            </Show>
        </main>
    }
}
