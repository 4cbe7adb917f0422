use crate::components::ui::{Card, CardContent, CardItem, CardList, Input, Label};
use crate::components::{EditorHeading, FilterSelect, FormActions, ListPlaceholder, RowActions};
use crate::models::find_category;
use crate::resource::{Categories, ResourceSchema};
use crate::state::ResourceEditor;
use leptos::prelude::*;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let editor = ResourceEditor::new(Categories);

    Effect::new(move |_| editor.load());

    let editing = Signal::derive(move || editor.is_editing());
    let parent_options = Signal::derive(move || {
        editor
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
                    <EditorHeading noun=Categories::NOUN editing=editing />
                    <form class="grid grid-cols-1 gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="category-name" class="text-xs">"Category Name"</Label>
                            <Input
                                id="category-name"
                                name="name"
                                placeholder="Category Name"
                                required=true
                                value=Signal::derive(move || editor.draft_value(|d| d.name.clone()))
                                on_change=Callback::new(move |v: String| editor.edit_draft(|d| d.name = v))
                            />
                        </div>
                        <FormActions
                            noun=Categories::NOUN
                            editing=editing
                            saving=editor.saving
                            on_cancel=Callback::new(move |_: ()| editor.cancel())
                        />
                    </form>
                </CardContent>
            </Card>

            <FilterSelect value=editor.filter options=parent_options all_label="All Parents" />

            <Show
                when=move || !editor.visible().is_empty()
                fallback=move || view! { <ListPlaceholder plural=Categories::PLURAL loading=editor.loading /> }
            >
                <CardList>
                    {move || {
                        editor
                            .visible()
                            .into_iter()
                            .map(|category| {
                                let parent = editor.items.with(|items| {
                                    find_category(items, category.parent.as_deref()).map(|p| p.name.clone())
                                });
                                let id = category.id.clone();
                                let row = StoredValue::new(category.clone());
                                view! {
                                    <CardItem>
                                        <div class="flex flex-col gap-1">
                                            <span class="text-lg font-medium text-foreground">{category.name}</span>
                                            {parent
                                                .map(|p| {
                                                    view! {
                                                        <span class="text-sm text-muted-foreground">{format!("Parent: {p}")}</span>
                                                    }
                                                })}
                                        </div>
                                        <RowActions
                                            on_edit=Callback::new(move |_: ()| row.with_value(|c| editor.begin_edit(c)))
                                            on_delete=Callback::new(move |_: ()| editor.delete(id.clone()))
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
