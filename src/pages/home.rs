use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="p-6">
            <h2 class="text-lg font-medium text-foreground">"Welcome to the Home Page!"</h2>
            <p class="mt-2 text-muted-foreground">
                "Use the navigation above to manage events and categories."
            </p>
        </main>
    }
}
