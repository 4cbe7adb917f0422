use crate::app::{guard, AppRoute, GuardOutcome};
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::state::{AppContext, NoticeKind};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

/// Persistent header on every protected page.
#[component]
pub fn NavShell() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());

    let go = move |route: AppRoute| {
        navigate.with_value(|nav| nav(route.path(), Default::default()));
    };

    let on_logout = move |_| {
        app_state.sign_out();
        go(AppRoute::Login);
    };

    view! {
        <header class="flex items-center justify-between border-b bg-card px-6 py-4 shadow-sm">
            <h1
                class="cursor-pointer text-xl font-semibold text-foreground"
                on:click=move |_| go(AppRoute::Home)
            >
                "Event Dashboard"
            </h1>
            <nav class="flex items-center gap-2">
                <Button size=ButtonSize::Sm on:click=move |_| go(AppRoute::Events)>"Events"</Button>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Outline
                    on:click=move |_| go(AppRoute::Categories)
                >
                    "Categories"
                </Button>
                <Button size=ButtonSize::Sm variant=ButtonVariant::Destructive on:click=on_logout>
                    "Logout"
                </Button>
            </nav>
        </header>
    }
}

/// Renders `children` under the header only while a token is stored;
/// otherwise redirects before the page (and its fetches) ever mounts.
#[component]
pub fn SessionGuard(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    move || match guard(route, app_state.token().as_deref()) {
        GuardOutcome::Render => view! {
            <div class="min-h-screen bg-background">
                <NavShell />
                {children.with_value(|c| c())}
            </div>
        }
        .into_any(),
        GuardOutcome::Redirect(to) => view! { <Redirect path=to.path() /> }.into_any(),
    }
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let notices = expect_context::<AppContext>().0.notices;

    view! {
        <div class="fixed right-4 top-4 z-50 w-80">
            {move || {
                notices
                    .current
                    .get()
                    .map(|n| {
                        let (border, text) = match n.kind {
                            NoticeKind::Success => ("border-emerald-500/40", "text-emerald-700"),
                            NoticeKind::Error => ("border-destructive/30", "text-destructive"),
                        };
                        view! {
                            <div role="status" class="cursor-pointer" on:click=move |_| notices.dismiss()>
                                <Alert class=format!("bg-background shadow-md {border}")>
                                    <AlertDescription class=text>{n.message}</AlertDescription>
                                </Alert>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
