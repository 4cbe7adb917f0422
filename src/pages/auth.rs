use crate::app::AppRoute;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Input, Label, Spinner,
};
use crate::state::AppContext;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
fn CredentialFields(username: RwSignal<String>, password: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5">
            <Label html_for="username" class="text-xs">"Username"</Label>
            <Input
                id="username"
                name="username"
                placeholder="Username"
                value=username
                on_change=Callback::new(move |v: String| username.set(v))
                required=true
                class="h-8 text-sm"
            />
        </div>

        <div class="flex flex-col gap-1.5">
            <Label html_for="password" class="text-xs">"Password"</Label>
            <Input
                id="password"
                name="password"
                r#type="password"
                placeholder="••••••••"
                value=password
                on_change=Callback::new(move |v: String| password.set(v))
                required=true
                class="h-8 text-sm"
            />
        </div>
    }
}

#[component]
fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            {move || {
                error.get().map(|e| {
                    view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                        </Alert>
                    }
                })
            }}
        </Show>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.login(&username_val, &password_val).await {
                Ok(token) => {
                    app_state.sign_in(token);
                    navigate.with_value(|nav| nav(AppRoute::Home.path(), Default::default()));
                }
                Err(e) => {
                    error!("Login error: {}", e);
                    error.try_set(Some(e.user_message("Login failed")));
                }
            }
            loading.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Welcome Back"</CardTitle>
                        <CardDescription class="text-xs">"Sign in to manage events and categories."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <CredentialFields username=username password=password />
                            <FormError error=error />

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Login" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Don't have an account? "
                                <a class="text-primary underline underline-offset-4" href=AppRoute::Register.path()>
                                    "Register here"
                                </a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let success: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>().0;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.register(&username_val, &password_val).await {
                Ok(_) => {
                    // No token on register; the user signs in explicitly.
                    success.try_set(true);
                }
                Err(e) => {
                    error!("Registration error: {}", e);
                    error.try_set(Some(e.user_message("Registration failed")));
                }
            }
            loading.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Create Account"</CardTitle>
                        <CardDescription class="text-xs">"Pick a username and password."</CardDescription>
                    </CardHeader>
                    <CardContent>
                        <Show
                            when=move || !success.get()
                            fallback=move || view! {
                                <Alert>
                                    <AlertDescription class="text-xs">
                                        "Account created. You can now "
                                        <a class="text-primary underline underline-offset-4" href=AppRoute::Login.path()>"log in"</a>
                                        "."
                                    </AlertDescription>
                                </Alert>
                            }
                        >
                            <form class="flex flex-col gap-3" on:submit=on_submit>
                                <CredentialFields username=username password=password />
                                <FormError error=error />

                                <Button
                                    class="w-full"
                                    size=ButtonSize::Sm
                                    attr:disabled=move || loading.get()
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || loading.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || if loading.get() { "Creating..." } else { "Register" }}
                                    </span>
                                </Button>

                                <div class="pt-1 text-xs text-muted-foreground">
                                    "Already have an account? "
                                    <a class="text-primary underline underline-offset-4" href=AppRoute::Login.path()>
                                        "Login here"
                                    </a>
                                </div>
                            </form>
                        </Show>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}
