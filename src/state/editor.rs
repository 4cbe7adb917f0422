use super::{AppContext, AppState};
use crate::api::ApiError;
use crate::resource::{self, filter_items, EditorState, ResourceSchema, SoftDeletable, SubmitError};
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// What the page does about a failed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Failure {
    /// The backend no longer accepts the token.
    ExpireSession,
    Notify(String),
}

impl Failure {
    pub(crate) fn of_load<S: ResourceSchema>(e: &ApiError) -> Self {
        if e.is_unauthorized() {
            return Failure::ExpireSession;
        }
        Failure::Notify(format!("Failed to fetch {}", S::PLURAL))
    }

    pub(crate) fn of_save<S: ResourceSchema>(e: &SubmitError) -> Self {
        if e.is_unauthorized() {
            return Failure::ExpireSession;
        }
        let fallback = format!("Failed to save {}", S::NOUN.to_lowercase());
        Failure::Notify(e.user_message(&fallback))
    }

    pub(crate) fn of_delete<S: ResourceSchema>(e: &ApiError) -> Self {
        if e.is_unauthorized() {
            return Failure::ExpireSession;
        }
        Failure::Notify(format!("Failed to delete {}", S::NOUN.to_lowercase()))
    }
}

/// A load result is applied only if no newer load was issued since and the
/// editor still exists (`latest` is `None` once its signals are disposed).
pub(crate) fn is_current_load(latest: Option<u64>, issued: u64) -> bool {
    latest == Some(issued)
}

/// Reactive instance of the list + inline editor for one collection.
///
/// Every mutation is followed by a full reload; nothing is patched locally.
/// Responses that arrive after the owning page is gone are dropped.
pub(crate) struct ResourceEditor<S: ResourceSchema> {
    schema: StoredValue<S>,
    pub items: RwSignal<Vec<S::Item>>,
    pub state: RwSignal<EditorState<S::Draft>>,
    /// Related id to filter by; empty means no filter.
    pub filter: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    load_seq: RwSignal<u64>,
    app: AppState,
}

impl<S: ResourceSchema> Clone for ResourceEditor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ResourceSchema> Copy for ResourceEditor<S> {}

impl<S: ResourceSchema> ResourceEditor<S> {
    pub fn new(schema: S) -> Self {
        let app = expect_context::<AppContext>().0;
        Self {
            schema: StoredValue::new(schema),
            items: RwSignal::new(vec![]),
            state: RwSignal::new(EditorState::default()),
            filter: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            load_seq: RwSignal::new(0),
            app,
        }
    }

    pub fn schema(&self) -> S {
        self.schema.get_value()
    }

    pub fn is_editing(&self) -> bool {
        self.state.with(|s| s.is_editing())
    }

    /// Loaded items passing the current filter.
    pub fn visible(&self) -> Vec<S::Item> {
        let filter = self.filter.get();
        self.items.with(|items| filter_items::<S>(items, &filter))
    }

    pub fn draft_value(&self, field: impl Fn(&S::Draft) -> String) -> String {
        self.state.with(|s| field(&s.draft))
    }

    pub fn edit_draft(&self, f: impl FnOnce(&mut S::Draft)) {
        self.state.update(|s| f(&mut s.draft));
    }

    pub fn begin_edit(&self, item: &S::Item) {
        let draft = self.schema.with_value(|s| s.draft_from(item));
        let id = S::item_id(item).to_string();
        self.state.update(|s| s.begin_edit(id, draft));
        window().scroll_to_with_x_and_y(0.0, 0.0);
    }

    pub fn cancel(&self) {
        self.state.update(|s| s.reset());
    }

    pub fn load(&self) {
        let Some(seq) = self.load_seq.try_update(|n| {
            *n = n.wrapping_add(1);
            *n
        }) else {
            return;
        };
        self.loading.try_set(true);

        let this = *self;
        let client = self.app.api_client.get_untracked();
        let Some(schema) = self.schema.try_get_value() else {
            return;
        };

        spawn_local(async move {
            let result = resource::load(&schema, &client).await;

            if !is_current_load(this.load_seq.try_get_untracked(), seq) {
                return;
            }

            match result {
                Ok(items) => {
                    log!("loaded {} {}", items.len(), S::PLURAL);
                    this.items.try_set(items);
                }
                Err(e) => {
                    error!("Error fetching {}: {}", S::PLURAL, e);
                    this.handle(Failure::of_load::<S>(&e));
                }
            }
            this.loading.try_set(false);
        });
    }

    pub fn submit(&self) {
        if self.saving.get_untracked() {
            return;
        }
        self.saving.set(true);

        let this = *self;
        let client = self.app.api_client.get_untracked();
        let schema = self.schema.get_value();
        let state = self.state.get_untracked();

        spawn_local(async move {
            match resource::submit(&schema, &client, &state).await {
                Ok(saved) => {
                    this.app.notices.success(saved.message(S::NOUN));
                    this.state.try_update(|s| s.reset());
                    this.load();
                }
                Err(e) => {
                    error!("Error saving {}: {}", S::NOUN.to_lowercase(), e);
                    this.handle(Failure::of_save::<S>(&e));
                }
            }
            this.saving.try_set(false);
        });
    }

    pub fn delete(&self, id: String) {
        if !confirm(S::DELETE_PROMPT) {
            return;
        }

        let this = *self;
        let client = self.app.api_client.get_untracked();
        let schema = self.schema.get_value();

        spawn_local(async move {
            match resource::delete(&schema, &client, &id).await {
                Ok(()) => {
                    this.app.notices.success(format!("{} deleted", S::NOUN));
                    this.load();
                }
                Err(e) => this.report_delete_failure(&id, &e),
            }
        });
    }

    fn report_delete_failure(&self, id: &str, e: &ApiError) {
        error!("Error deleting {} {}: {}", S::NOUN.to_lowercase(), id, e);
        self.handle(Failure::of_delete::<S>(e));
    }

    fn handle(&self, failure: Failure) {
        match failure {
            Failure::ExpireSession => self.app.expire_session(),
            Failure::Notify(message) => self.app.notices.error(message),
        }
    }
}

impl<S: SoftDeletable> ResourceEditor<S> {
    /// Irreversible delete; the show-all list stops returning the item.
    pub fn hard_delete(&self, id: String) {
        if !confirm(S::DELETE_PROMPT) {
            return;
        }

        let this = *self;
        let client = self.app.api_client.get_untracked();
        let schema = self.schema.get_value();

        spawn_local(async move {
            match resource::hard_delete(&schema, &client, &id).await {
                Ok(()) => {
                    this.app.notices.success(format!("{} hard deleted", S::NOUN));
                    this.load();
                }
                Err(e) => this.report_delete_failure(&id, &e),
            }
        });
    }
}

fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
