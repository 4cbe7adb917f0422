use super::{DraftError, EditorMode, EditorState, ResourceSchema, SoftDeletable};
use crate::api::{ApiError, ApiResult, Gateway, Method};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Saved {
    Created,
    Updated,
}

impl Saved {
    pub(crate) fn message(self, noun: &str) -> String {
        match self {
            Saved::Created => format!("{noun} added successfully"),
            Saved::Updated => format!("{noun} updated successfully"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum SubmitError {
    Invalid(DraftError),
    Api(ApiError),
}

impl SubmitError {
    pub(crate) fn user_message(&self, fallback: &str) -> String {
        match self {
            SubmitError::Invalid(e) => e.message.clone(),
            SubmitError::Api(e) => e.user_message(fallback),
        }
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, SubmitError::Api(e) if e.is_unauthorized())
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(e) => write!(f, "{e}"),
            SubmitError::Api(e) => write!(f, "{e}"),
        }
    }
}

/// Fetches the whole collection.
pub(crate) async fn load<S, G>(schema: &S, gateway: &G) -> ApiResult<Vec<S::Item>>
where
    S: ResourceSchema,
    G: Gateway,
{
    let data = gateway.send(Method::GET, &schema.list_path(), None).await?;
    if data.is_null() {
        return Ok(vec![]);
    }
    serde_json::from_value(data).map_err(ApiError::parse)
}

/// Creates or updates depending on the editor mode. The caller owns the
/// state and decides what to do with it afterwards.
pub(crate) async fn submit<S, G>(
    schema: &S,
    gateway: &G,
    state: &EditorState<S::Draft>,
) -> Result<Saved, SubmitError>
where
    S: ResourceSchema,
    G: Gateway,
{
    let body = schema.payload(&state.draft).map_err(SubmitError::Invalid)?;

    match &state.mode {
        EditorMode::Create => {
            gateway
                .send(Method::POST, schema.collection_path(), Some(body))
                .await
                .map_err(SubmitError::Api)?;
            Ok(Saved::Created)
        }
        EditorMode::Edit { id } => {
            gateway
                .send(Method::PUT, &schema.item_path(id), Some(body))
                .await
                .map_err(SubmitError::Api)?;
            Ok(Saved::Updated)
        }
    }
}

pub(crate) async fn delete<S, G>(schema: &S, gateway: &G, id: &str) -> ApiResult<()>
where
    S: ResourceSchema,
    G: Gateway,
{
    gateway
        .send(Method::DELETE, &schema.item_path(id), None)
        .await
        .map(|_| ())
}

pub(crate) async fn hard_delete<S, G>(schema: &S, gateway: &G, id: &str) -> ApiResult<()>
where
    S: SoftDeletable,
    G: Gateway,
{
    gateway
        .send(Method::DELETE, &schema.hard_delete_path(id), None)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category_label;
    use crate::resource::{Categories, CategoryDraft, EventDraft, Events};
    use chrono::FixedOffset;
    use futures::executor::block_on;
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the REST backend: plain deletes tombstone,
    /// `GET /categories` hides tombstones, `GET /events?showAll=true` does not.
    #[derive(Default)]
    struct FakeBackend {
        categories: RefCell<Vec<Value>>,
        events: RefCell<Vec<Value>>,
        calls: RefCell<Vec<String>>,
        next_id: Cell<u32>,
        fail_next: RefCell<Option<(u16, String)>>,
    }

    impl FakeBackend {
        fn new_id(&self, prefix: &str) -> String {
            let n = self.next_id.get() + 1;
            self.next_id.set(n);
            format!("{prefix}{n}")
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        fn fail_next(&self, status: u16, body: &str) {
            *self.fail_next.borrow_mut() = Some((status, body.to_string()));
        }

        fn live_category(&self, id: &str) -> Option<Value> {
            self.categories
                .borrow()
                .iter()
                .find(|c| c["_id"] == id && c["isDeleted"] == false)
                .cloned()
        }

        fn set_deleted(list: &RefCell<Vec<Value>>, id: &str) -> ApiResult<Value> {
            let mut list = list.borrow_mut();
            let item = list
                .iter_mut()
                .find(|v| v["_id"] == id)
                .ok_or_else(|| ApiError::from_status(404, r#"{"error":"Not found"}"#))?;
            item["isDeleted"] = json!(true);
            Ok(json!({ "message": "deleted" }))
        }
    }

    impl Gateway for FakeBackend {
        async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
            self.calls.borrow_mut().push(format!("{} {}", method.as_str(), path));

            if let Some((status, body)) = self.fail_next.borrow_mut().take() {
                return Err(ApiError::from_status(status, &body));
            }

            let (route, query) = path.split_once('?').unwrap_or((path, ""));
            let show_all = query.contains("showAll=true");
            let segments: Vec<&str> = route.trim_matches('/').split('/').collect();
            let body = body.unwrap_or(Value::Null);

            match (method.as_str(), segments.as_slice()) {
                ("GET", ["categories"]) => Ok(Value::Array(
                    self.categories
                        .borrow()
                        .iter()
                        .filter(|c| c["isDeleted"] == false)
                        .cloned()
                        .collect(),
                )),
                ("POST", ["categories"]) => {
                    let created = json!({
                        "_id": self.new_id("c"),
                        "name": body["name"],
                        "parent": null,
                        "isDeleted": false,
                    });
                    self.categories.borrow_mut().push(created.clone());
                    Ok(created)
                }
                ("PUT", ["categories", id]) => {
                    let mut list = self.categories.borrow_mut();
                    let item = list
                        .iter_mut()
                        .find(|c| c["_id"] == *id)
                        .ok_or_else(|| ApiError::from_status(404, r#"{"error":"Not found"}"#))?;
                    item["name"] = body["name"].clone();
                    Ok(item.clone())
                }
                ("DELETE", ["categories", id]) => Self::set_deleted(&self.categories, id),
                ("GET", ["events"]) => Ok(Value::Array(
                    self.events
                        .borrow()
                        .iter()
                        .filter(|e| show_all || e["isDeleted"] == false)
                        .map(|e| {
                            // Populate the relation the way the backend sometimes does.
                            let mut e = e.clone();
                            let cat_id = e["category"].as_str().unwrap_or_default().to_string();
                            if let Some(cat) = self.live_category(&cat_id) {
                                e["category"] = json!({ "_id": cat["_id"], "name": cat["name"] });
                            }
                            e
                        })
                        .collect(),
                )),
                ("POST", ["events"]) => {
                    let cat_id = body["category"].as_str().unwrap_or_default();
                    if self.live_category(cat_id).is_none() {
                        return Err(ApiError::from_status(400, r#"{"error":"Invalid category"}"#));
                    }
                    let mut created = body.clone();
                    created["_id"] = json!(self.new_id("e"));
                    created["isDeleted"] = json!(false);
                    self.events.borrow_mut().push(created.clone());
                    Ok(created)
                }
                ("PUT", ["events", id]) => {
                    let mut list = self.events.borrow_mut();
                    let item = list
                        .iter_mut()
                        .find(|e| e["_id"] == *id)
                        .ok_or_else(|| ApiError::from_status(404, r#"{"error":"Not found"}"#))?;
                    for key in ["title", "description", "category", "publishDate"] {
                        item[key] = body[key].clone();
                    }
                    Ok(item.clone())
                }
                ("DELETE", ["events", id]) => Self::set_deleted(&self.events, id),
                ("DELETE", ["events", id, "hard"]) => {
                    self.events.borrow_mut().retain(|e| e["_id"] != *id);
                    Ok(Value::Null)
                }
                _ => Err(ApiError::from_status(404, r#"{"error":"Not found"}"#)),
            }
        }
    }

    fn events() -> Events<FixedOffset> {
        Events::in_zone(FixedOffset::east_opt(2 * 3600).expect("valid offset"))
    }

    fn create_category(backend: &FakeBackend, name: &str) -> String {
        let mut state = EditorState::<CategoryDraft>::default();
        state.draft.name = name.to_string();
        let saved = block_on(submit(&Categories, backend, &state)).expect("create category");
        assert_eq!(saved, Saved::Created);

        let all = block_on(load(&Categories, backend)).expect("load categories");
        all.into_iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .expect("created category is listed")
    }

    fn concert(category: &str) -> EditorState<EventDraft> {
        EditorState {
            mode: Default::default(),
            draft: EventDraft {
                title: "Concert".to_string(),
                description: "Live show".to_string(),
                category: category.to_string(),
                publish_date: "2025-06-01T20:00".to_string(),
            },
        }
    }

    #[test]
    fn test_created_category_appears_in_next_load() {
        let backend = FakeBackend::default();
        let music_id = create_category(&backend, "Music");

        let all = block_on(load(&Categories, &backend)).expect("load");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, music_id);
        assert_eq!(all[0].name, "Music");
        assert!(all[0].parent.is_none());
    }

    #[test]
    fn test_event_scenario_soft_then_hard_delete() {
        let backend = FakeBackend::default();
        let music_id = create_category(&backend, "Music");
        let schema = events();

        let saved =
            block_on(submit(&schema, &backend, &concert(&music_id))).expect("create event");
        assert_eq!(
            saved.message(<Events<FixedOffset> as ResourceSchema>::NOUN),
            "Event added successfully"
        );

        let categories = block_on(load(&Categories, &backend)).expect("load categories");
        let listed = block_on(load(&schema, &backend)).expect("load events");
        assert_eq!(listed.len(), 1);
        let ev = &listed[0];
        assert_eq!(ev.title, "Concert");
        // The backend populated the relation; it still normalises to the id.
        assert_eq!(ev.category.as_deref(), Some(music_id.as_str()));
        assert_eq!(category_label(&categories, ev.category.as_deref()), "Music");
        assert_eq!(schema.display_date(ev), "2025-06-01 20:00");

        // Soft delete: the show-all loader still lists it.
        block_on(delete(&schema, &backend, &ev.id)).expect("soft delete");
        let after_soft = block_on(load(&schema, &backend)).expect("load events");
        assert_eq!(after_soft.len(), 1);
        assert!(after_soft[0].is_deleted);

        // Hard delete: gone even though the loader asks for everything.
        block_on(hard_delete(&schema, &backend, &ev.id)).expect("hard delete");
        let after_hard = block_on(load(&schema, &backend)).expect("load events");
        assert!(after_hard.is_empty());

        assert!(backend
            .calls
            .borrow()
            .iter()
            .any(|c| c == &format!("DELETE /events/{}/hard", ev.id)));
    }

    #[test]
    fn test_soft_deleted_category_disappears_from_default_load() {
        let backend = FakeBackend::default();
        let music_id = create_category(&backend, "Music");

        block_on(delete(&Categories, &backend, &music_id)).expect("delete");
        let all = block_on(load(&Categories, &backend)).expect("load");
        assert!(all.is_empty());
    }

    #[test]
    fn test_update_in_place_uses_item_endpoint() {
        let backend = FakeBackend::default();
        let music_id = create_category(&backend, "Music");
        let all = block_on(load(&Categories, &backend)).expect("load");

        let mut state = EditorState::<CategoryDraft>::default();
        state.begin_edit(music_id.clone(), Categories.draft_from(&all[0]));
        assert_eq!(state.draft.name, "Music");
        state.draft.name = "Live Music".to_string();

        let saved = block_on(submit(&Categories, &backend, &state)).expect("update");
        assert_eq!(saved, Saved::Updated);
        assert_eq!(
            backend.calls.borrow().last().map(String::as_str),
            Some(format!("PUT /categories/{music_id}").as_str())
        );

        let all = block_on(load(&Categories, &backend)).expect("load");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Live Music");
    }

    #[test]
    fn test_cancel_issues_no_request() {
        let backend = FakeBackend::default();
        create_category(&backend, "Music");
        let all = block_on(load(&Categories, &backend)).expect("load");
        let before = backend.call_count();

        let mut state = EditorState::<CategoryDraft>::default();
        state.begin_edit(all[0].id.clone(), Categories.draft_from(&all[0]));
        state.reset();

        assert_eq!(backend.call_count(), before);
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_server_error_is_surfaced_and_draft_kept() {
        let backend = FakeBackend::default();
        let schema = events();
        let state = concert("missing-category");

        let err = block_on(submit(&schema, &backend, &state)).unwrap_err();
        assert_eq!(err.user_message("Failed to save event"), "Invalid category");
        assert!(!err.is_unauthorized());
        // The caller's state is untouched.
        assert_eq!(state.draft.title, "Concert");
        assert!(block_on(load(&schema, &backend)).expect("load").is_empty());
    }

    #[test]
    fn test_generic_fallback_without_server_message() {
        let backend = FakeBackend::default();
        backend.fail_next(500, "");
        let mut state = EditorState::<CategoryDraft>::default();
        state.draft.name = "Music".to_string();

        let err = block_on(submit(&Categories, &backend, &state)).unwrap_err();
        assert_eq!(err.user_message("Failed to save category"), "Failed to save category");
    }

    #[test]
    fn test_invalid_draft_never_reaches_backend() {
        let backend = FakeBackend::default();
        let state = EditorState::<CategoryDraft>::default();

        let err = block_on(submit(&Categories, &backend, &state)).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_unauthorized_load() {
        let backend = FakeBackend::default();
        backend.fail_next(401, r#"{"error":"Token expired"}"#);

        let err = block_on(load(&Categories, &backend)).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Token expired");
    }
}
