//! The list + inline editor + delete pattern shared by every managed
//! collection. A [`ResourceSchema`] describes one collection (field set,
//! endpoints, filter key); everything else is written once against it.

mod categories;
mod events;
mod flow;

pub(crate) use categories::{Categories, CategoryDraft};
pub(crate) use events::{EventDraft, Events};
pub(crate) use flow::{delete, hard_delete, load, submit, SubmitError};

use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DraftError {
    pub field: &'static str,
    pub message: String,
}

impl DraftError {
    pub(crate) fn required(field: &'static str, label: &str) -> Self {
        Self {
            field,
            message: format!("{label} is required"),
        }
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub(crate) trait ResourceSchema: Clone + Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + PartialEq + Send + Sync + 'static;
    type Draft: Clone + Default + PartialEq + Send + Sync + 'static;

    /// Capitalised singular used in notices, e.g. "Category".
    const NOUN: &'static str;
    /// Lowercase plural, e.g. "categories".
    const PLURAL: &'static str;
    const DELETE_PROMPT: &'static str;

    fn collection_path(&self) -> &'static str;

    fn list_path(&self) -> String {
        self.collection_path().to_string()
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), urlencoding::encode(id))
    }

    fn item_id(item: &Self::Item) -> &str;

    /// Related id the list can be filtered by.
    fn filter_key(item: &Self::Item) -> Option<&str>;

    /// Form values for editing `item` in place.
    fn draft_from(&self, item: &Self::Item) -> Self::Draft;

    fn payload(&self, draft: &Self::Draft) -> Result<serde_json::Value, DraftError>;
}

/// Collections whose plain delete is a tombstone and which expose a
/// separate irreversible delete.
pub(crate) trait SoftDeletable: ResourceSchema {
    fn hard_delete_path(&self, id: &str) -> String {
        format!("{}/hard", self.item_path(id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum EditorMode {
    #[default]
    Create,
    Edit {
        id: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct EditorState<D> {
    pub mode: EditorMode,
    pub draft: D,
}

impl<D: Default> EditorState<D> {
    pub(crate) fn begin_edit(&mut self, id: impl Into<String>, draft: D) {
        self.mode = EditorMode::Edit { id: id.into() };
        self.draft = draft;
    }

    /// Back to create mode with an empty draft.
    pub(crate) fn reset(&mut self) {
        self.mode = EditorMode::Create;
        self.draft = D::default();
    }

    pub(crate) fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Create => None,
            EditorMode::Edit { id } => Some(id),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }
}

/// Client-side filter over an already loaded list. An empty filter keeps
/// everything.
pub(crate) fn filter_items<S: ResourceSchema>(items: &[S::Item], filter: &str) -> Vec<S::Item> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| S::filter_key(item) == Some(filter))
        .cloned()
        .collect()
}
