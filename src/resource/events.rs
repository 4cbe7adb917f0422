use super::{DraftError, ResourceSchema, SoftDeletable};
use crate::models::Event;
use crate::util::{display_local, format_instant, from_input_value, to_input_value};
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Events collection; `tz` is the zone the datetime-local input is read in
/// (the browser's own zone in the app).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Events<Tz = Local> {
    tz: Tz,
}

impl Events<Local> {
    pub(crate) fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> Events<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    #[allow(dead_code)]
    pub(crate) fn in_zone(tz: Tz) -> Self {
        Self { tz }
    }

    pub(crate) fn display_date(&self, event: &Event) -> String {
        display_local(event.publish_date.as_ref(), &self.tz)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EventDraft {
    pub title: String,
    pub description: String,
    /// Category id.
    pub category: String,
    /// datetime-local value, e.g. `2025-06-01T20:00`.
    pub publish_date: String,
}

impl<Tz> ResourceSchema for Events<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Display,
{
    type Item = Event;
    type Draft = EventDraft;

    const NOUN: &'static str = "Event";
    const PLURAL: &'static str = "events";
    const DELETE_PROMPT: &'static str = "Are you sure you want to delete this event?";

    fn collection_path(&self) -> &'static str {
        "/events"
    }

    // Tombstoned events stay listed until hard-deleted.
    fn list_path(&self) -> String {
        format!("{}?showAll=true", self.collection_path())
    }

    fn item_id(item: &Event) -> &str {
        &item.id
    }

    fn filter_key(item: &Event) -> Option<&str> {
        item.category.as_deref()
    }

    fn draft_from(&self, item: &Event) -> EventDraft {
        EventDraft {
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category.clone().unwrap_or_default(),
            publish_date: to_input_value(item.publish_date.as_ref(), &self.tz),
        }
    }

    fn payload(&self, draft: &EventDraft) -> Result<serde_json::Value, DraftError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(DraftError::required("title", "Title"));
        }
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(DraftError::required("category", "Category"));
        }

        let publish_date = from_input_value(&draft.publish_date, &self.tz).map_err(|e| DraftError {
            field: "publish_date",
            message: e.to_string(),
        })?;

        Ok(serde_json::json!({
            "title": title,
            "description": draft.description.trim(),
            "category": category,
            "publishDate": publish_date.as_ref().map(format_instant),
        }))
    }
}

impl<Tz> SoftDeletable for Events<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Display,
{
}
