use crate::util::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Category as returned by `GET /categories`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "CategoryWire")]
pub(crate) struct Category {
    pub id: String,
    pub name: String,
    /// Parent category id. The backend may populate the relation.
    pub parent: Option<String>,
}

/// Event as returned by `GET /events?showAll=true`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "EventWire")]
pub(crate) struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Category id, whether the backend sent a bare id or the populated object.
    pub category: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    /// Soft-delete tombstone; only visible because the list asks for `showAll`.
    pub is_deleted: bool,
}

/// Record identity. Documents carry `_id`; some serializers add a virtual
/// `id` next to it, or send only `id`. `_id` wins when both are present.
#[derive(Deserialize, Default)]
struct RecordKey {
    #[serde(rename = "_id", default)]
    underscore: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

impl RecordKey {
    fn resolve(self) -> Option<String> {
        self.underscore
            .and_then(scalar_id)
            .or_else(|| self.id.and_then(scalar_id))
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Deserialize)]
struct CategoryWire {
    #[serde(flatten)]
    key: RecordKey,
    #[serde(default, deserialize_with = "nullable_string")]
    name: String,
    #[serde(default, deserialize_with = "relation_id")]
    parent: Option<String>,
}

impl TryFrom<CategoryWire> for Category {
    type Error = String;

    fn try_from(wire: CategoryWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.key.resolve().ok_or("category without `_id`")?,
            name: wire.name,
            parent: wire.parent,
        })
    }
}

#[derive(Deserialize)]
struct EventWire {
    #[serde(flatten)]
    key: RecordKey,
    #[serde(default, deserialize_with = "nullable_string")]
    title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    description: String,
    #[serde(default, deserialize_with = "relation_id")]
    category: Option<String>,
    #[serde(rename = "publishDate", default, deserialize_with = "instant")]
    publish_date: Option<DateTime<Utc>>,
    #[serde(rename = "isDeleted", alias = "deleted", default)]
    is_deleted: bool,
}

impl TryFrom<EventWire> for Event {
    type Error = String;

    fn try_from(wire: EventWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.key.resolve().ok_or("event without `_id`")?,
            title: wire.title,
            description: wire.description,
            category: wire.category,
            publish_date: wire.publish_date,
            is_deleted: wire.is_deleted,
        })
    }
}

/// Wire shapes of a relation field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RelationRepr {
    Id(String),
    Populated(RecordKey),
    Other(serde_json::Value),
}

fn scalar_id(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RelationRepr {
    fn into_id(self) -> Option<String> {
        let id = match self {
            RelationRepr::Id(id) => Some(id),
            RelationRepr::Populated(key) => key.resolve(),
            RelationRepr::Other(v) => scalar_id(v),
        };
        id.filter(|s| !s.trim().is_empty())
    }
}

fn relation_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let repr = Option::<RelationRepr>::deserialize(d)?;
    Ok(repr.and_then(RelationRepr::into_id))
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

// A malformed date must not take the whole collection down with it.
fn instant<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse_instant(&s),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

pub(crate) fn find_category<'a>(
    categories: &'a [Category],
    id: Option<&str>,
) -> Option<&'a Category> {
    let id = id?;
    categories.iter().find(|c| c.id == id)
}

pub(crate) fn category_label(categories: &[Category], id: Option<&str>) -> String {
    find_category(categories, id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "No Category".to_string())
}
