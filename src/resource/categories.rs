use super::{DraftError, ResourceSchema};
use crate::models::Category;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Categories;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CategoryDraft {
    pub name: String,
}

impl ResourceSchema for Categories {
    type Item = Category;
    type Draft = CategoryDraft;

    const NOUN: &'static str = "Category";
    const PLURAL: &'static str = "categories";
    const DELETE_PROMPT: &'static str = "Delete this category?";

    fn collection_path(&self) -> &'static str {
        "/categories"
    }

    fn item_id(item: &Category) -> &str {
        &item.id
    }

    fn filter_key(item: &Category) -> Option<&str> {
        item.parent.as_deref()
    }

    fn draft_from(&self, item: &Category) -> CategoryDraft {
        CategoryDraft {
            name: item.name.clone(),
        }
    }

    fn payload(&self, draft: &CategoryDraft) -> Result<serde_json::Value, DraftError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DraftError::required("name", "Category name"));
        }
        Ok(serde_json::json!({ "name": name }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_name_only() {
        let draft = CategoryDraft {
            name: "  Music ".to_string(),
        };
        assert_eq!(
            Categories.payload(&draft),
            Ok(serde_json::json!({ "name": "Music" }))
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = Categories.payload(&CategoryDraft::default()).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.to_string(), "Category name is required");
    }

    #[test]
    fn test_draft_copies_current_name() {
        let c = Category {
            id: "c1".to_string(),
            name: "Music".to_string(),
            parent: Some("c0".to_string()),
        };
        assert_eq!(
            Categories.draft_from(&c),
            CategoryDraft {
                name: "Music".to_string()
            }
        );
    }
}
