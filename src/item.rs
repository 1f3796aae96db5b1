// Inventory record and the request payloads that act on it

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inventory record.
///
/// `description` and `photo` serialize as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// File name inside the cache directory
    pub photo: Option<String>,
}

impl InventoryItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        photo: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            photo,
        }
    }

    /// Path the photo is served from
    pub fn photo_url(&self) -> String {
        format!("/inventory/{}/photo", self.id)
    }

    /// Copy of the item whose description ends with a reference to its photo.
    ///
    /// Items without a photo are returned unchanged. A missing description
    /// becomes just the reference.
    pub fn with_photo_reference(&self) -> Self {
        let mut view = self.clone();
        if self.photo.is_some() {
            let mut description = view.description.take().unwrap_or_default();
            description.push_str(&format!(" (Photo: {})", self.photo_url()));
            view.description = Some(description);
        }
        view
    }
}

/// New item id: the current Unix time in milliseconds.
///
/// Registrations within the same millisecond share an id.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// One body field as sent.
///
/// Form and multipart bodies always carry text. JSON bodies may carry any
/// value, so numbers, booleans and objects are kept rather than rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Json(Value),
}

impl FieldValue {
    /// The value, only if it was sent as a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::Json(_) => None,
        }
    }

    /// The value as stored text; non-string JSON keeps its JSON spelling
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Json(Value::String(text)) => text,
            FieldValue::Json(value) => value.to_string(),
        }
    }

    /// Whether the value counts as given: empty text, `0`, `false` and
    /// `null` do not
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Json(Value::Null) | FieldValue::Json(Value::Bool(false)) => false,
            FieldValue::Json(Value::String(text)) => !text.is_empty(),
            FieldValue::Json(Value::Number(n)) => n.as_f64() != Some(0.0),
            FieldValue::Json(_) => true,
        }
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

/// Text of a field that was given, see [`FieldValue::is_present`]
pub fn present_text(value: Option<FieldValue>) -> Option<String> {
    value.filter(FieldValue::is_present).map(FieldValue::into_text)
}

/// Text fields of `POST /register`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub inventory_name: Option<FieldValue>,
    pub description: Option<FieldValue>,
}

impl RegisterForm {
    /// The item name, if one was given
    pub fn name(&self) -> Option<String> {
        present_text(self.inventory_name.clone())
    }

    /// The description as sent; an empty string is kept
    pub fn description(&self) -> Option<String> {
        self.description.clone().map(FieldValue::into_text)
    }
}

/// Body of `PUT /inventory/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItem {
    pub name: Option<FieldValue>,
    pub description: Option<FieldValue>,
}

impl UpdateItem {
    /// Overwrite the fields that were given
    pub fn apply(self, item: &mut InventoryItem) {
        if let Some(name) = present_text(self.name) {
            item.name = name;
        }
        if let Some(description) = present_text(self.description) {
            item.description = Some(description);
        }
    }
}

/// Body of `POST /search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub id: Option<FieldValue>,
    /// Accepted for form compatibility, never read
    pub has_photo: Option<FieldValue>,
    #[serde(rename = "includePhoto")]
    pub include_photo: Option<FieldValue>,
}

impl SearchQuery {
    /// Id to look up. Ids are strings, so a non-string id matches nothing.
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().and_then(FieldValue::as_text)
    }

    /// Checkbox ticked: the browser sends the literal `on`
    pub fn wants_photo(&self) -> bool {
        self.include_photo.as_ref().and_then(FieldValue::as_text) == Some("on")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(photo: Option<&str>) -> InventoryItem {
        InventoryItem::new(
            "1700000000000",
            "Widget",
            Some("A widget".to_string()),
            photo.map(String::from),
        )
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let item = InventoryItem::new("1", "Bolt", None, None);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": "1", "name": "Bolt", "description": null, "photo": null})
        );
    }

    #[test]
    fn test_photo_reference_on_copy_only() {
        let item = widget(Some("1700000000000.png"));
        let view = item.with_photo_reference();

        assert_eq!(
            view.description.as_deref(),
            Some("A widget (Photo: /inventory/1700000000000/photo)")
        );
        assert_eq!(item.description.as_deref(), Some("A widget"));
    }

    #[test]
    fn test_photo_reference_without_photo_or_description() {
        assert_eq!(widget(None).with_photo_reference(), widget(None));

        let bare = InventoryItem::new("9", "Nut", None, Some("9.jpg".to_string()));
        assert_eq!(
            bare.with_photo_reference().description.as_deref(),
            Some(" (Photo: /inventory/9/photo)")
        );
    }

    #[test]
    fn test_update_skips_empty_values() {
        let mut item = widget(None);
        UpdateItem {
            name: Some(String::new().into()),
            description: Some("Shiny".to_string().into()),
        }
        .apply(&mut item);

        assert_eq!(item.name, "Widget");
        assert_eq!(item.description.as_deref(), Some("Shiny"));
    }

    #[test]
    fn test_update_from_json_values() {
        let mut item = widget(None);
        let update: UpdateItem =
            serde_json::from_value(serde_json::json!({"name": 42, "description": false})).unwrap();
        update.apply(&mut item);

        assert_eq!(item.name, "42");
        assert_eq!(item.description.as_deref(), Some("A widget"));

        let update: UpdateItem =
            serde_json::from_value(serde_json::json!({"name": 0, "description": null})).unwrap();
        update.apply(&mut item);
        assert_eq!(item.name, "42");
    }

    #[test]
    fn test_register_form_fields() {
        let form: RegisterForm = serde_urlencoded::from_str("inventory_name=&description=").unwrap();
        assert_eq!(form.name(), None);
        assert_eq!(form.description().as_deref(), Some(""));

        let form: RegisterForm =
            serde_json::from_value(serde_json::json!({"inventory_name": 7, "description": true}))
                .unwrap();
        assert_eq!(form.name().as_deref(), Some("7"));
        assert_eq!(form.description().as_deref(), Some("true"));
    }

    #[test]
    fn test_search_id_must_be_text() {
        let query: SearchQuery =
            serde_json::from_value(serde_json::json!({"id": 1700000000000u64, "includePhoto": true}))
                .unwrap();
        assert_eq!(query.id(), None);
        assert!(!query.wants_photo());

        let query: SearchQuery =
            serde_urlencoded::from_str("id=1700000000000&includePhoto=on").unwrap();
        assert_eq!(query.id(), Some("1700000000000"));
        assert!(query.wants_photo());
    }

    #[test]
    fn test_search_checkbox() {
        let mut query = SearchQuery::default();
        assert!(!query.wants_photo());

        query.include_photo = Some("true".to_string().into());
        assert!(!query.wants_photo());

        query.include_photo = Some("on".to_string().into());
        assert!(query.wants_photo());
    }

    #[test]
    fn test_generate_id_is_millis() {
        let id = generate_id();
        assert!(id.parse::<i64>().unwrap() > 1_600_000_000_000);
    }
}
