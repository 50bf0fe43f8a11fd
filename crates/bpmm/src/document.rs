//! Document fragment serialization.
//!
//! Each element serializes to one flat JSON object:
//!
//! | field | type | meaning |
//! |---|---|---|
//! | `category` | integer | [`Category`] code |
//! | `x`, `y` | number | position in host coordinates |
//! | `width`, `height` | number | rendered control size |
//! | content fields | varies | owned by the content payload |
//!
//! Deserialization never fails loudly: a fragment with a missing or unknown
//! category yields `None` and the caller skips that element.

use log::{debug, info, warn};
use serde_json::{Map, Value};

use bpmm_core::{
    category::Category,
    geometry::{Point, Size},
    identifier,
};

use crate::{
    BpmmError, Element, config::ElementConfig, content::Content, layout::FrameLayout,
};

/// One element's entry in a saved document.
pub type Fragment = Map<String, Value>;

/// Field names of the base fragment.
pub mod fields {
    pub const CATEGORY: &str = "category";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    /// Key of the element array when a document is wrapped in an object.
    pub const ELEMENTS: &str = "elements";
}

impl Element {
    /// Writes the element into a flat document fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpmm::Element;
    /// use bpmm::{category::Category, geometry::Point};
    ///
    /// let mut mission = Element::new(Category::Mission);
    /// mission.set_position(Point::new(12.0, 34.0));
    ///
    /// let fragment = mission.serialize();
    /// assert_eq!(fragment["category"].as_i64(), Some(3));
    /// assert_eq!(fragment["x"].as_f64(), Some(12.0));
    /// assert_eq!(fragment["y"].as_f64(), Some(34.0));
    /// ```
    pub fn serialize(&self) -> Fragment {
        let mut fragment = Fragment::new();
        let rendered = self.rendered_size();
        fragment.insert(fields::CATEGORY.to_string(), Value::from(self.category().code()));
        fragment.insert(fields::X.to_string(), Value::from(self.position().x()));
        fragment.insert(fields::Y.to_string(), Value::from(self.position().y()));
        fragment.insert(fields::WIDTH.to_string(), Value::from(rendered.width()));
        fragment.insert(fields::HEIGHT.to_string(), Value::from(rendered.height()));
        self.content().write_fields(&mut fragment);
        fragment
    }

    /// Rebuilds an element from a fragment using the default configuration.
    ///
    /// Returns `None` if `category` is missing, not an integer, or outside
    /// the enumeration.
    pub fn deserialize(fragment: &Fragment) -> Option<Self> {
        Self::deserialize_with(fragment, &ElementConfig::default())
    }

    /// Rebuilds an element from a fragment.
    ///
    /// The element gets a fresh id. Category and position are restored
    /// here; size and content are restored by the payload matching the
    /// category. Fields other than `category` fall back to defaults when
    /// absent.
    pub fn deserialize_with(fragment: &Fragment, config: &ElementConfig) -> Option<Self> {
        let Some(code) = fragment.get(fields::CATEGORY).and_then(integer_code) else {
            warn!("Skipping element without a category code");
            return None;
        };
        let Some(category) = Category::from_code(code) else {
            warn!(code = code; "Skipping element with unknown category code");
            return None;
        };

        let content = Content::from_fragment(category, fragment, config.base_font_size());
        let mut element = Element::from_parts(category, content, config);
        element.set_position(Point::new(
            read_number(fragment, fields::X).unwrap_or(0.0),
            read_number(fragment, fields::Y).unwrap_or(0.0),
        ));
        element.restore_size(fragment);
        Some(element)
    }

    fn restore_size(&mut self, fragment: &Fragment) {
        let rendered = self.rendered_size();
        let control = Size::new(
            read_number(fragment, fields::WIDTH).unwrap_or(rendered.width()),
            read_number(fragment, fields::HEIGHT).unwrap_or(rendered.height()),
        );
        self.set_size(FrameLayout::from_control_size(control).frame_size());
    }
}

/// Elements restored from a document.
#[derive(Debug, Default)]
pub struct LoadedDocument {
    elements: Vec<Element>,
    skipped: usize,
}

impl LoadedDocument {
    /// Restored elements, in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Takes ownership of the restored elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Number of fragments that could not be restored.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Loads a whole document.
///
/// The id counter is reset first so the same document always yields the
/// same ids. Accepts either a JSON array of fragments or an object holding
/// them under `elements`. Malformed fragments are skipped and counted.
///
/// # Errors
///
/// Returns [`BpmmError::Json`] if `source` is not valid JSON and
/// [`BpmmError::Document`] if it has neither accepted shape.
pub fn load_document(source: &str, config: &ElementConfig) -> Result<LoadedDocument, BpmmError> {
    let value: Value = serde_json::from_str(source)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut root) => match root.remove(fields::ELEMENTS) {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(BpmmError::Document(format!(
                    "expected an `{}` array in the document object",
                    fields::ELEMENTS
                )));
            }
        },
        _ => {
            return Err(BpmmError::Document(
                "expected an array of elements".to_string(),
            ));
        }
    };

    identifier::reset_ids();

    let mut document = LoadedDocument::default();
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_object().and_then(|fragment| Element::deserialize_with(fragment, config)) {
            Some(element) => document.elements.push(element),
            None => {
                debug!(index = index; "Skipped document entry");
                document.skipped += 1;
            }
        }
    }

    info!(
        loaded = document.elements.len(),
        skipped = document.skipped;
        "Document loaded"
    );
    Ok(document)
}

/// Serializes elements into a document array.
pub fn save_document<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Value {
    Value::Array(
        elements
            .into_iter()
            .map(|element| Value::Object(element.serialize()))
            .collect(),
    )
}

/// Reads an integral category code; `3` and `3.0` are both accepted.
fn integer_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|code| code.fract() == 0.0 && code.abs() < i64::MAX as f64)
            .map(|code| code as i64)
    })
}

fn read_number(fragment: &Fragment, key: &str) -> Option<f64> {
    fragment
        .get(key)
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::content::{ElementContent, NoteContent};

    fn fragment(value: Value) -> Fragment {
        match value {
            Value::Object(map) => map,
            _ => panic!("fragment must be an object"),
        }
    }

    #[test]
    fn test_roundtrip_generic_category() {
        let mut mission = Element::new(Category::Mission);
        mission.set_position(Point::new(12.5, -40.25));

        let restored = Element::deserialize(&mission.serialize()).expect("valid fragment");

        assert_eq!(restored.category(), Category::Mission);
        assert_eq!(restored.position(), Point::new(12.5, -40.25));
        assert!(matches!(restored.content(), Content::Generic(_)));
    }

    #[test]
    fn test_roundtrip_note_category() {
        let mut note = Element::note();
        note.set_position(Point::new(300.0, 45.0));
        if let Content::Note(content) = note.content_mut() {
            content.text = "Check with finance".to_string();
        }

        let fragment = note.serialize();
        assert_eq!(fragment[fields::CATEGORY], json!(10));

        let restored = Element::deserialize(&fragment).expect("valid fragment");
        assert_eq!(restored.category(), Category::Note);
        assert_eq!(restored.position(), Point::new(300.0, 45.0));
        let Content::Note(NoteContent { text, .. }) = restored.content() else {
            panic!("expected note content");
        };
        assert_eq!(text, "Check with finance");
    }

    #[test]
    fn test_roundtrip_preserves_size() {
        let mut element = Element::business_rule();
        element.set_size(Size::new(240.0, 130.0));

        let restored = Element::deserialize(&element.serialize()).expect("valid fragment");

        assert_approx_eq!(f64, restored.size().width(), 240.0, epsilon = 0.01);
        assert_approx_eq!(f64, restored.size().height(), 130.0, epsilon = 0.01);
    }

    #[test]
    fn test_missing_category_yields_none() {
        let fragment = fragment(json!({ "x": 1.0, "y": 2.0 }));
        assert!(Element::deserialize(&fragment).is_none());
    }

    #[test]
    fn test_out_of_range_category_yields_none() {
        for code in [json!(999), json!(-1), json!(11), json!(2.5), json!("3"), json!(null)] {
            let fragment = fragment(json!({ "category": code, "x": 0.0, "y": 0.0 }));
            assert!(Element::deserialize(&fragment).is_none(), "code {code} should be rejected");
        }
    }

    #[test]
    fn test_float_encoded_category_accepted() {
        let fragment = fragment(json!({ "category": 4.0 }));
        let element = Element::deserialize(&fragment).expect("integral float code");
        assert_eq!(element.category(), Category::Strategy);
    }

    #[test]
    fn test_missing_geometry_uses_defaults() {
        let element = Element::deserialize(&fragment(json!({ "category": 1 }))).expect("valid");

        assert_eq!(element.position(), Point::default());
        assert_approx_eq!(f64, element.size().width(), 200.0, epsilon = 0.01);
        assert_approx_eq!(f64, element.size().height(), 200.0, epsilon = 0.01);
    }

    #[test]
    fn test_tiny_saved_size_is_raised_to_minimum() {
        let fragment = fragment(json!({ "category": 0, "width": 10.0, "height": 500.0 }));
        let element = Element::deserialize(&fragment).expect("valid");

        assert_approx_eq!(f64, element.size().width(), 100.0);
        assert_approx_eq!(f64, element.size().height(), 465.0, epsilon = 0.01);
    }

    #[test]
    fn test_dedicated_payload_dispatch() {
        let cases = [
            (7, "BusinessRule"),
            (8, "Influencer"),
            (9, "Assessment"),
            (10, "Note"),
        ];
        for (code, expected) in cases {
            let element = Element::deserialize(&fragment(json!({ "category": code }))).expect("valid");
            let actual = match element.content() {
                Content::Generic(_) => "Generic",
                Content::Note(_) => "Note",
                Content::BusinessRule(_) => "BusinessRule",
                Content::Influencer(_) => "Influencer",
                Content::Assessment(_) => "Assessment",
            };
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_deserialize_uses_config_font() {
        let config = ElementConfig::new(Size::square(200.0), 18.0);
        let element =
            Element::deserialize_with(&fragment(json!({ "category": 10 })), &config).expect("valid");
        assert_eq!(element.content().font_size(), Some(18.0));
    }

    #[test]
    fn test_load_document_skips_bad_entries() {
        let source = r#"[
            { "category": 0, "x": 10, "y": 10 },
            { "x": 5 },
            { "category": 999 },
            "not an object",
            { "category": 10, "x": 50, "y": 60, "text": "hello" },
            { "category": 3 }
        ]"#;

        let document = load_document(source, &ElementConfig::default()).expect("valid JSON");

        let categories: Vec<Category> = document.elements().iter().map(Element::category).collect();
        assert_eq!(categories, vec![Category::Vision, Category::Note, Category::Mission]);
        assert_eq!(document.skipped(), 3);
    }

    #[test]
    fn test_load_document_accepts_wrapped_elements() {
        let source = r#"{ "elements": [ { "category": 5 } ] }"#;
        let document = load_document(source, &ElementConfig::default()).expect("valid");

        assert_eq!(document.elements().len(), 1);
        assert_eq!(document.elements()[0].category(), Category::Tactic);
    }

    #[test]
    fn test_load_document_rejects_invalid_json() {
        let result = load_document("[{", &ElementConfig::default());
        assert!(matches!(result, Err(BpmmError::Json(_))));
    }

    #[test]
    fn test_load_document_rejects_wrong_shape() {
        let config = ElementConfig::default();
        assert!(matches!(load_document("42", &config), Err(BpmmError::Document(_))));
        assert!(matches!(
            load_document(r#"{ "items": [] }"#, &config),
            Err(BpmmError::Document(_))
        ));
    }

    #[test]
    fn test_load_then_save_keeps_coordinates_exact() {
        let source = r#"[ { "category": 1, "x": 123.456, "y": 16777217, "width": 333.3333333333 } ]"#;

        let document = load_document(source, &ElementConfig::default()).expect("valid");
        let saved = save_document(document.elements());

        assert_eq!(saved[0][fields::X].as_f64(), Some(123.456));
        assert_eq!(saved[0][fields::Y].as_f64(), Some(16_777_217.0));
        assert_approx_eq!(
            f64,
            saved[0][fields::WIDTH].as_f64().expect("width"),
            333.3333333333,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_save_then_load_is_stable() {
        let source = r#"[ { "category": 2, "x": 1, "y": 2 }, { "category": 9, "title": "Churn" } ]"#;
        let config = ElementConfig::default();

        let first = load_document(source, &config).expect("valid");
        let saved = save_document(first.elements()).to_string();
        let second = load_document(&saved, &config).expect("valid");

        assert_eq!(second.elements().len(), 2);
        for (before, after) in first.elements().iter().zip(second.elements()) {
            assert_eq!(after.category(), before.category());
            assert_eq!(after.position(), before.position());
            assert_eq!(after.content(), before.content());
            assert_approx_eq!(f64, after.size().width(), before.size().width(), epsilon = 0.01);
        }
    }
}
