//! Category-specific content carried by an element's frame.
//!
//! Four categories have dedicated payloads (Note, Business Rule, Influencer,
//! Assessment); the remaining seven share [`GenericContent`]. Each payload
//! serializes its own fields into the element's flat document fragment
//! alongside the base fields, so payload field names must not collide with
//! `category`, `x`, `y`, `width` or `height`.

use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use bpmm_core::category::Category;

/// Capabilities every content payload offers to the engine.
pub trait ElementContent {
    /// Whether the payload renders text that follows the page zoom.
    fn supports_font_scale(&self) -> bool;

    /// Rescales the payload text relative to its base font size.
    ///
    /// Payloads without font scaling ignore the call.
    fn update_font_size(&mut self, scale: f64);

    /// Current font size, if the payload renders text.
    fn font_size(&self) -> Option<f64>;
}

/// Font size tracking for text payloads. Not part of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    base: f64,
    current: f64,
}

impl FontScale {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            current: base,
        }
    }

    /// Current font size.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Sets the font size to `base * scale`; non-positive or non-finite scales are ignored.
    pub fn apply(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.current = self.base * scale;
        }
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::new(14.0)
    }
}

macro_rules! text_content {
    ($ty:ty) => {
        impl ElementContent for $ty {
            fn supports_font_scale(&self) -> bool {
                true
            }

            fn update_font_size(&mut self, scale: f64) {
                self.font.apply(scale);
            }

            fn font_size(&self) -> Option<f64> {
                Some(self.font.current())
            }
        }
    };
}

/// Title and description shared by Vision, Goal, Objective, Mission,
/// Strategy, Tactic and Business Policy elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericContent {
    pub title: String,
    pub description: String,
    #[serde(skip)]
    font: FontScale,
}

text_content!(GenericContent);

/// Free-form sticky note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteContent {
    pub text: String,
    #[serde(skip)]
    font: FontScale,
}

text_content!(NoteContent);

/// Business rule with its statement and enforcement level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRuleContent {
    pub title: String,
    pub rule: String,
    pub enforcement: String,
    #[serde(skip)]
    font: FontScale,
}

text_content!(BusinessRuleContent);

/// Where an influencer originates relative to the enterprise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfluencerKind {
    #[default]
    Internal,
    External,
}

/// Something that can affect the enterprise's means or ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluencerContent {
    pub title: String,
    pub influencer_kind: InfluencerKind,
    pub description: String,
    #[serde(skip)]
    font: FontScale,
}

text_content!(InfluencerContent);

/// SWOT classification of an assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    #[default]
    Strength,
    Weakness,
    Opportunity,
    Threat,
}

/// Judgment about the impact of an influencer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentContent {
    pub title: String,
    pub assessment_kind: AssessmentKind,
    pub description: String,
    #[serde(skip)]
    font: FontScale,
}

text_content!(AssessmentContent);

/// Content payload of an element, one variant per concrete element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Generic(GenericContent),
    Note(NoteContent),
    BusinessRule(BusinessRuleContent),
    Influencer(InfluencerContent),
    Assessment(AssessmentContent),
}

impl Content {
    /// Creates the empty payload matching `category`.
    pub fn for_category(category: Category, base_font_size: f64) -> Self {
        let font = FontScale::new(base_font_size);
        match category {
            Category::Note => Content::Note(NoteContent {
                font,
                ..Default::default()
            }),
            Category::BusinessRule => Content::BusinessRule(BusinessRuleContent {
                font,
                ..Default::default()
            }),
            Category::Influencer => Content::Influencer(InfluencerContent {
                font,
                ..Default::default()
            }),
            Category::Assessment => Content::Assessment(AssessmentContent {
                font,
                ..Default::default()
            }),
            Category::Vision
            | Category::Goal
            | Category::Objective
            | Category::Mission
            | Category::Strategy
            | Category::Tactic
            | Category::BusinessPolicy => Content::Generic(GenericContent {
                font,
                ..Default::default()
            }),
        }
    }

    /// Reads the payload matching `category` from a document fragment.
    ///
    /// A payload whose fields cannot be read is replaced by the empty payload.
    pub fn from_fragment(category: Category, fragment: &Map<String, Value>, base_font_size: f64) -> Self {
        let font = FontScale::new(base_font_size);
        match category {
            Category::Note => Content::Note(NoteContent {
                font,
                ..read_payload(category, fragment)
            }),
            Category::BusinessRule => Content::BusinessRule(BusinessRuleContent {
                font,
                ..read_payload(category, fragment)
            }),
            Category::Influencer => Content::Influencer(InfluencerContent {
                font,
                ..read_payload(category, fragment)
            }),
            Category::Assessment => Content::Assessment(AssessmentContent {
                font,
                ..read_payload(category, fragment)
            }),
            Category::Vision
            | Category::Goal
            | Category::Objective
            | Category::Mission
            | Category::Strategy
            | Category::Tactic
            | Category::BusinessPolicy => Content::Generic(GenericContent {
                font,
                ..read_payload(category, fragment)
            }),
        }
    }

    /// Appends the payload fields to a document fragment.
    pub fn write_fields(&self, fragment: &mut Map<String, Value>) {
        let value = match self {
            Content::Generic(content) => serde_json::to_value(content),
            Content::Note(content) => serde_json::to_value(content),
            Content::BusinessRule(content) => serde_json::to_value(content),
            Content::Influencer(content) => serde_json::to_value(content),
            Content::Assessment(content) => serde_json::to_value(content),
        };
        match value {
            Ok(Value::Object(fields)) => fragment.extend(fields),
            Ok(other) => warn!(value:? = other; "Content did not serialize to an object"),
            Err(err) => warn!(err:% = err; "Failed to serialize element content"),
        }
    }

    fn as_content(&self) -> &dyn ElementContent {
        match self {
            Content::Generic(content) => content,
            Content::Note(content) => content,
            Content::BusinessRule(content) => content,
            Content::Influencer(content) => content,
            Content::Assessment(content) => content,
        }
    }

    fn as_content_mut(&mut self) -> &mut dyn ElementContent {
        match self {
            Content::Generic(content) => content,
            Content::Note(content) => content,
            Content::BusinessRule(content) => content,
            Content::Influencer(content) => content,
            Content::Assessment(content) => content,
        }
    }
}

impl ElementContent for Content {
    fn supports_font_scale(&self) -> bool {
        self.as_content().supports_font_scale()
    }

    fn update_font_size(&mut self, scale: f64) {
        self.as_content_mut().update_font_size(scale);
    }

    fn font_size(&self) -> Option<f64> {
        self.as_content().font_size()
    }
}

fn read_payload<T: DeserializeOwned + Default>(category: Category, fragment: &Map<String, Value>) -> T {
    serde_json::from_value(Value::Object(fragment.clone())).unwrap_or_else(|err| {
        warn!(category:% = category, err:% = err; "Unreadable element content, using empty content");
        T::default()
    })
}
