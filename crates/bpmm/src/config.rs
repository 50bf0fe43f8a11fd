//! Configuration types for BPMM elements.
//!
//! This module provides configuration structures that control how new
//! elements are sized and which wording the delete confirmation flow shows.
//! All types implement [`serde::Deserialize`] for loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining element and prompt settings.
//! - [`ElementConfig`] - Default frame size and base font size of new elements.
//! - [`PromptConfig`] - Labels used by the delete confirmation flow.
//!
//! # Example
//!
//! ```
//! # use bpmm::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.prompts().delete_label(), "Delete BPMM Object");
//! ```

use serde::Deserialize;

use bpmm_core::geometry::Size;

use crate::{BpmmError, layout::MIN_SIZE};

const DEFAULT_FRAME_EXTENT: f64 = 200.0;
const DEFAULT_BASE_FONT_SIZE: f64 = 14.0;

/// Top-level configuration combining element and prompt settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Element construction section.
    #[serde(default)]
    element: ElementConfig,

    /// Delete confirmation wording section.
    #[serde(default)]
    prompts: PromptConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(element: ElementConfig, prompts: PromptConfig) -> Self {
        Self { element, prompts }
    }

    /// Returns the element configuration.
    pub fn element(&self) -> &ElementConfig {
        &self.element
    }

    /// Returns the prompt configuration.
    pub fn prompts(&self) -> &PromptConfig {
        &self.prompts
    }

    /// Checks the configuration for values the engine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`BpmmError::Config`] if the default frame is smaller than
    /// the minimum element size or the base font size is not positive.
    pub fn validate(&self) -> Result<(), BpmmError> {
        self.element.validate()
    }
}

/// Settings applied to newly constructed elements.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementConfig {
    /// Initial frame width of a new element.
    default_width: f64,

    /// Initial frame height of a new element.
    default_height: f64,

    /// Font size of content text at scale 1.0.
    base_font_size: f64,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_FRAME_EXTENT,
            default_height: DEFAULT_FRAME_EXTENT,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
        }
    }
}

impl ElementConfig {
    /// Creates a new [`ElementConfig`].
    ///
    /// # Arguments
    ///
    /// * `default_size` - Initial frame size of new elements.
    /// * `base_font_size` - Content font size at scale 1.0.
    pub fn new(default_size: Size, base_font_size: f64) -> Self {
        Self {
            default_width: default_size.width(),
            default_height: default_size.height(),
            base_font_size,
        }
    }

    /// Returns the initial frame size of new elements.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Returns the content font size at scale 1.0.
    pub fn base_font_size(&self) -> f64 {
        self.base_font_size
    }

    fn validate(&self) -> Result<(), BpmmError> {
        if !(self.default_width >= MIN_SIZE && self.default_height >= MIN_SIZE) {
            return Err(BpmmError::Config(format!(
                "default element size {}x{} is below the minimum of {MIN_SIZE}",
                self.default_width, self.default_height
            )));
        }
        if !(self.base_font_size.is_finite() && self.base_font_size > 0.0) {
            return Err(BpmmError::Config(format!(
                "base font size must be positive, got {}",
                self.base_font_size
            )));
        }
        Ok(())
    }
}

/// Wording of the two-step delete confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Label of the single command in the context menu.
    delete_label: String,

    /// Title of the confirmation dialog.
    confirm_title: String,

    /// Message of the confirmation dialog.
    confirm_message: String,

    /// Label of the affirmative confirmation button.
    ok_label: String,

    /// Label of the negative confirmation button.
    cancel_label: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            delete_label: "Delete BPMM Object".to_string(),
            confirm_title: String::new(),
            confirm_message: "Really Delete this?".to_string(),
            ok_label: "Ok".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

impl PromptConfig {
    /// Returns the context menu command label.
    pub fn delete_label(&self) -> &str {
        &self.delete_label
    }

    /// Returns the confirmation dialog title.
    pub fn confirm_title(&self) -> &str {
        &self.confirm_title
    }

    /// Returns the confirmation dialog message.
    pub fn confirm_message(&self) -> &str {
        &self.confirm_message
    }

    /// Returns the affirmative button label.
    pub fn ok_label(&self) -> &str {
        &self.ok_label
    }

    /// Returns the negative button label.
    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_element_config() {
        let config = ElementConfig::default();
        assert_eq!(config.default_size(), Size::new(200.0, 200.0));
        assert_eq!(config.base_font_size(), 14.0);
    }

    #[test]
    fn test_validate_rejects_small_default_size() {
        let config = AppConfig::new(
            ElementConfig::new(Size::new(50.0, 200.0), 14.0),
            PromptConfig::default(),
        );
        assert!(matches!(config.validate(), Err(BpmmError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_font() {
        let config = AppConfig::new(
            ElementConfig::new(Size::square(200.0), 0.0),
            PromptConfig::default(),
        );
        assert!(matches!(config.validate(), Err(BpmmError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_minimum_size() {
        let config = AppConfig::new(
            ElementConfig::new(Size::square(MIN_SIZE), 12.0),
            PromptConfig::default(),
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "element": { "default_width": 300.0 }, "prompts": { "ok_label": "Yes" } }"#,
        )
        .expect("valid config");

        assert_eq!(config.element().default_size(), Size::new(300.0, 200.0));
        assert_eq!(config.prompts().ok_label(), "Yes");
        assert_eq!(config.prompts().cancel_label(), "Cancel");
        assert_eq!(config.prompts().confirm_message(), "Really Delete this?");
    }
}
