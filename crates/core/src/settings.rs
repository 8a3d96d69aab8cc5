//! Decoder color settings.
//!
//! The settings collaborator owns these values; the decoder only reads them.
//! Settings can be built programmatically, parsed from a TOML document using
//! the collaborator's key names, or overridden from environment variables.

use markup_model::{AnnotationType, Subtype};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for color overrides, e.g. `MARKUP_HIGH_COLOR`.
pub const ENV_PREFIX: &str = "MARKUP_";

/// Named color strings used by the decoder.
///
/// Values are CSS-style color strings (hex or `rgba(...)`) and are passed
/// through to the store record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct DecoderSettings {
    pub high_color: String,
    pub normal_color: String,
    pub low_color: String,
    pub high_advice_color: String,
    pub normal_advice_color: String,
    pub low_advice_color: String,
    /// Fallback for highlights that carry no color of their own
    pub highlight_color: String,
    /// Fallback for underlines that carry no color of their own
    pub underline_color: String,
    /// Fallback for strikeouts that carry no color of their own
    pub strikeout_color: String,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            high_color: "#E690D1".to_string(),
            normal_color: "rgba(255, 85, 0, 0.4)".to_string(),
            low_color: "rgba(40, 132, 255, 0.4)".to_string(),
            high_advice_color: "#5ffffe61".to_string(),
            normal_advice_color: "#5ffffe61".to_string(),
            low_advice_color: "#5ffffe61".to_string(),
            highlight_color: "#ffff00".to_string(),
            underline_color: "#0071c4".to_string(),
            strikeout_color: "#ff0000".to_string(),
        }
    }
}

impl DecoderSettings {
    /// Override color for a classification subtype.
    pub fn subtype_color(&self, subtype: Subtype) -> &str {
        match subtype {
            Subtype::High => &self.high_color,
            Subtype::Normal => &self.normal_color,
            Subtype::Low => &self.low_color,
            Subtype::HighAdvice => &self.high_advice_color,
            Subtype::NormalAdvice => &self.normal_advice_color,
            Subtype::LowAdvice => &self.low_advice_color,
        }
    }

    /// Default tool color for an annotation type.
    pub fn tool_color(&self, annotation_type: AnnotationType) -> &str {
        match annotation_type {
            AnnotationType::Highlight => &self.highlight_color,
            AnnotationType::Underline => &self.underline_color,
            AnnotationType::Strikeout => &self.strikeout_color,
        }
    }

    /// Sets the override color for a subtype.
    pub fn with_subtype_color(mut self, subtype: Subtype, color: impl Into<String>) -> Self {
        *self.subtype_slot(subtype) = color.into();
        self
    }

    /// Sets the fallback color for an annotation type.
    pub fn with_tool_color(
        mut self,
        annotation_type: AnnotationType,
        color: impl Into<String>,
    ) -> Self {
        let slot = match annotation_type {
            AnnotationType::Highlight => &mut self.highlight_color,
            AnnotationType::Underline => &mut self.underline_color,
            AnnotationType::Strikeout => &mut self.strikeout_color,
        };
        *slot = color.into();
        self
    }

    fn subtype_slot(&mut self, subtype: Subtype) -> &mut String {
        match subtype {
            Subtype::High => &mut self.high_color,
            Subtype::Normal => &mut self.normal_color,
            Subtype::Low => &mut self.low_color,
            Subtype::HighAdvice => &mut self.high_advice_color,
            Subtype::NormalAdvice => &mut self.normal_advice_color,
            Subtype::LowAdvice => &mut self.low_advice_color,
        }
    }

    /// Parses settings from a TOML document.
    ///
    /// Expected format (missing keys keep their defaults):
    /// ```toml
    /// HIGH_COLOR = "#E690D1"
    /// LOW_ADVICE_COLOR = "#5ffffe61"
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Applies environment overrides on top of the defaults.
    ///
    /// Each setting can be overridden by `MARKUP_<KEY>`, for example
    /// `MARKUP_HIGH_COLOR` or `MARKUP_LOW_ADVICE_COLOR`.
    ///
    /// # Errors
    /// Returns an error if an override is set but blank.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, SettingsError> {
        for (key, slot) in self.named_slots() {
            let var = format!("{ENV_PREFIX}{key}");
            if let Ok(value) = std::env::var(&var) {
                if value.trim().is_empty() {
                    return Err(SettingsError::InvalidValue(var));
                }
                *slot = value.trim().to_string();
            }
        }
        Ok(self)
    }

    fn named_slots(&mut self) -> [(&'static str, &mut String); 9] {
        [
            ("HIGH_COLOR", &mut self.high_color),
            ("NORMAL_COLOR", &mut self.normal_color),
            ("LOW_COLOR", &mut self.low_color),
            ("HIGH_ADVICE_COLOR", &mut self.high_advice_color),
            ("NORMAL_ADVICE_COLOR", &mut self.normal_advice_color),
            ("LOW_ADVICE_COLOR", &mut self.low_advice_color),
            ("HIGHLIGHT_COLOR", &mut self.highlight_color),
            ("UNDERLINE_COLOR", &mut self.underline_color),
            ("STRIKEOUT_COLOR", &mut self.strikeout_color),
        ]
    }

    fn named_values(&self) -> [(&'static str, &str); 9] {
        [
            ("HIGH_COLOR", &self.high_color),
            ("NORMAL_COLOR", &self.normal_color),
            ("LOW_COLOR", &self.low_color),
            ("HIGH_ADVICE_COLOR", &self.high_advice_color),
            ("NORMAL_ADVICE_COLOR", &self.normal_advice_color),
            ("LOW_ADVICE_COLOR", &self.low_advice_color),
            ("HIGHLIGHT_COLOR", &self.highlight_color),
            ("UNDERLINE_COLOR", &self.underline_color),
            ("STRIKEOUT_COLOR", &self.strikeout_color),
        ]
    }

    fn validate(&self) -> Result<(), SettingsError> {
        match self.named_values().into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(SettingsError::InvalidValue(key.to_string())),
            None => Ok(()),
        }
    }
}

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for setting: {0}")]
    InvalidValue(String),
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
