use serde::{Deserialize, Serialize};

use crate::GearError;
use crate::filtering::autocomplete::DEFAULT_AUTOCOMPLETE_OPTIONS;
use crate::filtering::pagination::DEFAULT_PAGE_SIZE;
use crate::filtering::sort::SortSpec;
use crate::models::Category;
use crate::settings::FILTER_TEXT_KEY;

/// Startup configuration for a [`crate::GearView`].
///
/// Every field is optional in JSON; missing fields take the defaults of the
/// gear screen (20 per page, power descending, weapons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
    pub sort: SortSpec,
    pub category: Category,
    pub autocomplete_options: Vec<String>,
    /// Settings key under which the raw filter text is persisted
    pub filter_text_key: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortSpec::default(),
            category: Category::default(),
            autocomplete_options: default_autocomplete_options(),
            filter_text_key: FILTER_TEXT_KEY.to_string(),
        }
    }
}

fn default_autocomplete_options() -> Vec<String> {
    DEFAULT_AUTOCOMPLETE_OPTIONS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl ViewConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::Serialization`] for malformed JSON and
    /// [`GearError::InvalidConfig`] when a value fails validation.
    pub fn from_json(json: &str) -> Result<Self, GearError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`GearError::InvalidConfig`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), GearError> {
        if self.page_size == 0 {
            return Err(GearError::invalid_config("page_size", "Must be at least 1"));
        }
        if self.filter_text_key.trim().is_empty() {
            return Err(GearError::invalid_config(
                "filter_text_key",
                "Must not be blank",
            ));
        }
        Ok(())
    }
}
