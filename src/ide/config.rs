//! Completion configuration

use crate::base::constants::{PHP_EXT, PREDEFINED_VARIABLES};
use crate::parser::ParseOptions;

/// Configuration for the completion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompletionConfig {
    /// Names (without sigil) offered in every bare-variable context.
    pub predefined_variables: Vec<String>,
    /// Extensions of files picked up from a project directory.
    pub file_extensions: Vec<String>,
    pub parse: ParseOptions,
    /// Offer class names after `new`.
    pub offer_class_names: bool,
    /// Cap on the number of candidates returned; `None` keeps all.
    pub max_candidates: Option<usize>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            predefined_variables: PREDEFINED_VARIABLES.iter().map(|s| s.to_string()).collect(),
            file_extensions: vec![PHP_EXT.to_string()],
            parse: ParseOptions::default(),
            offer_class_names: true,
            max_candidates: None,
        }
    }
}

impl CompletionConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
