//! Analysis configuration
//!
//! Every field has a serde default, so a partial JSON object (or `{}`)
//! yields a usable config.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Characters between a `>` and the start of the quoted text.
pub const DEFAULT_QUOTE_SKIP: usize = 5;
/// End of the quote window, in characters counted from the `>`.
pub const DEFAULT_QUOTE_WINDOW: usize = 60;
/// Distinct earlier authors at which a thread counts as multi-party.
pub const DEFAULT_PARTY_THRESHOLD: usize = 3;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Keep every invalid reference in `Diagnostics::invalid`
    #[serde(default)]
    pub collect_invalid: bool,
    /// Keep every unsourced quote in `Diagnostics::unsourced`
    #[serde(default)]
    pub collect_unsourced: bool,
    /// Keep diff-anchored rows that have no position
    #[serde(default)]
    pub collect_missing_position: bool,
    /// Aggregate the project output into weighted edges
    #[serde(default)]
    pub weighted: bool,
    #[serde(default = "default_quote_skip")]
    pub quote_skip: usize,
    #[serde(default = "default_quote_window")]
    pub quote_window: usize,
    #[serde(default = "default_party_threshold")]
    pub contextual_party_threshold: usize,
    /// Log the report summary at the end of each project
    #[serde(default)]
    pub log_summary: bool,
}

fn default_quote_skip() -> usize { DEFAULT_QUOTE_SKIP }
fn default_quote_window() -> usize { DEFAULT_QUOTE_WINDOW }
fn default_party_threshold() -> usize { DEFAULT_PARTY_THRESHOLD }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            collect_invalid: false,
            collect_unsourced: false,
            collect_missing_position: false,
            weighted: false,
            quote_skip: DEFAULT_QUOTE_SKIP,
            quote_window: DEFAULT_QUOTE_WINDOW,
            contextual_party_threshold: DEFAULT_PARTY_THRESHOLD,
            log_summary: false,
        }
    }
}

impl AnalysisConfig {
    /// Config with every diagnostic collector switched on
    pub fn diagnostic() -> Self {
        Self {
            collect_invalid: true,
            collect_unsourced: true,
            collect_missing_position: true,
            ..Self::default()
        }
    }

    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quote_window <= self.quote_skip {
            return Err(AnalysisError::InvalidConfig(format!(
                "quote_window ({}) must exceed quote_skip ({})",
                self.quote_window, self.quote_skip
            )));
        }
        if self.contextual_party_threshold == 0 {
            return Err(AnalysisError::InvalidConfig(
                "contextual_party_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
