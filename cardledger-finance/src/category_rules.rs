//! User-defined category rules loaded from a JSON object:
//!
//! ```json
//! { "Food": ["STORE", "BAKERY"], "Fuel": ["GAS"] }
//! ```
//!
//! Patterns are plain, case-sensitive substrings of the activity text.
//! Categories and their patterns are tried in file order and the **last**
//! matching pattern decides the category, so a later rule overrides an
//! earlier one for the same transaction.

use cardledger_core::{Ledger, LedgerError};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CategoryRuleSet {
    rules: IndexMap<String, Vec<String>>,
}

impl CategoryRuleSet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let bad = |reason: String| LedgerError::CategoryFile {
            path: path.to_path_buf(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| bad(e.to_string()))?;
        Self::from_json(&text).map_err(|e| bad(e.to_string()))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Category for an activity, or `None` if no pattern occurs in it.
    pub fn categorize(&self, activity: &str) -> Option<&str> {
        self.rules
            .iter()
            .flat_map(|(category, patterns)| patterns.iter().map(move |p| (category, p)))
            .fold(None, |current, (category, pattern)| {
                if activity.contains(pattern.as_str()) {
                    Some(category.as_str())
                } else {
                    current
                }
            })
    }

    /// Tag every transaction in the ledger.
    pub fn apply(&self, ledger: Ledger) -> Ledger {
        ledger.with_categories(|activity| self.categorize(activity).map(str::to_string))
    }
}

impl FromIterator<(String, Vec<String>)> for CategoryRuleSet {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
