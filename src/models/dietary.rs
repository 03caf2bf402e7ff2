use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Restriction key to active flag, e.g. `{"vegetarian": true}`. A team's
/// effective set is the union of active keys across its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DietaryRestrictions(pub HashMap<String, bool>);

impl DietaryRestrictions {
    pub fn is_empty(&self) -> bool {
        !self.0.values().any(|active| *active)
    }

    /// Fold another member's settings in. Only active flags accumulate;
    /// a member turning a key off never clears it for the team.
    pub fn merge(&mut self, other: &DietaryRestrictions) {
        for (key, active) in &other.0 {
            if *active {
                self.0.insert(key.clone(), true);
            }
        }
    }

    /// Whether a category title names an active restriction. Titles and
    /// keys are compared case-insensitively with surrounding whitespace
    /// ignored; no substring or synonym matching.
    pub fn blocks(&self, category: &str) -> bool {
        let wanted = category.trim().to_lowercase();
        self.0
            .iter()
            .any(|(key, active)| *active && key.trim().to_lowercase() == wanted)
    }

    /// True when none of the given category titles hits an active
    /// restriction. Empty categories always fit.
    pub fn fits(&self, categories: &[String]) -> bool {
        !categories.iter().any(|c| self.blocks(c))
    }
}
