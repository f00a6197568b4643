//! Regional mortgage rule table.
//!
//! The table is ordered: comparisons and region listings follow insertion order.
//! It is validated once when built and never mutated afterwards.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use crate::domain::RegionRule;
use crate::error::{AppError, Result};

/// Ordered, validated set of regional rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    rules: Vec<RegionRule>,
}

impl RegionTable {
    /// Build a table, validating every rule and rejecting duplicate ids.
    pub fn new(rules: Vec<RegionRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(AppError::config("region table must contain at least one region."));
        }
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(AppError::config(format!("duplicate region id '{}'.", rule.id)));
            }
        }
        Ok(Self { rules })
    }

    /// Built-in Canadian rules (posted rates, working-age population).
    pub fn canada() -> Self {
        Self {
            rules: vec![
                RegionRule::new("National", 0.05, 0.05, 0.045, 20_000_000, 0.95),
                RegionRule::new("Ontario", 0.05, 0.05, 0.047, 15_000_000, 0.93),
                RegionRule::new("BC", 0.05, 0.05, 0.049, 5_300_000, 0.90),
                RegionRule::new("Alberta", 0.05, 0.05, 0.043, 4_500_000, 1.00),
                RegionRule::new("Quebec", 0.05, 0.03, 0.044, 9_000_000, 1.00),
                RegionRule::new("Manitoba", 0.05, 0.05, 0.042, 1_400_000, 1.00),
            ],
        }
    }

    /// Load a JSON array of rules from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| AppError::config(format!("Failed to open regions file '{}': {e}", path.display())))?;
        let rules: Vec<RegionRule> = serde_json::from_reader(file)
            .map_err(|e| AppError::config(format!("Invalid regions file '{}': {e}", path.display())))?;
        Self::new(rules)
    }

    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Region ids in table order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id.as_str()).collect()
    }

    /// Exact-match lookup.
    pub fn get(&self, id: &str) -> Result<&RegionRule> {
        self.rules
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Case-insensitive lookup, for user-typed region names.
    pub fn find(&self, name: &str) -> Result<&RegionRule> {
        let name = name.trim();
        self.rules
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    /// Position of `id` in the table.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::canada()
    }
}
