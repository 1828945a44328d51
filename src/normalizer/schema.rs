//! Canonical entity schema definitions.
//!
//! This module defines the in-memory form every raw GTM record is
//! normalized into before indexing and diffing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::utils::config;

/// Entity categories, in the declared report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tag,
    Trigger,
    Variable,
    BuiltInVariable,
}

impl Category {
    /// All categories in report order. Iteration order is fixed so that
    /// identical inputs always produce identically ordered reports.
    pub const ALL: [Category; 4] = [
        Category::Tag,
        Category::Trigger,
        Category::Variable,
        Category::BuiltInVariable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tag => "tag",
            Category::Trigger => "trigger",
            Category::Variable => "variable",
            Category::BuiltInVariable => "built_in_variable",
        }
    }

    /// Recognized raw fields for this category, as (api_name, canonical_name)
    pub(crate) fn recognized_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Tag => config::TAG_FIELDS,
            Category::Trigger => config::TRIGGER_FIELDS,
            Category::Variable => config::VARIABLE_FIELDS,
            Category::BuiltInVariable => config::BUILT_IN_VARIABLE_FIELDS,
        }
    }

    /// Raw fields consulted for stable identity, in lookup order
    pub(crate) fn identity_fields(&self) -> &'static [&'static str] {
        match self {
            Category::Tag => config::TAG_IDENTITY_FIELDS,
            Category::Trigger => config::TRIGGER_IDENTITY_FIELDS,
            Category::Variable => config::VARIABLE_IDENTITY_FIELDS,
            Category::BuiltInVariable => config::BUILT_IN_VARIABLE_IDENTITY_FIELDS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized configuration object (tag, trigger, variable, or built-in)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Which collection this entity belongs to
    pub category: Category,

    /// Stable identifier, unique within a category and container version.
    /// The persistent ID, not the display name: names get renamed.
    pub identity_key: String,

    /// Human-readable label; not unique and not part of identity
    pub display_name: String,

    /// Canonical fields, including an `extra` bucket for anything the
    /// recognized schema does not cover. Keys are lexicographically ordered.
    pub fields: Map<String, Value>,

    /// Deterministic digest of `fields`, used to short-circuit the deep
    /// comparison for the common unchanged case
    pub fingerprint: String,
}
