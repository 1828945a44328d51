//! Labeled container snapshots.
//!
//! A snapshot is one version of a container's configuration: four entity
//! indexes built from already-fetched raw records. Fetching, auth, and
//! pagination live entirely with the caller; this module only normalizes
//! and indexes what it is given.

use crate::index::EntityIndex;
use crate::normalizer::schema::Category;
use crate::normalizer::{normalize, Entity};
use crate::utils::error::SnapshotError;
use log::debug;
use serde_json::Value;

/// One version of a container's configuration, immutable once built
#[derive(Debug, Clone)]
pub struct ContainerSnapshot {
    /// Version label for report output (e.g. "workspace", "live")
    pub label: String,

    pub tags: EntityIndex,
    pub triggers: EntityIndex,
    pub variables: EntityIndex,
    pub built_in_variables: EntityIndex,
}

impl ContainerSnapshot {
    /// Build a snapshot from raw record collections
    ///
    /// **Public** - main entry point for snapshot construction
    ///
    /// # Errors
    /// * `SnapshotError::Normalize` - A record lacks its identity field or
    ///   is not an object; the whole snapshot build aborts (a partially
    ///   indexed collection is worse than no snapshot)
    /// * `SnapshotError::Index` - Two records collide on identity
    pub fn from_raw(
        label: impl Into<String>,
        tags: &[Value],
        triggers: &[Value],
        variables: &[Value],
        built_in_variables: &[Value],
    ) -> Result<Self, SnapshotError> {
        let label = label.into();
        debug!(
            "Building snapshot '{}': {} tags, {} triggers, {} variables, {} built-ins",
            label,
            tags.len(),
            triggers.len(),
            variables.len(),
            built_in_variables.len()
        );

        Ok(ContainerSnapshot {
            label,
            tags: build_category_index(tags, Category::Tag)?,
            triggers: build_category_index(triggers, Category::Trigger)?,
            variables: build_category_index(variables, Category::Variable)?,
            built_in_variables: build_category_index(
                built_in_variables,
                Category::BuiltInVariable,
            )?,
        })
    }

    /// The index for one category
    pub fn index(&self, category: Category) -> &EntityIndex {
        match category {
            Category::Tag => &self.tags,
            Category::Trigger => &self.triggers,
            Category::Variable => &self.variables,
            Category::BuiltInVariable => &self.built_in_variables,
        }
    }
}

/// Normalize a raw collection and index it
///
/// **Private** - internal helper for from_raw
fn build_category_index(
    raw_records: &[Value],
    category: Category,
) -> Result<EntityIndex, SnapshotError> {
    let entities = raw_records
        .iter()
        .map(|raw| normalize(raw, category))
        .collect::<Result<Vec<Entity>, _>>()?;

    Ok(EntityIndex::build(category, entities)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_raw() {
        let snapshot = ContainerSnapshot::from_raw(
            "workspace",
            &[json!({"tagId": "1", "name": "t", "type": "html"})],
            &[json!({"triggerId": "5", "name": "All Pages", "type": "pageview"})],
            &[],
            &[json!({"type": "PAGE_URL", "name": "Page URL"})],
        )
        .unwrap();

        assert_eq!(snapshot.label, "workspace");
        assert_eq!(snapshot.tags.len(), 1);
        assert_eq!(snapshot.triggers.len(), 1);
        assert!(snapshot.variables.is_empty());
        assert_eq!(snapshot.index(Category::BuiltInVariable).len(), 1);
    }

    #[test]
    fn test_bad_record_aborts_whole_build() {
        let err = ContainerSnapshot::from_raw(
            "live",
            &[
                json!({"tagId": "1", "name": "ok", "type": "html"}),
                json!({"name": "no id", "type": "html"}),
            ],
            &[],
            &[],
            &[],
        )
        .unwrap_err();

        assert!(matches!(err, SnapshotError::Normalize(_)));
    }
}
