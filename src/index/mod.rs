//! Entity indexes with key set algebra.
//!
//! An index maps identity keys to entities for one category of one
//! container version. Building detects identity collisions instead of
//! silently merging them: a duplicate signals a corrupt fetch.

use crate::normalizer::schema::{Category, Entity};
use crate::utils::error::IndexError;
use std::collections::BTreeMap;

/// Immutable lookup structure over one entity collection
#[derive(Debug, Clone)]
pub struct EntityIndex {
    category: Category,
    entities: BTreeMap<String, Entity>,
}

impl EntityIndex {
    /// Build an index from normalized entities
    ///
    /// # Errors
    /// * `IndexError::DuplicateIdentity` - Two entities share an identity key
    /// * `IndexError::CategoryMismatch` - An entity belongs to a different
    ///   category than the index
    pub fn build(category: Category, entities: Vec<Entity>) -> Result<Self, IndexError> {
        let mut map = BTreeMap::new();

        for entity in entities {
            if entity.category != category {
                return Err(IndexError::CategoryMismatch {
                    expected: category,
                    found: entity.category,
                });
            }
            let key = entity.identity_key.clone();
            if map.insert(key.clone(), entity).is_some() {
                return Err(IndexError::DuplicateIdentity {
                    category,
                    identity_key: key,
                });
            }
        }

        Ok(EntityIndex {
            category,
            entities: map,
        })
    }

    /// Build an empty index for a category
    pub fn empty(category: Category) -> Self {
        EntityIndex {
            category,
            entities: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Identity keys in lexicographic order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn get(&self, identity_key: &str) -> Option<&Entity> {
        self.entities.get(identity_key)
    }

    pub fn contains_key(&self, identity_key: &str) -> bool {
        self.entities.contains_key(identity_key)
    }

    /// Entities in key order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Keys present in self but absent in other, in lexicographic order
    pub fn keys_only_in_self(&self, other: &EntityIndex) -> Vec<String> {
        self.entities
            .keys()
            .filter(|k| !other.contains_key(k))
            .cloned()
            .collect()
    }

    /// Keys present in other but absent in self, in lexicographic order
    pub fn keys_only_in_other(&self, other: &EntityIndex) -> Vec<String> {
        other.keys_only_in_self(self)
    }

    /// Keys present in both indexes, in lexicographic order
    pub fn keys_in_both(&self, other: &EntityIndex) -> Vec<String> {
        self.entities
            .keys()
            .filter(|k| other.contains_key(k))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn tag(id: &str, name: &str) -> Entity {
        normalize(
            &json!({"tagId": id, "name": name, "type": "html"}),
            Category::Tag,
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let err = EntityIndex::build(Category::Tag, vec![tag("1", "a"), tag("1", "b")]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DuplicateIdentity { identity_key, .. } if identity_key == "1"
        ));
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let err = EntityIndex::build(Category::Trigger, vec![tag("1", "a")]).unwrap_err();
        assert!(matches!(err, IndexError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_set_algebra() {
        let a = EntityIndex::build(Category::Tag, vec![tag("1", "a"), tag("2", "b")]).unwrap();
        let b = EntityIndex::build(Category::Tag, vec![tag("2", "b"), tag("3", "c")]).unwrap();

        assert_eq!(a.keys_only_in_self(&b), vec!["1"]);
        assert_eq!(a.keys_only_in_other(&b), vec!["3"]);
        assert_eq!(b.keys_only_in_self(&a), vec!["3"]);
        assert_eq!(a.keys_in_both(&b), vec!["2"]);
    }

    #[test]
    fn test_keys_sorted() {
        let idx = EntityIndex::build(
            Category::Tag,
            vec![tag("10", "x"), tag("2", "y"), tag("1", "z")],
        )
        .unwrap();
        let keys: Vec<&str> = idx.keys().collect();
        assert_eq!(keys, vec!["1", "10", "2"]);
    }
}
