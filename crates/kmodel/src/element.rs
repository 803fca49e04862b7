use fxhash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Opaque metadata value attached to a model element.
pub type PropertyValue = serde_json::Value;

/// The free-form metadata bag of a model element.
///
/// Keys are unique; writing an existing key replaces its value. The bag can only be
/// changed through the declaration builders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties(FxHashMap<String, PropertyValue>);

impl Properties {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Key-ordered copy, for stable output.
    #[must_use]
    pub fn sorted(&self) -> BTreeMap<String, PropertyValue> {
        self.0.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }

    pub(crate) fn insert(&mut self, key: String, value: PropertyValue) -> Option<PropertyValue> {
        self.0.insert(key, value)
    }
}

/// Anything in the metamodel graph that has an id and carries [`Properties`].
///
/// Element handles compare and hash by [`ModelElement::id`] alone.
pub trait ModelElement {
    fn id(&self) -> &str;

    /// Snapshot of the element's properties.
    fn properties(&self) -> Properties;

    fn property(&self, key: &str) -> Option<PropertyValue> {
        self.properties().get(key).cloned()
    }
}

/// Implements id-based `PartialEq`, `Eq`, `Hash` and `Display` for an element handle.
macro_rules! element_identity {
    ($($ty:ty),+ $(,)?) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.id)
            }
        }
    )+};
}

pub(crate) use element_identity;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let mut properties = Properties::default();
        assert!(properties.insert("max".to_owned(), json!(1)).is_none());
        assert_eq!(properties.insert("max".to_owned(), json!(2)), Some(json!(1)));

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("max"), Some(&json!(2)));
    }

    #[test]
    fn test_sorted_is_key_ordered() {
        let mut properties = Properties::default();
        properties.insert("b".to_owned(), json!(null));
        properties.insert("a".to_owned(), json!("x"));

        let keys: Vec<_> = properties.sorted().into_keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
