use std::collections::BTreeSet;

/// The in-memory field names that were explicitly present in the most
/// recently decoded document.
///
/// Owned by the record instance, mutated only by the tracked decoder, and
/// fully replaced on each decode — it never accumulates across decodes.
/// A member that is present with a null value is in the set even though
/// the field's value is untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefinedFields(BTreeSet<&'static str>);

impl DefinedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn insert(&mut self, field_name: &'static str) -> bool {
        self.0.insert(field_name)
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.0.contains(field_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<&'static str> for DefinedFields {
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_semantics() {
        let mut fields = DefinedFields::new();
        assert!(fields.insert("a"));
        assert!(!fields.insert("a"));
        assert!(fields.insert("b"));
        assert!(fields.contains("a"));
        assert_eq!(fields.len(), 2);

        fields.clear();
        assert!(fields.is_empty());
        assert!(!fields.contains("a"));
    }

    #[test]
    fn order_independent_equality() {
        let ab = DefinedFields::from_iter(["a", "b"]);
        let ba = DefinedFields::from_iter(["b", "a"]);
        assert_eq!(ab, ba);
        assert_eq!(ab.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
