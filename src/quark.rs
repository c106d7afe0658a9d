use std::collections::HashMap;

/// Bidirectional mapping between symbols and dense indices.
pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered alphabet of distinct symbols.
///
/// Symbols keep the index they were first inserted with, so the order of a
/// quark fixes the rows and columns of every matrix built over it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl From<Vec<String>> for Quark {
    fn from(value: Vec<String>) -> Self {
        let mut quark = Self::default();
        for s in value {
            quark.find_or_insert(&s);
        }
        quark
    }
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl Quark {
    /// Returns the id of `key`, appending it when it is not known yet.
    pub fn find_or_insert(&mut self, key: &str) -> usize {
        if let Some(&id) = self.m.get(key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.to_string(), id);
        self.v.push(key.to_string());
        id
    }

    /// Appends `key` and returns its id, or `None` if it was already present.
    pub fn insert(&mut self, key: &str) -> Option<usize> {
        if self.m.contains_key(key) {
            return None;
        }
        Some(self.find_or_insert(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_str() {
        let mut quark = Quark::default();
        for (s, id) in [("det", 0), ("rp", 1), ("vn", 2), ("v", 3), ("vn", 2), ("rp", 1), ("det", 0), ("n", 4)] {
            assert_eq!(id, quark.find_or_insert(s), "{} != {}", s, id);
        }
        assert_eq!(quark.len(), 5);
    }

    #[test]
    fn find_by_id() {
        let mut quark = Quark::default();
        quark.find_or_insert("det");
        quark.find_or_insert("period");
        assert_eq!(quark.to_str(0), Some("det"));
        assert_eq!(quark.to_str(1), Some("period"));
        assert_eq!(quark.to_str(2), None);
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut quark = Quark::default();
        assert_eq!(quark.insert("n"), Some(0));
        assert_eq!(quark.insert("n"), None);
        assert_eq!(quark.insert("v"), Some(1));
    }

    #[test]
    fn empty() {
        let quark = Quark::default();
        assert!(quark.is_empty());
        assert_eq!(quark.to_str(0), None);
    }

    #[test]
    fn from_vec_keeps_order() {
        let quark = Quark::from(vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(quark.len(), 2);
        assert_eq!(quark.to_str(0), Some("b"));
        assert_eq!(quark.to_id("a"), Some(1));
    }
}
