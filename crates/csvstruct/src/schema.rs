use crate::record::Record;
use std::collections::HashMap;

/// Column set locked from the first record an encoder sees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Derive the columns of `record`.
    ///
    /// Structured records keep declaration order; mapping keys are sorted so
    /// the header does not depend on the map's iteration order. When two
    /// fields resolve to the same name both stay in the header and the later
    /// one owns the name's position.
    pub fn lock(record: &Record) -> Self {
        let columns: Vec<String> = match record {
            Record::Structured(fields) => fields.iter().map(|f| f.name.clone()).collect(),
            Record::Mapping(entries) => {
                let mut keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();
                keys.sort();
                keys
            }
        };

        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            index.insert(name.clone(), position);
        }

        Self { columns, index }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row position of column `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_structured_keeps_declaration_order() {
        let schema = ColumnSchema::lock(&Record::from_fields([
            ("Foo", "a"),
            ("Bar", "b"),
            ("Baz", "c"),
        ]));

        assert_eq!(schema.columns(), ["Foo", "Bar", "Baz"]);
        assert_eq!(schema.position("Bar"), Some(1));
        assert_eq!(schema.position("Qux"), None);
    }

    #[test]
    fn test_mapping_keys_are_sorted() {
        let schema = ColumnSchema::lock(&Record::from_map([
            ("zeta", Value::from(1u8)),
            ("alpha", Value::from(2u8)),
            ("mid", Value::from(3u8)),
        ]));

        assert_eq!(schema.columns(), ["alpha", "mid", "zeta"]);
        assert_eq!(schema.position("zeta"), Some(2));
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let schema = ColumnSchema::lock(&Record::from_fields([("a", 1u8), ("b", 2u8), ("a", 3u8)]));

        assert_eq!(schema.columns(), ["a", "b", "a"]);
        assert_eq!(schema.width(), 3);
        assert_eq!(schema.position("a"), Some(2));
    }

    #[test]
    fn test_empty_record_locks_empty_schema() {
        let schema = ColumnSchema::lock(&Record::Structured(Vec::new()));
        assert!(schema.is_empty());
        assert_eq!(schema.width(), 0);
    }
}
