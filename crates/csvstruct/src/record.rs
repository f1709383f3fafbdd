use crate::value::Value;

/// A named field of a structured record, already resolved to its column name
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// One input to the encoder
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Fixed field set in declaration order
    Structured(Vec<Field>),

    /// Dynamic key/value map, in whatever order the source yielded it
    Mapping(Vec<(String, Value)>),
}

impl Record {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Record::Structured(
            fields
                .into_iter()
                .map(|(name, value)| Field {
                    name: name.into(),
                    value: value.into(),
                })
                .collect(),
        )
    }

    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Record::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Iterate `(name, value)` pairs regardless of record kind
    pub fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Record::Structured(fields) => Box::new(
                fields
                    .iter()
                    .map(|field| (field.name.as_str(), &field.value)),
            ),
            Record::Mapping(entries) => {
                Box::new(entries.iter().map(|(key, value)| (key.as_str(), value)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_fields_keeps_order() {
        let record = Record::from_fields([("b", 1u8), ("a", 2u8)]);
        let names: Vec<&str> = record.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_from_map_converts_values() {
        let mut map = HashMap::new();
        map.insert("id", Value::from(1u32));
        map.insert("name", Value::from("x"));

        let record = Record::from_map(map);
        assert!(matches!(record, Record::Mapping(_)));
        assert_eq!(record.entries().count(), 2);
        assert!(record
            .entries()
            .any(|(k, v)| k == "name" && *v == Value::Text("x".to_string())));
    }
}
