//! Book records as supplied by the catalog.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a book. Only ever used as a row key, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(value) => fmt::Display::fmt(value, f),
            BookId::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for BookId {
    fn from(value: u64) -> Self {
        BookId::Number(value.into())
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        BookId::Text(value.to_string())
    }
}

/// A single entry of the catalog. Absent or `null` text fields deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl BookRecord {
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_display_verbatim() {
        let records: Vec<BookRecord> = serde_json::from_str(
            r#"[{"id": 7, "title": "A"}, {"id": "isbn-0441013597", "title": "B"}]"#,
        )
        .expect("valid records");

        assert_eq!(records[0].id.to_string(), "7");
        assert_eq!(records[1].id.to_string(), "isbn-0441013597");
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let record: BookRecord = serde_json::from_str(r#"{"id": 1}"#).expect("valid record");
        assert_eq!(record, BookRecord::new(1, "", "", ""));
    }

    #[test]
    fn null_text_fields_default_to_empty() {
        let record: BookRecord = serde_json::from_str(
            r#"{"id": 1, "title": "Dune", "author": null, "description": null}"#,
        )
        .expect("valid record");
        assert_eq!(record, BookRecord::new(1, "Dune", "", ""));
    }

    #[test]
    fn missing_id_is_rejected() {
        let result = serde_json::from_str::<BookRecord>(r#"{"title": "Dune"}"#);
        assert!(result.is_err());
    }
}
