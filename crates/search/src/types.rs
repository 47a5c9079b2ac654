//! Result record types.
//!
//! A search hit is a loosely-typed JSON object. No field is guaranteed to be
//! present, and `skillsets` arrives in several shapes depending on how the
//! source document was authored. `Skillsets::from_value` is the only place
//! that shape is resolved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names of the RFP index.
pub mod fields {
    pub const PROJECT_NAME: &str = "projectName";
    pub const FUNCTIONAL_REQUIREMENTS: &str = "functionalRequirements";
    pub const NON_FUNCTIONAL_REQUIREMENTS: &str = "nonFunctionalRequirements";
    pub const TECHNICAL_REQUIREMENTS: &str = "technicalRequirements";
    pub const IMPORTANCE: &str = "importance";
    pub const SKILLSETS: &str = "skillsets";
    pub const CHUNK: &str = "chunk";

    /// Relevance score attached by the search service.
    pub const SEARCH_SCORE: &str = "@search.score";
}

/// Fields fetched when the caller does not choose.
pub const DEFAULT_SELECT: [&str; 7] = [
    fields::PROJECT_NAME,
    fields::FUNCTIONAL_REQUIREMENTS,
    fields::NON_FUNCTIONAL_REQUIREMENTS,
    fields::TECHNICAL_REQUIREMENTS,
    fields::IMPORTANCE,
    fields::SKILLSETS,
    fields::CHUNK,
];

/// One search hit, or an externally supplied document of the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord(Map<String, Value>);

impl ResultRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a plain-text document that did not come from the index.
    ///
    /// The name becomes the project name and the text becomes the chunk.
    pub fn document(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new()
            .with_field(fields::PROJECT_NAME, name.into())
            .with_field(fields::CHUNK, text.into())
    }

    /// Set a field, replacing any previous value.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Display text of a field; empty when absent or null.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(value_text).unwrap_or_default()
    }

    /// Normalized skillsets of this record.
    pub fn skillsets(&self) -> Skillsets {
        Skillsets::from_value(self.get(fields::SKILLSETS))
    }

    /// Relevance score assigned by the search service, if any.
    pub fn score(&self) -> Option<f64> {
        self.get(fields::SEARCH_SCORE).and_then(Value::as_f64)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ResultRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The shapes a skillsets field can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skillsets {
    /// Field missing or null
    Absent,

    /// A single string, or the string form of a scalar
    Single(String),

    /// A list of skills
    List(Vec<String>),
}

impl Skillsets {
    /// Resolve a raw field value.
    ///
    /// - string: one skill
    /// - null or absent: no skills
    /// - array: its elements
    /// - object: its keys (any other iterable is materialized)
    /// - number or bool: one skill holding its string form
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Skillsets::Absent,
            Some(Value::String(skill)) => Skillsets::Single(skill.clone()),
            Some(Value::Array(items)) => Skillsets::List(items.iter().map(value_text).collect()),
            Some(Value::Object(map)) => Skillsets::List(map.keys().cloned().collect()),
            Some(scalar) => Skillsets::Single(scalar.to_string()),
        }
    }

    /// Skills as a list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Skillsets::Absent => Vec::new(),
            Skillsets::Single(skill) => vec![skill],
            Skillsets::List(skills) => skills,
        }
    }

    /// Skills joined for display.
    pub fn joined(&self) -> String {
        match self {
            Skillsets::Absent => String::new(),
            Skillsets::Single(skill) => skill.clone(),
            Skillsets::List(skills) => skills.join(", "),
        }
    }
}

/// Display text of a JSON value.
///
/// Strings are shown verbatim, null as empty text, arrays as their elements
/// joined with `", "`. Numbers, booleans and objects use their JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ResultRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_skillsets_string_becomes_single() {
        let rec = record(json!({"skillsets": "Java"}));
        assert_eq!(rec.skillsets(), Skillsets::Single("Java".to_string()));
        assert_eq!(rec.skillsets().into_vec(), vec!["Java".to_string()]);
    }

    #[test]
    fn test_skillsets_absent_and_null_are_empty() {
        assert_eq!(record(json!({})).skillsets(), Skillsets::Absent);
        assert_eq!(record(json!({"skillsets": null})).skillsets(), Skillsets::Absent);
        assert!(Skillsets::Absent.into_vec().is_empty());
        assert_eq!(Skillsets::Absent.joined(), "");
    }

    #[test]
    fn test_skillsets_list_kept_in_order() {
        let rec = record(json!({"skillsets": ["Kubernetes", "Go", "PostgreSQL"]}));
        assert_eq!(
            rec.skillsets().into_vec(),
            vec!["Kubernetes", "Go", "PostgreSQL"]
        );
        assert_eq!(rec.skillsets().joined(), "Kubernetes, Go, PostgreSQL");
    }

    #[test]
    fn test_skillsets_object_materializes_keys() {
        let rec = record(json!({"skillsets": {"Rust": 3, "Python": 5}}));
        let mut skills = rec.skillsets().into_vec();
        skills.sort();
        assert_eq!(skills, vec!["Python", "Rust"]);
    }

    #[test]
    fn test_skillsets_scalar_uses_string_form() {
        assert_eq!(
            record(json!({"skillsets": 42})).skillsets(),
            Skillsets::Single("42".to_string())
        );
        assert_eq!(
            record(json!({"skillsets": true})).skillsets().into_vec(),
            vec!["true"]
        );
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!("plain")), "plain");
        assert_eq!(value_text(&json!(0.8)), "0.8");
        assert_eq!(value_text(&json!(["a", "b"])), "a, b");
        assert_eq!(value_text(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_record_accessors() {
        let rec = record(json!({
            "@search.score": 2.5,
            "projectName": "차세대 시스템",
            "importance": 0.9
        }));

        assert_eq!(rec.score(), Some(2.5));
        assert_eq!(rec.text(fields::PROJECT_NAME), "차세대 시스템");
        assert_eq!(rec.text(fields::IMPORTANCE), "0.9");
        assert_eq!(rec.text(fields::CHUNK), "");
    }

    #[test]
    fn test_external_document() {
        let rec = ResultRecord::document("notes.txt", "입찰일자: 2024-05-01");
        assert_eq!(rec.text(fields::PROJECT_NAME), "notes.txt");
        assert_eq!(rec.text(fields::CHUNK), "입찰일자: 2024-05-01");
        assert_eq!(rec.skillsets(), Skillsets::Absent);
        assert_eq!(rec.as_map().len(), 2);
    }

    #[test]
    fn test_non_object_does_not_deserialize() {
        assert!(serde_json::from_value::<ResultRecord>(json!(["not", "a", "map"])).is_err());
    }
}
