use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ManifestError;

pub const TITLE_KEY: &str = "title";
pub const FILE_LINK_KEY: &str = "file_link";
pub const ID_KEY: &str = "id";

/// One bibliographic entry. Fields other than `title`, `file_link` and `id`
/// are carried through untouched and in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperRecord(Map<String, Value>);

impl PaperRecord {
    pub fn title(&self) -> Option<&str> {
        self.0.get(TITLE_KEY).and_then(Value::as_str)
    }

    /// Presence is all that matters; a `null` link still counts.
    pub fn has_file_link(&self) -> bool {
        self.0.contains_key(FILE_LINK_KEY)
    }

    pub fn id(&self) -> Option<u64> {
        self.0.get(ID_KEY).and_then(Value::as_u64)
    }

    pub fn set_id(&mut self, id: u64) {
        self.0.insert(ID_KEY.to_string(), Value::from(id));
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PaperRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    records: Vec<PaperRecord>,
}

impl Manifest {
    pub fn new(records: Vec<PaperRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [PaperRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn linked_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_file_link()).count()
    }
}

fn manifest_from_value(path: &Path, value: Value) -> Result<Manifest, ManifestError> {
    let Value::Array(items) = value else {
        return Err(ManifestError::shape(path, "top-level value is not an array"));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(fields) => records.push(PaperRecord::from(fields)),
            other => {
                return Err(ManifestError::shape(
                    path,
                    format!("entry {index} is {}, expected an object", json_kind(&other)),
                ));
            }
        }
    }
    Ok(Manifest::new(records))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn parse_manifest(path: &Path, raw: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    manifest_from_value(path, value)
}

pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|err| ManifestError::io(path, err))?;
    let manifest = parse_manifest(path, &raw)?;
    tracing::debug!(path = %path.display(), records = manifest.len(), "manifest loaded");
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_records_in_file_order() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("paper_data.json");
        fs::write(
            &path,
            r#"[{"title":"Zeta","file_link":"z"},{"title":"Alpha"},{"title":"Mu","file_link":null}]"#,
        )
        .expect("write manifest");

        let manifest = load_manifest(&path).expect("load");
        let titles: Vec<_> = manifest.records().iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec![Some("Zeta"), Some("Alpha"), Some("Mu")]);
        assert!(manifest.records()[0].has_file_link());
        assert!(!manifest.records()[1].has_file_link());
        assert!(manifest.records()[2].has_file_link());
        assert_eq!(manifest.linked_count(), 2);
    }

    #[test]
    fn empty_array_is_an_empty_manifest() {
        let manifest = parse_manifest(Path::new("m.json"), "[]").expect("parse");
        assert!(manifest.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempdir().expect("tempdir");
        let err = load_manifest(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_manifest(Path::new("m.json"), "[{\"title\": ").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn non_array_top_level_is_shape_error() {
        let err = parse_manifest(Path::new("m.json"), r#"{"title":"A"}"#).unwrap_err();
        assert!(matches!(err, ManifestError::Shape { .. }));
    }

    #[test]
    fn non_object_entry_names_its_index() {
        let err = parse_manifest(Path::new("m.json"), r#"[{"title":"A"}, 7]"#).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("entry 1 is a number"), "{text}");
    }

    #[test]
    fn field_order_survives_round_trip() {
        let raw = r#"[{"zeta":1,"title":"T","alpha":[1,2]}]"#;
        let manifest = parse_manifest(Path::new("m.json"), raw).expect("parse");
        let keys: Vec<_> = manifest.records()[0].fields().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "title", "alpha"]);
        assert_eq!(serde_json::to_string(&manifest).expect("encode"), raw);
    }

    #[test]
    fn set_id_overwrites_in_place() {
        let raw = r#"[{"id":"old","title":"T"}]"#;
        let mut manifest = parse_manifest(Path::new("m.json"), raw).expect("parse");
        manifest.records_mut()[0].set_id(9);
        assert_eq!(manifest.records()[0].id(), Some(9));
        let keys: Vec<_> = manifest.records()[0].fields().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "title"]);
    }
}
