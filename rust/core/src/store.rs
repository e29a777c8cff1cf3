// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object Store - keyword-indexed record storage
//!
//! Built in one pass over the file. Records of one keyword keep file order,
//! which "first match wins" lookups downstream rely on. The store is
//! immutable once built; a missing keyword simply has zero records.

use crate::error::{Error, Result};
use crate::fast_parse::parse_f64;
use crate::parser::{parse_statement, strip_comments, StatementScanner};
use crate::schema::IdfType;
use rustc_hash::FxHashMap;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One IDF object: its field values after the keyword
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObjectRecord {
    fields: Vec<String>,
}

impl ObjectRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Get field by index (0 is the field right after the keyword)
    #[inline]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field as text, empty string when out of range
    #[inline]
    pub fn text(&self, index: usize) -> &str {
        self.field(index).unwrap_or("")
    }

    /// Field parsed as a number
    #[inline]
    pub fn number(&self, index: usize) -> Option<f64> {
        self.field(index).and_then(parse_f64)
    }

    /// First field, which is the object name for nearly every type
    #[inline]
    pub fn name(&self) -> &str {
        self.text(0)
    }

    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Fields from `start` to the end (empty when out of range)
    #[inline]
    pub fn fields_from(&self, start: usize) -> &[String] {
        self.fields.get(start..).unwrap_or(&[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Keyword → ordered records
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: FxHashMap<String, Vec<ObjectRecord>>,
    /// Keywords in order of first appearance
    order: Vec<String>,
}

impl ObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from IDF text
    ///
    /// Never fails: statements that are empty after comment stripping are
    /// dropped, everything else becomes a record however many fields it has.
    pub fn from_text(content: &str) -> Self {
        let content = strip_comments(content);

        // Distinct keywords grow slowly with file size
        let mut store = ObjectStore {
            objects: FxHashMap::with_capacity_and_hasher(content.len() / 4096 + 16, Default::default()),
            order: Vec::new(),
        };

        for statement in StatementScanner::new(&content) {
            let Some(fields) = parse_statement(statement) else {
                continue;
            };
            let Some((keyword, values)) = fields.split_first() else {
                continue;
            };
            let record = ObjectRecord::new(values.iter().map(|v| (*v).to_string()).collect());
            store.insert(keyword.to_ascii_uppercase(), record);
        }

        store
    }

    /// Append a record under an (already uppercase) keyword
    pub fn insert(&mut self, keyword: String, record: ObjectRecord) {
        match self.objects.get_mut(&keyword) {
            Some(records) => records.push(record),
            None => {
                self.order.push(keyword.clone());
                self.objects.insert(keyword, vec![record]);
            }
        }
    }

    /// Records for a keyword (case-insensitive), empty slice if absent
    pub fn get(&self, keyword: &str) -> &[ObjectRecord] {
        if let Some(records) = self.objects.get(keyword) {
            return records;
        }
        if keyword.bytes().any(|b| b.is_ascii_lowercase()) {
            if let Some(records) = self.objects.get(&keyword.to_ascii_uppercase()) {
                return records;
            }
        }
        &[]
    }

    /// Records of a known object type
    #[inline]
    pub fn of(&self, ty: IdfType) -> &[ObjectRecord] {
        self.get(ty.as_str())
    }

    /// Whether at least one record of the keyword exists
    pub fn contains(&self, keyword: &str) -> bool {
        !self.get(keyword).is_empty()
    }

    /// Whether at least one record of a known type exists
    #[inline]
    pub fn has(&self, ty: IdfType) -> bool {
        !self.of(ty).is_empty()
    }

    /// Whether any of the types has at least one record
    pub fn has_any(&self, types: &[IdfType]) -> bool {
        types.iter().any(|ty| self.has(*ty))
    }

    /// Keywords in order of first appearance
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of records over all keywords
    pub fn record_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }
}

/// Tokenize IDF text into an object store
pub fn parse(content: &str) -> ObjectStore {
    ObjectStore::from_text(content)
}

/// Read and tokenize an IDF file
///
/// The only fatal condition is failing to read the file; a missing path is
/// reported as [`Error::FileNotFound`]. Invalid UTF-8 is decoded lossily.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ObjectStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(ObjectStore::from_text(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_record_fields() {
        let store = parse("ZONE, Z1, , , , , ,1,,100;");
        let zones = store.get("ZONE");
        assert_eq!(zones.len(), 1);
        assert_eq!(
            zones[0].fields(),
            &["Z1", "", "", "", "", "", "1", "", "100"]
        );
    }

    #[test]
    fn test_comments_and_whitespace_only() {
        let store = parse("! header\n   \n!- nothing here ;\n\t;;  ; \n");
        assert!(store.is_empty());
        assert_eq!(store.record_count(), 0);
    }

    #[test]
    fn test_keywords_uppercased_and_ordered() {
        let store = parse(
            "Zone, A;\nLights, L1, A;\nzone, B; ! second zone\nBuildingSurface:Detailed, S1;",
        );
        let keywords: Vec<&str> = store.keywords().collect();
        assert_eq!(keywords, vec!["ZONE", "LIGHTS", "BUILDINGSURFACE:DETAILED"]);

        let names: Vec<&str> = store.get("Zone").iter().map(ObjectRecord::name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(store.contains("lights"));
        assert!(store.has(IdfType::Lights));
        assert!(!store.has_any(&[IdfType::People, IdfType::GasEquipment]));
        assert!(!store.contains("PEOPLE"));
        assert!(store.get("PEOPLE").is_empty());
    }

    #[test]
    fn test_multiline_object_with_comments() {
        let text = "\
People,
  Office People,           !- Name
  Office,                  !- Zone or ZoneList Name
  Occupancy Sch,           !- Number of People Schedule Name
  People/Area,             !- Number of People Calculation Method
  ,                        !- Number of People
  0.05;                    !- People per Zone Floor Area {person/m2}
";
        let store = parse(text);
        let people = &store.get("PEOPLE")[0];
        assert_eq!(people.name(), "Office People");
        assert_eq!(people.text(3), "People/Area");
        assert_eq!(people.text(4), "");
        assert_eq!(people.number(5), Some(0.05));
        assert_eq!(people.field(6), None);
        assert_eq!(people.text(6), "");
    }

    #[test]
    fn test_keyword_only_object() {
        let store = parse("SimulationControl;");
        assert_eq!(store.get("SIMULATIONCONTROL").len(), 1);
        assert!(store.get("SIMULATIONCONTROL")[0].is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/definitely/not/here.idf").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("idf-lite-core-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.idf");
        std::fs::write(&path, b"Zone, Core, 0;\nLights, L, Core;\n").unwrap();

        let store = parse_file(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.record_count(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
