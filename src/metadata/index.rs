//! Identifier → field metadata lookup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LoadError, LoadResult};

/// Whether an index entry names a dimension (or level) or a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Dimension,
    Measure,
}

/// Descriptive attributes of one identifier in the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMeta {
    pub id: String,
    /// Display or level name used inside bracketed paths.
    pub name: String,
    /// Parent hierarchy name; equals `name` unless this is a sub-level.
    pub object_name: String,
    /// `name` denotes a level beneath `object_name`.
    pub is_level: bool,
    /// Time granularity marker (year, month, day...), never empty when set.
    pub time_level: Option<String>,
    /// Sample members, used only for the cube outline.
    pub members: Vec<String>,
    pub kind: FieldKind,
}

impl DimensionMeta {
    /// A top-level dimension whose object and level share one name.
    pub fn dimension(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            object_name: name.into(),
            is_level: false,
            time_level: None,
            members: vec![],
            kind: FieldKind::Dimension,
        }
    }

    /// A level named `name` beneath the hierarchy `object_name`.
    pub fn level(id: &str, object_name: &str, name: &str) -> Self {
        Self {
            object_name: object_name.into(),
            is_level: true,
            ..Self::dimension(id, name)
        }
    }

    pub fn measure(id: &str, name: &str) -> Self {
        Self {
            kind: FieldKind::Measure,
            ..Self::dimension(id, name)
        }
    }

    pub fn with_time_level(mut self, time_level: &str) -> Self {
        self.time_level = (!time_level.is_empty()).then(|| time_level.to_string());
        self
    }

    pub fn with_members(mut self, members: &[&str]) -> Self {
        self.members = members.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn is_time(&self) -> bool {
        self.time_level.is_some()
    }

    pub fn is_measure(&self) -> bool {
        self.kind == FieldKind::Measure
    }

    /// `(dimension, level)` names used for member restrictions.
    pub fn member_scope(&self) -> (&str, &str) {
        if self.is_level {
            (&self.object_name, &self.name)
        } else {
            (&self.name, &self.name)
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

/// The field listing document returned by the BI service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FieldDocument {
    #[serde(default)]
    pub dimension: Vec<RawField>,
    #[serde(default)]
    pub measure: Vec<RawField>,
}

/// One field as it appears on the wire.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawField {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "objectName", alias = "object_name")]
    pub object_name: Option<String>,
    #[serde(default, rename = "is_level", alias = "isLevel")]
    pub is_level: bool,
    #[serde(default, rename = "timeLevel", alias = "time_level")]
    pub time_level: Option<String>,
    #[serde(default, rename = "member", alias = "members")]
    pub members: Vec<String>,
}

impl RawField {
    fn into_meta(self, kind: FieldKind) -> DimensionMeta {
        let object_name = self
            .object_name
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| self.name.clone());
        DimensionMeta {
            id: self.id,
            name: self.name,
            object_name,
            is_level: self.is_level,
            time_level: self.time_level.filter(|t| !t.is_empty()),
            members: self.members,
            kind,
        }
    }
}

// =============================================================================
// Index
// =============================================================================

/// Read-only lookup from identifier to [`DimensionMeta`].
///
/// Entries keep their insertion order so the cube outline is stable.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    entries: Vec<DimensionMeta>,
    by_id: HashMap<String, usize>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, meta: DimensionMeta) {
        match self.by_id.get(&meta.id) {
            Some(&pos) => self.entries[pos] = meta,
            None => {
                self.by_id.insert(meta.id.clone(), self.entries.len());
                self.entries.push(meta);
            }
        }
    }

    pub fn with(mut self, meta: DimensionMeta) -> Self {
        self.insert(meta);
        self
    }

    pub fn from_document(doc: FieldDocument) -> Self {
        let mut index = Self::new();
        for field in doc.dimension {
            index.insert(field.into_meta(FieldKind::Dimension));
        }
        for field in doc.measure {
            index.insert(field.into_meta(FieldKind::Measure));
        }
        index
    }

    pub fn from_json(json: &str) -> LoadResult<Self> {
        let doc: FieldDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn get(&self, id: &str) -> Option<&DimensionMeta> {
        self.by_id.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// True when `id` resolves to a time-bearing entry.
    pub fn is_time(&self, id: &str) -> bool {
        self.get(id).is_some_and(DimensionMeta::is_time)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionMeta> {
        self.entries.iter().filter(|m| !m.is_measure())
    }

    pub fn measures(&self) -> impl Iterator<Item = &DimensionMeta> {
        self.entries.iter().filter(|m| m.is_measure())
    }
}
