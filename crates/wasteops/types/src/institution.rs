//! Institution reference list
//!
//! The directory service hands out `{id, name, short_name}` records, either as
//! a bare array or as a paginated page with a `results` array. The only
//! invariant enforced here is uniqueness of `id`.

use crate::error::{Result, TypesError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Institution identifier assigned by the directory service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(i64);

impl InstitutionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One institution as reported by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRef {
    pub id: InstitutionId,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

impl InstitutionRef {
    pub fn new(id: i64, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: InstitutionId::new(id),
            name: name.into(),
            short_name: short_name.into(),
        }
    }

    /// Label shown in the associated-institution selector
    pub fn label(&self) -> String {
        if self.short_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.short_name, self.name)
        }
    }
}

/// Selector entry derived from an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionOption {
    pub value: InstitutionId,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectoryPayload {
    List(Vec<InstitutionRef>),
    Page { results: Vec<InstitutionRef> },
}

/// Institution reference list with unique ids, in directory order
#[derive(Debug, Clone, Default)]
pub struct InstitutionDirectory {
    records: Vec<InstitutionRef>,
    by_id: HashMap<InstitutionId, usize>,
}

impl InstitutionDirectory {
    /// Build a directory, rejecting duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = InstitutionRef>) -> Result<Self> {
        let mut directory = Self::default();
        for record in records {
            if directory.by_id.contains_key(&record.id) {
                return Err(TypesError::DuplicateInstitution {
                    id: record.id.value(),
                });
            }
            directory.by_id.insert(record.id, directory.records.len());
            directory.records.push(record);
        }
        tracing::debug!(count = directory.records.len(), "institution directory loaded");
        Ok(directory)
    }

    /// Decode a directory response (bare array or paginated page)
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: DirectoryPayload =
            serde_json::from_str(json).map_err(|e| TypesError::InvalidPayload {
                reason: e.to_string(),
            })?;
        let records = match payload {
            DirectoryPayload::List(records) => records,
            DirectoryPayload::Page { results } => results,
        };
        Self::from_records(records)
    }

    pub fn get(&self, id: InstitutionId) -> Option<&InstitutionRef> {
        self.by_id.get(&id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstitutionRef> {
        self.records.iter()
    }

    /// Selector entries, in directory order
    pub fn options(&self) -> Vec<InstitutionOption> {
        self.records
            .iter()
            .map(|record| InstitutionOption {
                value: record.id,
                label: record.label(),
            })
            .collect()
    }
}
