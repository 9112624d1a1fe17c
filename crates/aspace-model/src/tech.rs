//! Technical file metadata produced by a file-characterization tool.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Checksum, size, and tool-reported format of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechMetadataRecord {
    pub checksum: String,
    #[serde(deserialize_with = "size_from_number_or_string")]
    pub filesize: u64,
    #[serde(default)]
    pub format: String,
}

/// Some characterization dumps quote the size.
fn size_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(value) => Ok(value),
        Size::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Technical metadata keyed by raw filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechMetadataTable {
    records: BTreeMap<String, TechMetadataRecord>,
}

impl TechMetadataTable {
    pub fn get(&self, filename: &str) -> Option<&TechMetadataRecord> {
        self.records.get(filename)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, TechMetadataRecord)> for TechMetadataTable {
    fn from_iter<I: IntoIterator<Item = (String, TechMetadataRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
