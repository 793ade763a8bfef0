use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;

use crate::TrimError;

/// A single record from an excel config table. Only the localisation hash is
/// of interest here; serde ignores every other field.
#[derive(Debug, Deserialize)]
pub struct ConfigRecord {
    #[serde(rename = "nameTextMapHash")]
    pub name_text_map_hash: Option<TextMapHash>,
}

/// The `nameTextMapHash` field as it appears in the wild: usually a JSON
/// number, occasionally already a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextMapHash {
    Number(serde_json::Number),
    Text(String),
}

impl TextMapHash {
    /// The string form used as a key into the text map.
    pub fn to_key(&self) -> String {
        match self {
            TextMapHash::Number(num) => num.to_string(),
            TextMapHash::Text(text) => text.clone(),
        }
    }
}

/// Collects the string form of every `nameTextMapHash` present in the given
/// config table. Records without the field contribute nothing.
pub fn extract_hashes(path: &Path) -> Result<HashSet<String>, TrimError> {
    let bytes = fs::read(path).map_err(|e| {
        TrimError::file_access(path, format!("Failed to read config table: {}", e))
    })?;

    let records: Vec<ConfigRecord> = serde_json::from_slice(&bytes).map_err(|e| {
        TrimError::parse(
            path,
            format!("Config table is not a JSON array of records: {}", e),
        )
    })?;

    Ok(records
        .into_iter()
        .filter_map(|record| record.name_text_map_hash)
        .map(|hash| hash.to_key())
        .collect())
}
