use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;

use crate::TrimError;

/// A flat localisation table mapping decimal hash strings to display text.
///
/// Entries keep the order they had in the file, so a filtered copy diffs
/// cleanly against its original.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TextMap {
    #[serde(flatten)]
    entries: IndexMap<String, String>,
}

impl TextMap {
    pub fn from_entries(entries: IndexMap<String, String>) -> TextMap {
        TextMap { entries }
    }

    /// Parses the whole file as one flat JSON object of strings.
    pub fn load(path: &Path) -> Result<TextMap, TrimError> {
        let bytes = fs::read(path).map_err(|e| {
            TrimError::file_access(path, format!("Failed to read text map: {}", e))
        })?;

        let entries: IndexMap<String, String> = serde_json::from_slice(&bytes).map_err(|e| {
            TrimError::parse(
                path,
                format!("Text map is not a flat JSON object of strings: {}", e),
            )
        })?;

        Ok(TextMap { entries })
    }

    /// Returns a new map holding exactly the entries whose key is in `keys`,
    /// in their original relative order. Values are carried over untouched.
    pub fn retain_keys(&self, keys: &HashSet<String>) -> TextMap {
        TextMap {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| keys.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Overwrites `path` with the map, pretty-printed with 2-space indentation.
    /// Non-ASCII text is written as-is rather than `\u` escaped.
    pub fn write(&self, path: &Path) -> Result<(), TrimError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| {
            TrimError::file_access(path, format!("Failed to serialise text map: {}", e))
        })?;

        fs::write(path, bytes).map_err(|e| {
            TrimError::file_access(path, format!("Failed to write filtered text map: {}", e))
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }
}

/// Copies the text map to `<path><suffix>`, overwriting any previous backup.
/// On success the original bytes are safely on disk before any filtering write.
pub fn back_up(path: &Path, suffix: &str) -> Result<PathBuf, TrimError> {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    let backup_path = PathBuf::from(name);

    fs::copy(path, &backup_path).map_err(|e| {
        TrimError::file_access(
            path,
            format!(
                "Failed to back up text map to {}: {}",
                backup_path.display(),
                e
            ),
        )
    })?;

    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn sample() -> TextMap {
        TextMap::from_entries(IndexMap::from([
            ("100".to_string(), "Sword".to_string()),
            ("200".to_string(), "Shield".to_string()),
            ("300".to_string(), "Bow".to_string()),
        ]))
    }

    #[test]
    fn retain_keeps_the_intersection_in_original_order() {
        let keys = HashSet::from(["300".to_string(), "100".to_string(), "999".to_string()]);

        let filtered = sample().retain_keys(&keys);

        let entries: Vec<_> = filtered.entries().iter().collect();
        assert_eq!(
            entries,
            vec![
                (&"100".to_string(), &"Sword".to_string()),
                (&"300".to_string(), &"Bow".to_string()),
            ]
        );
    }

    #[test]
    fn retain_with_no_keys_yields_an_empty_map() {
        assert!(sample().retain_keys(&HashSet::new()).is_empty());
    }

    #[test]
    fn written_file_is_indented_and_unescaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TextMapFR.json");

        let map = TextMap::from_entries(IndexMap::from([(
            "100".to_string(),
            "Épée à deux mains".to_string(),
        )]));
        map.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"100\": \"Épée à deux mains\"\n}");
    }

    #[test]
    fn load_rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TextMapEN.json");

        fs::write(&path, r#"{ "100": 42 }"#).unwrap();

        let err = TextMap::load(&path).unwrap_err();
        assert!(matches!(err, TrimError::Parse { .. }));
    }

    #[test]
    fn load_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TextMapEN.json");

        fs::write(&path, r#"{ "300": "Bow", "100": "Sword" }"#).unwrap();

        let map = TextMap::load(&path).unwrap();
        let keys: Vec<_> = map.entries().keys().collect();
        assert_eq!(keys, vec!["300", "100"]);
    }

    #[test]
    fn back_up_overwrites_a_stale_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TextMapEN.json");

        fs::write(&path, "{}").unwrap();
        fs::write(dir.path().join("TextMapEN.json.bak"), "stale").unwrap();

        let backup = back_up(&path, ".bak").unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{}");
    }

    #[test]
    fn back_up_of_a_missing_file_fails() {
        let dir = TempDir::new().unwrap();

        let err = back_up(&dir.path().join("gone.json"), ".bak").unwrap_err();
        assert!(matches!(err, TrimError::FileAccess { .. }));
    }
}
