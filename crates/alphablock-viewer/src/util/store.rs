use anyhow::Context;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const USER_NAME_KEY: &str = "alpha_block_user_name";

/// Flat string map persisted as JSON. The only thing the dashboard keeps
/// between runs is the operator name.
#[derive(Debug, Clone, Default)]
pub struct NameStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

fn store_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "alphablock")?;
    Some(proj.data_dir().join("store.json"))
}

impl NameStore {
    pub fn open_default() -> Self {
        match store_file_path() {
            Some(path) => Self::open(path),
            None => Self::default(),
        }
    }

    /// Unreadable or corrupt files start empty.
    pub fn open(path: PathBuf) -> Self {
        let values = read_values(&path).unwrap_or_else(|e| {
            tracing::debug!(path = %path.display(), error = %e, "name store unavailable");
            BTreeMap::new()
        });
        Self {
            path: Some(path),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get(USER_NAME_KEY).filter(|s| !s.trim().is_empty())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn set_user_name(&mut self, name: &str) -> anyhow::Result<()> {
        self.set(USER_NAME_KEY, name.trim())
    }

    fn flush(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data directory {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(&self.values).context("failed to encode name store")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write name store {}", path.display()))?;
        Ok(())
    }
}

fn read_values(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read name store {}", path.display()))?;
    serde_json::from_str(&raw).context("failed to decode name store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn user_name_survives_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("store.json");

        let mut store = NameStore::open(path.clone());
        assert_eq!(store.user_name(), None);
        store.set_user_name("  Mara ").expect("save name");

        let reopened = NameStore::open(path);
        assert_eq!(reopened.user_name(), Some("Mara"));
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").expect("write garbage");

        let store = NameStore::open(path);
        assert_eq!(store.get(USER_NAME_KEY), None);
    }

    #[test]
    fn blank_name_counts_as_unset() {
        let dir = tempdir().expect("tempdir");
        let mut store = NameStore::open(dir.path().join("store.json"));
        store.set_user_name("   ").expect("save");
        assert_eq!(store.user_name(), None);
    }
}
