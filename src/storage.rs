use crate::tasklist::TasklistData;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file persistence for the whole data set
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load data from disk; a missing or empty file yields empty data
    pub fn load(&self) -> Result<TasklistData> {
        if !self.file_path.exists() {
            tracing::debug!(path = %self.file_path.display(), "data file missing, starting empty");
            return Ok(TasklistData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data: TasklistData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        tracing::debug!(
            path = %self.file_path.display(),
            tasks = data.task_count(),
            "loaded data file"
        );
        Ok(data)
    }

    pub fn save(&self, data: &TasklistData) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        tracing::debug!(path = %self.file_path.display(), "saved data file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasklist::NewTask;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("nope.toml"));
        let data = storage.load().unwrap();
        assert_eq!(data.task_count(), 0);
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        let storage = Storage::new(temp_file.path());
        assert_eq!(storage.load().unwrap().task_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let storage = Storage::new(temp_file.path());

        let mut data = TasklistData::new();
        data.create_task(
            "alice",
            NewTask {
                title: "Persist me".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        storage.save(&data).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.find_task("alice", "task-1").unwrap().title, "Persist me");
    }

    #[test]
    fn test_load_garbage_fails_with_path() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "this is = = not toml").unwrap();
        let storage = Storage::new(temp_file.path());
        let err = storage.load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
