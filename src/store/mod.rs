pub mod records;
pub mod scope;

use crate::error::{CourtsideError, Result};
use records::TeamSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence seam; command handlers only ever see this trait.
pub trait TeamStore: Send + Sync {
    fn load(&self) -> Result<TeamSnapshot>;
    fn save(&self, snapshot: &TeamSnapshot) -> Result<()>;
}

/// Snapshot kept as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TeamStore for JsonFileStore {
    fn load(&self) -> Result<TeamSnapshot> {
        if !self.path.exists() {
            return Err(CourtsideError::PathNotFound(self.path.display().to_string()));
        }
        let raw = fs::read_to_string(&self.path).map_err(CourtsideError::Io)?;
        let snapshot: TeamSnapshot =
            serde_json::from_str(&raw).map_err(|e| CourtsideError::DataParse {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            path = %self.path.display(),
            players = snapshot.players.len(),
            sessions = snapshot.sessions.len(),
            matches = snapshot.matches.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &TeamSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(CourtsideError::Io)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(CourtsideError::Io)?;
        fs::rename(&staging, &self.path).map_err(CourtsideError::Io)?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = JsonFileStore::new(dir.path().join("team.json"));
        let err = store.load().expect_err("missing file should fail");
        assert!(matches!(err, CourtsideError::PathNotFound(_)));
    }

    #[test]
    fn load_names_the_file_on_parse_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("team.json");
        fs::write(&path, "{\"players\": [{\"id\": \"seven\"}]}").expect("data should write");

        let err = JsonFileStore::new(&path).load().expect_err("bad data should fail");
        assert!(matches!(err, CourtsideError::DataParse { .. }));
        assert!(err.to_string().contains("team.json"));
    }

    #[test]
    fn save_then_load_preserves_snapshot() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = JsonFileStore::new(dir.path().join("data/team.json"));
        let snapshot: TeamSnapshot = serde_json::from_str(
            r#"{"players": [{"id": 1, "first_name": "Sara", "last_name": "Verdi", "active": false}]}"#,
        )
        .expect("snapshot should parse");

        store.save(&snapshot).expect("save should succeed");
        let loaded = store.load().expect("load should succeed");
        assert_eq!(loaded, snapshot);
        assert!(!dir.path().join("data/team.json.tmp").exists());
    }
}
