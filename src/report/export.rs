use crate::error::{CourtsideError, Result};
use crate::types::report::RatingReport;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORTS_DIR: &str = ".courtside/reports";

/// Writes the ratings as pretty JSON under the team directory and returns the
/// path of the new file.
pub fn write_report(root: &Path, report: &RatingReport) -> Result<PathBuf> {
    let dir = root.join(REPORTS_DIR);
    fs::create_dir_all(&dir).map_err(CourtsideError::Io)?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let out_path = dir.join(format!("ratings-{stamp}.json"));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&out_path, json).map_err(CourtsideError::Io)?;
    tracing::info!(path = %out_path.display(), "ratings exported");
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::scope::ScopeFilter;
    use crate::types::scoring::PlayedPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_creates_stamped_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let report = RatingReport::new(
            "Lions",
            &ScopeFilter::default(),
            PlayedPolicy::default(),
            Vec::new(),
        );

        let path = write_report(dir.path(), &report).expect("report should be written");
        assert!(path.starts_with(dir.path().join(REPORTS_DIR)));
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name is utf-8");
        assert!(name.starts_with("ratings-") && name.ends_with("Z.json"));

        let written = fs::read_to_string(&path).expect("report should be readable");
        let value: serde_json::Value =
            serde_json::from_str(&written).expect("report should be valid json");
        assert_eq!(value["team"], "Lions");
        assert_eq!(value["played_policy"], "accepted_call_up");
    }
}
