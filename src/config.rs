use crate::error::{CourtsideError, Result};
use crate::types::config::CourtsideConfig;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "courtside.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".courtside/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/courtside/config.toml";

pub fn load_config(root: &Path) -> Result<Option<CourtsideConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<CourtsideConfig>> {
    let team_path = root.join(DEFAULT_CONFIG_FILE);
    if !team_path.exists() {
        return Ok(None);
    }

    // Later layers win, key by key, down nested tables.
    let layers = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([team_path, root.join(DEFAULT_LOCAL_FILE)]);
    let merged = layers
        .filter(|path| path.exists())
        .try_fold(Table::new(), |mut merged, path| {
            overlay(&mut merged, read_layer(&path)?);
            Ok::<_, CourtsideError>(merged)
        })?;

    let cfg: CourtsideConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| CourtsideError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::debug!(team = %cfg.team.name, "config loaded");
    Ok(Some(cfg))
}

fn read_layer(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    let layer = toml::from_str::<Table>(&content)
        .map_err(|e| CourtsideError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), keys = layer.len(), "config layer read");
    Ok(layer)
}

fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        let value = match (value, base.get_mut(&key)) {
            (Value::Table(nested), Some(Value::Table(existing))) => {
                overlay(existing, nested);
                continue;
            }
            (value, _) => value,
        };
        base.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::PlayedPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_team_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_team_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[display]
good_threshold = 7.0
decimals = 2

[logging]
level = "info"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[team]
name = "Lions U17"

[display]
decimals = 1
"#,
        )
        .expect("team config should write");

        fs::create_dir_all(root.path().join(".courtside")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[scoring]
played_policy = "minutes_recorded"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");
        let settings = cfg.settings();

        assert_eq!(settings.team_name, "Lions U17");
        assert_eq!(settings.good_threshold, 7.0);
        assert_eq!(settings.decimals, 1);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.played_policy, PlayedPolicy::MinutesRecorded);
        assert_eq!(settings.data_file, "team.json");
    }

    #[test]
    fn local_layer_overrides_single_keys_of_a_table() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[team]\nname = \"Lions\"\ndata_file = \"team.json\"\n",
        )
        .expect("team config should write");
        fs::create_dir_all(root.path().join(".courtside")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            "[team]\ndata_file = \"scratch.json\"\n",
        )
        .expect("local override should write");

        let settings = load_config_with_global(root.path(), None)
            .expect("load should succeed")
            .expect("merged config should exist")
            .settings();
        assert_eq!(settings.team_name, "Lions");
        assert_eq!(settings.data_file, "scratch.json");
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[team]
name = "Lions"

[display]
good_threshold = 11.0
"#,
        )
        .expect("team config should write");

        let err = load_config_with_global(root.path(), None).expect_err("threshold is invalid");
        assert!(matches!(err, CourtsideError::ConfigParse(_)));
    }

    #[test]
    fn load_config_requires_team_name() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[display]\ndecimals = 2\n")
            .expect("team config should write");

        let err = load_config_with_global(root.path(), None).expect_err("team table is required");
        assert!(matches!(err, CourtsideError::ConfigParse(_)));
    }
}
