use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings for the `shelfkeep` binary.
///
/// `--db` beats `SHELFKEEP_*` variables, which beat `config.toml`; anything
/// left unset falls back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SQLite file holding the library and the catalog. Defaults to
    /// `shelfkeep/shelfkeep.db` under the platform data directory.
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Logger options, passed to twyg unchanged.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Config {
    /// Read `config.toml` if present, then layer `SHELFKEEP_*` variables on
    /// top.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but is not valid TOML for these settings.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("shelfkeep");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Same as [`Config::load`], with `--db` replacing the database path.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfkeep")
        .join("shelfkeep.db")
}

/// Location of the config file: `shelfkeep/config.toml` under the platform
/// config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfkeep")
        .join("config.toml")
}

pub fn example_config() -> &'static str {
    r#"# shelfkeep settings
#
# Uncomment a line to change it. `--db` and SHELFKEEP_* environment
# variables win over anything set here.

# SQLite file for the library and the product catalog.
# Same as SHELFKEEP_DATABASE_PATH or `shelfkeep --db <path>`.
#database_path = "/srv/shelfkeep/shelfkeep.db"

#[logging]
#level = "info"
#coloured = true
"#
}

/// Write [`example_config`] to [`config_file_path`] unless a file is
/// already there. `Ok(true)` means it was written now.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path() {
        assert!(default_db_path().ends_with("shelfkeep/shelfkeep.db"));
    }

    #[test]
    fn test_config_load() {
        // no config.toml on a clean machine
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/shelfkeep-test.db");
        let config = Config::load_with_db_path(custom_path.clone()).unwrap();
        assert_eq!(config.database_path, custom_path);
    }

    #[test]
    fn test_config_file_path_is_namespaced() {
        assert!(config_file_path().ends_with("shelfkeep/config.toml"));
    }

    #[test]
    fn test_example_config_sets_nothing() {
        // every setting in the example is commented out
        assert!(example_config()
            .lines()
            .all(|line| line.is_empty() || line.starts_with('#')));
    }

    #[test]
    fn test_example_config_names_real_settings() {
        let example = example_config();
        assert!(example.contains("#database_path = "));
        assert!(example.contains("SHELFKEEP_DATABASE_PATH"));
        assert!(example.contains("#[logging]"));
        assert!(!example.contains("priority"));
    }
}
