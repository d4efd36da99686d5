use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{self, Config};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the settings in effect and where they came from
    Show,
    /// Print one setting; with no key, dump config.toml
    Get { key: Option<String> },
    /// Print where config.toml lives
    Path,
    /// Print a commented-out config.toml
    Example,
    /// Write the example to config.toml unless one exists
    Init,
}

pub fn run(command: ConfigCommand, config: &Config) -> Result<()> {
    match command {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Get { key } => get_config(config, key.as_deref()),
        ConfigCommand::Path => {
            println!("{}", config::config_file_path().display());
            Ok(())
        }
        ConfigCommand::Example => {
            print!("{}", config::example_config());
            Ok(())
        }
        ConfigCommand::Init => init_config(),
    }
}

const KEYS: [&str; 2] = ["database_path", "logging"];

fn setting(config: &Config, key: &str) -> Option<String> {
    match key {
        "database_path" => Some(config.database_path.display().to_string()),
        "logging" => Some(format!("{:?}", config.logging)),
        _ => None,
    }
}

fn show_config(config: &Config) -> Result<()> {
    let config_path = config::config_file_path();
    let source = if config_path.exists() {
        "read"
    } else {
        "missing, defaults apply"
    };
    println!("config.toml: {} ({source})", config_path.display());

    for key in KEYS {
        if let Some(value) = setting(config, key) {
            println!("{key:>14} = {value}");
        }
    }
    Ok(())
}

fn get_config(config: &Config, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let Some(value) = setting(config, key) else {
                anyhow::bail!("No setting named {key} (known: {})", KEYS.join(", "));
            };
            println!("{value}");
        }
        None => {
            let config_path = config::config_file_path();
            if config_path.exists() {
                let contents =
                    std::fs::read_to_string(&config_path).context("Failed to read config file")?;
                print!("{contents}");
            } else {
                println!("No config.toml at {}", config_path.display());
                println!("`shelfkeep config init` writes a starting one.");
            }
        }
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Wrote {}", config_path.display());
    } else {
        println!("Left existing {} untouched", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_setting_covers_every_key() {
        let config = Config::load_with_db_path(PathBuf::from("/tmp/shelf.db")).unwrap();

        assert_eq!(setting(&config, "database_path").unwrap(), "/tmp/shelf.db");
        for key in KEYS {
            assert!(setting(&config, key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let config = Config::load_with_db_path(PathBuf::from("/tmp/shelf.db")).unwrap();

        assert!(setting(&config, "colour").is_none());
        assert!(get_config(&config, Some("colour")).is_err());
    }
}
