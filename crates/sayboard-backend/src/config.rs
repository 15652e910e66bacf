use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sayboard_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g. `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Location of `config.toml` in the user's configuration directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "sayboard", "sayboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the configuration stored at `config_path`, writing the defaults
/// there first if the file does not exist yet.
pub async fn load_config(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        return Ok(toml::from_str(&contents)?);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

/// Saves `config` as pretty-printed TOML to `config_path`, overwriting any
/// existing file.
pub async fn save_config(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;

    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sayboard-config-{name}-{}", std::process::id()))
            .join("config.toml")
    }

    #[tokio::test]
    async fn first_load_writes_defaults() {
        let path = temp_path("defaults");
        let _ = tokio::fs::remove_file(&path).await;

        let config = load_config(&path).await.unwrap();

        assert_eq!(config.tables.records_per_page, 25);
        assert!(path.exists());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn saved_project_survives_reload() {
        let path = temp_path("roundtrip");
        let mut config = Config::default();
        config.active_project = Some("guide".to_owned());
        config.server.request_timeout_secs = 30;

        save_config(&path, &config).await.unwrap();
        let loaded = load_config(&path).await.unwrap();

        assert_eq!(loaded.active_project.as_deref(), Some("guide"));
        assert_eq!(loaded.server.request_timeout_secs, 30);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn partial_file_falls_back_to_defaults() {
        let path = temp_path("partial");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "[tables]\nrecords_per_page = 10\nprojects_per_page = 5\n")
            .await
            .unwrap();

        let config = load_config(&path).await.unwrap();

        assert_eq!(config.tables.records_per_page, 10);
        assert_eq!(config.import.reload_delay_secs, 5);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn broken_file_is_reported() {
        let path = temp_path("broken");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "server = [").await.unwrap();

        assert!(matches!(
            load_config(&path).await,
            Err(ConfigError::DeserializeError(_))
        ));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
