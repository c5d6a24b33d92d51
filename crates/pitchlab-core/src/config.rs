// Configuration loading and parsing (pitchlab.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub export: ExportConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    /// The configured team password, if access control is enabled.
    pub fn access_password(&self) -> Option<&str> {
        self.credentials.access.as_ref().map(|a| a.password.as_str())
    }
}

// ---------------------------------------------------------------------------
// pitchlab.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct PitchlabFile {
    data: DataConfig,
    #[serde(default)]
    display: DisplayConfig,
    export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory scanned for session CSV files.
    pub dir: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: StartupMode,
}

/// Which view the dashboard opens in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    #[default]
    Report,
    Single,
    Compare,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub dir: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub access: Option<AccessConfig>,
}

#[derive(Clone, Deserialize)]
pub struct AccessConfig {
    pub password: String,
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/pitchlab.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- pitchlab.toml (required) ---
    let main_path = config_dir.join("pitchlab.toml");
    let main_text = read_file(&main_path)?;
    let main_file: PitchlabFile =
        toml::from_str(&main_text).map_err(|e| ConfigError::ParseError {
            path: main_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        data: main_file.data,
        display: main_file.display,
        export: main_file.export,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.dir".into(),
            message: "must not be empty".into(),
        });
    }

    if config.export.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "export.dir".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(access) = &config.credentials.access {
        if access.password.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "access.password".into(),
                message: "must not be empty; remove the [access] table to disable the gate"
                    .into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest
            .ancestors()
            .find(|p| p.join("defaults").is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ above {:?}", manifest))
    }

    /// Fresh temp dir with `config/pitchlab.toml` copied from defaults.
    fn temp_with_defaults(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            project_root().join("defaults/pitchlab.toml"),
            tmp.join("config/pitchlab.toml"),
        )
        .unwrap();
        tmp
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = temp_with_defaults("pitchlab_config_valid");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.data.dir, "data");
        assert_eq!(config.display.mode, StartupMode::Report);
        assert_eq!(config.export.dir, "exports");
        assert!(config.access_password().is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_enable_access_gate() {
        let tmp = temp_with_defaults("pitchlab_config_creds");
        fs::write(
            tmp.join("config/credentials.toml"),
            "[access]\npassword = \"pitch123\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.access_password(), Some("pitch123"));
        assert!(!format!("{:?}", config).contains("pitch123"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_password() {
        let tmp = temp_with_defaults("pitchlab_config_empty_pw");
        fs::write(tmp.join("config/credentials.toml"), "[access]\npassword = \"\"\n").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "access.password"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn display_mode_parsed_and_defaulted() {
        let tmp = std::env::temp_dir().join("pitchlab_config_mode");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        fs::write(
            tmp.join("config/pitchlab.toml"),
            "[data]\ndir = \"d\"\n[display]\nmode = \"compare\"\n[export]\ndir = \"e\"\n",
        )
        .unwrap();
        assert_eq!(load_config_from(&tmp).unwrap().display.mode, StartupMode::Compare);

        fs::write(
            tmp.join("config/pitchlab.toml"),
            "[data]\ndir = \"d\"\n[export]\ndir = \"e\"\n",
        )
        .unwrap();
        assert_eq!(load_config_from(&tmp).unwrap().display.mode, StartupMode::Report);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_data_dir() {
        let tmp = std::env::temp_dir().join("pitchlab_config_empty_dir");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(
            tmp.join("config/pitchlab.toml"),
            "[data]\ndir = \" \"\n[export]\ndir = \"e\"\n",
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.dir"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("pitchlab_config_bad_toml");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/pitchlab.toml"), "[data\ndir = ").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_mode_is_parse_error() {
        let tmp = std::env::temp_dir().join("pitchlab_config_bad_mode");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(
            tmp.join("config/pitchlab.toml"),
            "[data]\ndir = \"d\"\n[display]\nmode = \"grid\"\n[export]\ndir = \"e\"\n",
        )
        .unwrap();

        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_main_config() {
        let tmp = std::env::temp_dir().join("pitchlab_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("pitchlab.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_and_skips_examples() {
        let tmp = std::env::temp_dir().join("pitchlab_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        fs::copy(
            project_root().join("defaults/pitchlab.toml"),
            defaults_dir.join("pitchlab.toml"),
        )
        .unwrap();
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "[access]\npassword = \"x\"\n",
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/pitchlab.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        // Second run copies nothing and keeps edits.
        fs::write(tmp.join("config/pitchlab.toml"), "# custom\n").unwrap();
        let copied = ensure_config_files(&tmp).unwrap();
        assert!(copied.is_empty());
        assert_eq!(
            fs::read_to_string(tmp.join("config/pitchlab.toml")).unwrap(),
            "# custom\n"
        );

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("pitchlab_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
