use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "inspect";
const ENV_PREFIX: &str = "KMODEL";

#[kmodel::model_error]
pub(crate) enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct InspectConfig {
    pub(crate) log: LogConfig,
    pub(crate) output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// Default level, e.g. `info` or `debug`. `RUST_LOG` still wins.
    pub(crate) level: String,
    pub(crate) json: bool,
    /// Writes a rolling log file here when set.
    pub(crate) directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct OutputConfig {
    pub(crate) pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Loads [`InspectConfig`] from a TOML file overlaid with `KMODEL__*` variables.
///
/// Without an explicit `path` the file `inspect.toml` is optional; an explicit path
/// must exist. Nested keys use a double underscore: `KMODEL__LOG__LEVEL=debug` sets
/// `log.level`.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing or malformed, or when a
/// value does not fit [`InspectConfig`].
pub(crate) fn load_config(path: Option<&Path>) -> Result<InspectConfig, ConfigError> {
    load_with_env(path, None)
}

fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<InspectConfig, ConfigError> {
    let (file, required) =
        path.map_or_else(|| (PathBuf::from(DEFAULT_CONFIG), false), |p| (p.to_path_buf(), true));

    Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context(format!("Failed to build config from {}", file.display()))?
        .try_deserialize::<InspectConfig>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let cfg = load_with_env(None, Some(Map::new())).unwrap();

        assert_eq!(cfg, InspectConfig::default());
        assert_eq!(cfg.log.level, "info");
        assert!(cfg.output.pretty);
    }

    #[test]
    fn test_file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inspect.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\njson = true\n\n[output]\npretty = false\n")
            .unwrap();

        let cfg = load_with_env(Some(&path), Some(Map::new())).unwrap();

        assert_eq!(cfg.log.level, "debug");
        assert!(cfg.log.json);
        assert!(!cfg.output.pretty);
        assert!(cfg.log.directory.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inspect.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();
        let env = Map::from([
            ("KMODEL__LOG__LEVEL".to_owned(), "trace".to_owned()),
            ("KMODEL__OUTPUT__PRETTY".to_owned(), "false".to_owned()),
        ]);

        let cfg = load_with_env(Some(&path), Some(env)).unwrap();

        assert_eq!(cfg.log.level, "trace");
        assert!(!cfg.output.pretty);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_with_env(Some(&dir.path().join("absent.toml")), Some(Map::new()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    }
}
