//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "docqa-relay";
const PROJECT_FILES: [&str; 2] = ["docqa-relay.toml", ".docqa-relay.toml"];

/// Prefix of environment overrides, e.g. `DOCQA_RELAY_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "DOCQA_RELAY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `DOCQA_RELAY_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./docqa-relay.toml` or `./.docqa-relay.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/docqa-relay/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File layers over the defaults, lowest priority first.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path must exist; figment reports it otherwise
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {ENV_PREFIX}<SECTION>__<KEY>");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:<5}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{mark}] Global:  {}", path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let config = extract(ConfigLoader::figment(None, None, None));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_project_overrides_global_and_explicit_overrides_both() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");

        fs::write(&global, "[server]\nport = 7000\nhost = \"10.0.0.1\"\n").unwrap();
        fs::write(&project, "[server]\nport = 7100\n[upstream]\nmodel = \"gpt-4o\"\n").unwrap();
        fs::write(&explicit, "[upstream]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let config = extract(ConfigLoader::figment(
            Some(global.as_path()),
            Some(project.as_path()),
            Some(explicit.as_path()),
        ));

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.upstream.model, "gpt-4o-mini");
        assert_eq!(config.upstream.timeout_seconds, 60);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = extract(ConfigLoader::figment(Some(missing.as_path()), Some(missing.as_path()), None));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(missing.as_path())).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(path.as_path())).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains(APP_DIR));
    }
}
