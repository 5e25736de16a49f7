use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use techhub_logging::LogFormat;

use crate::cli::OutputFormat;

/// Default config template, also the lowest configuration layer
pub const DEFAULT_CONFIG: &str = r#"
[catalog]
path = ""  # Empty uses the bundled catalog. Set via TECHHUB_CATALOG env var

[routing]
max_matches = 0  # Keyword matches kept before adding collaborators, 0 keeps all
dependencies = true  # Attach cross-role dependencies to plans

[output]
format = "text"  # text or json

[logging]
level = "warn"  # trace, debug, info, warn, error
format = "text"  # text or json
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: String,
}

impl CatalogConfig {
    /// Configured catalog file, `None` for the bundled catalog
    pub fn path(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        if path.is_empty() {
            return None;
        }
        Some(expand_tilde(path))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    pub max_matches: usize,
    pub dependencies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub routing: RoutingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Techhub home directory: ~/.techhub
    pub fn home_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".techhub"))
    }

    /// Global config path: ~/.techhub/techhub.toml
    pub fn global_config_path() -> Option<PathBuf> {
        Self::home_dir().map(|dir| dir.join("techhub.toml"))
    }

    /// Write the default config to the global path if missing (or `force`)
    ///
    /// Returns the path and whether it was written.
    pub fn ensure_global_config(force: bool) -> anyhow::Result<(PathBuf, bool)> {
        let config_path = Self::global_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if config_path.exists() && !force {
            return Ok((config_path, false));
        }

        fs::write(&config_path, DEFAULT_CONFIG.trim())?;
        Ok((config_path, true))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.techhub/techhub.toml (optional)
    /// 3. Local override: ./techhub.toml (optional)
    /// 4. Explicit `--config` file (required when given)
    /// 5. Environment variables (highest priority)
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        Self::build(Self::global_config_path(), Some("techhub"), explicit)
    }

    fn build(
        global: Option<PathBuf>,
        local: Option<&str>,
        explicit: Option<&Path>,
    ) -> anyhow::Result<Self> {
        // Later sources override earlier ones
        let mut config_builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(global) = global {
            config_builder = config_builder.add_source(config::File::from(global).required(false));
        }

        if let Some(local) = local {
            config_builder =
                config_builder.add_source(config::File::with_name(local).required(false));
        }

        if let Some(explicit) = explicit {
            config_builder = config_builder.add_source(config::File::from(explicit).required(true));
        }

        // Environment variables with TECHHUB__ prefix, e.g. TECHHUB__ROUTING__MAX_MATCHES
        config_builder = config_builder.add_source(
            config::Environment::with_prefix("TECHHUB")
                .prefix_separator("__")
                .separator("__"),
        );

        // Convenience env var overrides (highest priority)
        if let Ok(path) = env::var("TECHHUB_CATALOG") {
            config_builder = config_builder.set_override("catalog.path", path)?;
        }

        if let Ok(level) = env::var("TECHHUB_LOG_LEVEL") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let config = config_builder.build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config)
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::build(None, None, None).unwrap();
        assert!(config.catalog.path().is_none() || env::var("TECHHUB_CATALOG").is_ok());
        assert!(config.routing.dependencies);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[routing]\nmax_matches = 5\n\n[output]\nformat = \"json\"\n"
        )
        .unwrap();

        let config = Config::build(None, None, Some(file.path())).unwrap();
        assert_eq!(config.routing.max_matches, 5);
        assert!(config.routing.dependencies);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(Config::build(None, None, Some(Path::new("/nonexistent/techhub.toml"))).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/tmp/c.yaml"), PathBuf::from("/tmp/c.yaml"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/c.yaml"), home.join("c.yaml"));
        }
    }
}
