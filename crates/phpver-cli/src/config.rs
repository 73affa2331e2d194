use anyhow::{Context, Result};
use phpver_matrix::{MatrixOptions, SupportPolicy, DEFAULT_CATALOG_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "phpver.toml";

/// The optional phpver configuration file (phpver.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PhpverConfig {
    /// Release filters
    pub matrix: MatrixConfig,

    /// Where the release catalog comes from
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MatrixConfig {
    pub include_future: Option<bool>,
    pub include_unsupported: Option<bool>,
    pub support_policy: Option<SupportPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog service endpoint
    pub url: Option<String>,

    /// Local catalog file, relative to the config file
    pub file: Option<PathBuf>,
}

impl PhpverConfig {
    /// Load configuration from phpver.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.is_file() {
                log::debug!("Using configuration from {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let mut config: PhpverConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;

                if let Some(file) = config.catalog.file.take() {
                    config.catalog.file = Some(current.join(file));
                }
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }
}

/// Where to read releases from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

/// Command-line values before merging; `None` means "not given"
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub include_future: Option<bool>,
    pub include_unsupported: Option<bool>,
    pub support_policy: Option<SupportPolicy>,
    pub catalog_url: Option<String>,
    pub catalog_file: Option<PathBuf>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: MatrixOptions,
    pub catalog: CatalogSource,
}

impl Settings {
    /// Merge command-line values over the config file over built-in defaults
    pub fn resolve(overrides: Overrides, config: Option<PhpverConfig>) -> Self {
        let config = config.unwrap_or_default();
        let defaults = MatrixOptions::default();

        let options = MatrixOptions::new()
            .with_future(
                overrides
                    .include_future
                    .or(config.matrix.include_future)
                    .unwrap_or(defaults.include_future),
            )
            .with_unsupported(
                overrides
                    .include_unsupported
                    .or(config.matrix.include_unsupported)
                    .unwrap_or(defaults.include_unsupported),
            )
            .with_support_policy(
                overrides
                    .support_policy
                    .or(config.matrix.support_policy)
                    .unwrap_or(defaults.support_policy),
            );

        // A file given on the command line beats any URL; a URL given on the
        // command line beats a file from the config
        let catalog = match (overrides.catalog_file, overrides.catalog_url) {
            (Some(file), _) => CatalogSource::File(file),
            (None, Some(url)) => CatalogSource::Url(url),
            (None, None) => match (config.catalog.file, config.catalog.url) {
                (Some(file), _) => CatalogSource::File(file),
                (None, Some(url)) => CatalogSource::Url(url),
                (None, None) => CatalogSource::Url(DEFAULT_CATALOG_URL.to_string()),
            },
        };

        Settings { options, catalog }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config: PhpverConfig = toml::from_str("").unwrap();
        assert!(config.matrix.include_future.is_none());
        assert!(config.catalog.url.is_none());
    }

    #[test]
    fn test_parse_matrix_table() {
        let toml = r#"
[matrix]
include-future = true
include-unsupported = false
support-policy = "secure-only"
"#;
        let config: PhpverConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.matrix.include_future, Some(true));
        assert_eq!(config.matrix.include_unsupported, Some(false));
        assert_eq!(config.matrix.support_policy, Some(SupportPolicy::SecureOnly));
    }

    #[test]
    fn test_parse_invalid_policy() {
        let toml = r#"
[matrix]
support-policy = "whenever"
"#;
        assert!(toml::from_str::<PhpverConfig>(toml).is_err());
    }

    #[test]
    fn test_load_searches_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("packages").join("app");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[catalog]\nfile = \"ci/versions.json\"\n",
        )
        .unwrap();

        let config = PhpverConfig::load(&nested).unwrap().unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.catalog.file, Some(root.join("ci/versions.json")));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[matrix\n").unwrap();

        let err = PhpverConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Overrides::default(), None);
        assert_eq!(settings.options, MatrixOptions::default());
        assert_eq!(settings.catalog, CatalogSource::Url(DEFAULT_CATALOG_URL.to_string()));
    }

    #[test]
    fn test_command_line_beats_config() {
        let config: PhpverConfig = toml::from_str(
            r#"
[matrix]
include-future = true
support-policy = "secure-only"

[catalog]
file = "/tmp/versions.json"
"#,
        )
        .unwrap();
        let overrides = Overrides {
            include_future: Some(false),
            catalog_url: Some("http://localhost/versions".to_string()),
            ..Overrides::default()
        };

        let settings = Settings::resolve(overrides, Some(config));
        assert!(!settings.options.include_future);
        assert!(settings.options.include_unsupported);
        assert_eq!(settings.options.support_policy, SupportPolicy::SecureOnly);
        assert_eq!(
            settings.catalog,
            CatalogSource::Url("http://localhost/versions".to_string())
        );
    }

    #[test]
    fn test_config_catalog_file() {
        let config: PhpverConfig = toml::from_str(
            r#"
[catalog]
url = "http://mirror/versions"
file = "/srv/versions.json"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(Overrides::default(), Some(config));
        assert_eq!(
            settings.catalog,
            CatalogSource::File(PathBuf::from("/srv/versions.json"))
        );
    }
}
