//! `relgen.toml` configuration.
//!
//! The import-path table the emitters stitch into generated files is part
//! of the configuration value rather than package-level state, so a run
//! can retarget the generated package layout without touching the
//! emitters.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Parsed relgen.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub packages: PackagePaths,
}

/// `[app]` section: the scaffolded application.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application name; also names the generated bootstrap file.
    pub name: String,
    /// Base directory the artifacts are written under.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

/// `[database]` section: the metadata store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string for the metadata store.
    pub url: String,
}

/// `[packages]` section: import paths referenced by the generated sources.
///
/// Defaults match the package layout of the scaffolded application; every
/// field can be overridden independently.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackagePaths {
    /// Directory the per-package artifact directories live under.
    pub source_root: String,
    pub models: String,
    pub controllers: String,
    pub graphql: String,
    pub database: String,
    pub router: String,
    pub utils: String,
    pub config: String,
    pub jsonconfig: String,
    pub server: String,
    pub route: String,
    /// Import path of the GraphQL runtime library.
    pub graphql_lib: String,
}

impl Default for PackagePaths {
    fn default() -> Self {
        Self {
            source_root: "vendor".to_string(),
            models: "models".to_string(),
            controllers: "controllers".to_string(),
            graphql: "mygraphql".to_string(),
            database: "database".to_string(),
            router: "router".to_string(),
            utils: "utils".to_string(),
            config: "config".to_string(),
            jsonconfig: "jsonconfig".to_string(),
            server: "server".to_string(),
            route: "route".to_string(),
            graphql_lib: "github.com/neelance/graphql-go".to_string(),
        }
    }
}

impl Config {
    /// Open and parse a relgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io(path.to_path_buf(), e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse configuration from a string, reporting errors against the
    /// given filename.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_str_with_filename(
            r#"
            [app]
            name = "showroom"

            [database]
            url = "postgres://localhost/metadata"
            "#,
            "relgen.toml",
        )
        .unwrap();

        assert_eq!(config.app.name, "showroom");
        assert_eq!(config.app.output, PathBuf::from("."));
        assert_eq!(config.database.url, "postgres://localhost/metadata");
        assert_eq!(config.packages, PackagePaths::default());
    }

    #[test]
    fn test_parse_package_overrides() {
        let config = Config::from_str_with_filename(
            r#"
            [app]
            name = "showroom"
            output = "generated"

            [database]
            url = "postgres://localhost/metadata"

            [packages]
            source_root = "internal"
            graphql = "gql"
            "#,
            "relgen.toml",
        )
        .unwrap();

        assert_eq!(config.app.output, PathBuf::from("generated"));
        assert_eq!(config.packages.source_root, "internal");
        assert_eq!(config.packages.graphql, "gql");
        // untouched fields keep their defaults
        assert_eq!(config.packages.models, "models");
        assert_eq!(
            config.packages.graphql_lib,
            "github.com/neelance/graphql-go"
        );
    }

    #[test]
    fn test_parse_error_reports_source() {
        let err = Config::from_str_with_filename("[app\nname = 1", "broken.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = Config::from_str_with_filename(
            r#"
            [app]
            name = "showroom"
            "#,
            "relgen.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
