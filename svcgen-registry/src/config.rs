//! svcgen.toml loading.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{ColumnSchema, Error, Result, error::SourceContext};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "svcgen.toml";
/// Registry read when neither the config nor the CLI names one.
pub const DEFAULT_REGISTRY_PATH: &str = "names/names_data.csv";
/// Generated file written when neither the config nor the CLI names one.
pub const DEFAULT_OUTPUT_PATH: &str = "internal/conns/config_gen.rs";
/// Version selector that picks the variant A package column.
pub const DEFAULT_SENTINEL: &str = "1";

/// Root of svcgen.toml. Every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub columns: ColumnSchema,

    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REGISTRY_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Version selector value that selects `package_v1`
    pub sentinel: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, DEFAULT_CONFIG_PATH)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `svcgen.toml` in the working
    /// directory is used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
                Ok(Self::default())
            }
        }
    }

    /// Parse a svcgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }
}

/// Parse config content with the given filename for error reporting.
fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source_ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    if let Some((first, second, index)) = config.columns.find_overlap() {
        // Label the key the file sets; the other one may be a default
        let needle = [second, first]
            .into_iter()
            .map(|name| format!("{name} ="))
            .find(|key| content.contains(key.as_str()))
            .unwrap_or_else(|| "[columns]".to_string());

        return Err(source_ctx.validation_error_near(
            format!("columns '{first}' and '{second}' both use index {index}"),
            &needle,
        ));
    }

    Ok(config)
}
