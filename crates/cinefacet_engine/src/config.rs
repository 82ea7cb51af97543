use serde::Deserialize;

use cinefacet_base::{CatalogError, CatalogResult, ErrorKind, FilePath, PalHandle, ResultExt};

use crate::matcher::{DEFAULT_PATTERN_SIZE_LIMIT, MatcherOptions, SearchMode};

/// Contents of `cinefacet.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog file, relative to the directory containing the configuration file.
    pub catalog: String,
    /// How search text is interpreted.
    #[serde(default)]
    pub search_mode: SearchMode,
    /// Compiled pattern budget in bytes.
    #[serde(default = "default_pattern_size_limit")]
    pub pattern_size_limit: usize,
}

fn default_pattern_size_limit() -> usize {
    DEFAULT_PATTERN_SIZE_LIMIT
}

impl Config {
    /// Configuration for a catalog path with every other setting at its default.
    pub fn default_for(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            search_mode: SearchMode::default(),
            pattern_size_limit: DEFAULT_PATTERN_SIZE_LIMIT,
        }
    }

    pub fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            mode: self.search_mode,
            pattern_size_limit: self.pattern_size_limit,
        }
    }

    /// Where the catalog lives, given where this configuration was read from.
    pub fn catalog_path(&self, config_path: &FilePath) -> FilePath {
        config_path.sibling(&self.catalog)
    }
}

/// Read and parse a configuration file through the PAL.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> CatalogResult<Config> {
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read configuration from {}", path))?;
    toml::from_str(&text).map_err(|e| {
        Box::new(
            CatalogError::new(ErrorKind::Parse {
                what: "configuration".to_string(),
                reason: e.message().to_string(),
            })
            .context(format!("Invalid configuration in {}", path)),
        )
    })
}
