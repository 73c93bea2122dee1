use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Variables with this prefix override file values; `__` separates sections.
const ENV_PREFIX: &str = "SHELFSCOUT_";

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from file with environment variable overrides.
///
/// Precedence, lowest first: built-in defaults, the TOML file, then
/// `SHELFSCOUT_*` variables (`SHELFSCOUT_CATALOG__API_KEY` sets
/// `catalog.api_key`). `SHELFSCOUT_CONFIG` names the file and is never
/// read as a setting.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(
        defaults()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__")),
    )
}

/// Load configuration from a TOML string, without environment overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    extract(defaults().merge(Toml::string(toml_str)))
}
