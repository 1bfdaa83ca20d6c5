//! Launch configuration read from the environment.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the asset root.
pub const ASSET_ROOT_ENV: &str = "DRAGON_ESCAPE_ASSETS";
/// Asset root used when the variable is unset.
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Directory containing `sprites/` and `audios/`.
    pub asset_root: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
        }
    }
}

impl LaunchConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds the configuration from an arbitrary variable lookup. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(root) = lookup(ASSET_ROOT_ENV).filter(|root| !root.is_empty()) {
            config.asset_root = PathBuf::from(root);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_assets_dir() {
        let config = LaunchConfig::from_lookup(|_| None);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
    }

    #[test]
    fn env_overrides_asset_root() {
        let config = LaunchConfig::from_lookup(|key| {
            (key == ASSET_ROOT_ENV).then(|| OsString::from("/opt/dragon/assets"))
        });
        assert_eq!(config.asset_root, PathBuf::from("/opt/dragon/assets"));
    }

    #[test]
    fn empty_value_is_ignored() {
        let config = LaunchConfig::from_lookup(|_| Some(OsString::new()));
        assert_eq!(config, LaunchConfig::default());
    }
}
