//! Directory locations for appraise.
//!
//! Everything the client persists lives under a single XDG config
//! directory: the TOML config file and the stored login session.

use std::path::PathBuf;

/// The appraise config directory.
///
/// `$XDG_CONFIG_HOME/appraise` when the variable is set, otherwise
/// `~/.config/appraise`.
pub fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("appraise")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_appraise() {
        assert!(config_dir().ends_with("appraise"));
    }
}
