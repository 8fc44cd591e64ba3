//! Canonical test configurations.

use std::path::Path;

use crate::infrastructure::config::settings::Config;

/// Defaults with the LLM disabled, so nothing reaches the network.
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.llm.enabled = false;
    config
}

/// [`offline_config`] reading data from `dir`.
pub fn offline_config_at(dir: &Path) -> Config {
    let mut config = offline_config();
    config.data.dir = dir.to_path_buf();
    config
}

/// TOML text of a config that reads data from `dir` with the LLM disabled.
pub fn offline_config_toml(dir: &Path) -> String {
    format!(
        "[data]\ndir = {:?}\n\n[llm]\nenabled = false\n",
        dir.display().to_string()
    )
}
