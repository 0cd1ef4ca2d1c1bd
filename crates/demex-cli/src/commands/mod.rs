//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use demex_core::DemexConfig;

/// Load configuration: the explicit file when given, defaults otherwise.
/// `DEMEX_*` environment variables overlay whatever was loaded.
pub fn load_config(path: Option<&str>) -> anyhow::Result<DemexConfig> {
    let mut config = match path {
        Some(p) => DemexConfig::from_file(Path::new(p))?,
        None => DemexConfig::default(),
    };
    config.apply_env();
    Ok(config)
}
