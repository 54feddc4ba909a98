//! Environment variable source: STOREGRAPH_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "STOREGRAPH";

/// Add environment variable overlay to builder.
/// `STOREGRAPH__STORE_DIR` sets `store_dir`, `STOREGRAPH__LOGGING__LEVEL`
/// sets `logging.level`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
