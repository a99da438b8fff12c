//! Environment source: `CTXSTORE_*` with `__` between nested keys,
//! e.g. `CTXSTORE_STORE__ROOT` or `CTXSTORE_LOGGING__LEVEL`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "CTXSTORE";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
