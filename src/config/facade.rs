//! Config loading facade.

use super::merge::merge_policy::builder_with_defaults;
use super::paths;
use super::sources::{env, explicit_file, global_file};
use super::CtxConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

/// Builds a [`CtxConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence, lowest first: defaults, global file, `explicit` file,
    /// `CTXSTORE_*` environment.
    pub fn load(explicit: Option<&Path>) -> Result<CtxConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, explicit);
        let builder = env::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load a single file over the defaults, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<CtxConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    pub fn xdg_config_path() -> Option<PathBuf> {
        paths::global_config_path()
    }
}
