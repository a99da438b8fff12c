//! CLI route: single route table and run context. Dispatches to the context
//! command service and presentation.

use crate::builder::aci::{KEY_LOCATION, KEY_RESOURCE_GROUP, KEY_SUBSCRIPTION_ID};
use crate::builder::{EndpointOptions, KEY_FROM};
use crate::cli::parse::{Commands, CreateArgs, CreateCommands};
use crate::cli::presentation::{
    format_create_result, format_inspect_result, format_list_names, format_list_result_json,
    format_list_result_text, format_remove_result,
};
use crate::commands::{ContextCommandService, CreateOptions};
use crate::config::{ConfigLoader, CtxConfig};
use crate::endpoint::EndpointKind;
use crate::error::{ApiError, ContextError};
use crate::store::ContextStore;
use std::path::PathBuf;
use tracing::debug;

/// Runtime context for CLI execution: resolved configuration and the store.
pub struct RunContext {
    store: ContextStore,
    config: CtxConfig,
}

impl RunContext {
    /// Load layered configuration and open the store it points at.
    /// `store_root` overrides the configured root.
    pub fn new(config_path: Option<PathBuf>, store_root: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?.validated()?;
        Self::from_config(config, store_root)
    }

    pub fn from_config(config: CtxConfig, store_root: Option<PathBuf>) -> Result<Self, ApiError> {
        let root = match store_root {
            Some(root) => root,
            None => config.store.resolve_root()?,
        };
        debug!(store_root = %root.display(), "Opening context store");
        let store = ContextStore::open(&root)?.with_current_context(config.current_context.clone());
        Ok(Self { store, config })
    }

    /// Run against an already-open store with default configuration.
    pub fn with_store(store: ContextStore) -> Self {
        Self {
            store,
            config: CtxConfig::default(),
        }
    }

    pub fn store(&self) -> &ContextStore {
        &self.store
    }

    pub fn config(&self) -> &CtxConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Create(args) => self.handle_create(args),
            Commands::List { format, names_only } => {
                let result = ContextCommandService::run_list(&self.store)?;
                if *names_only {
                    return Ok(format_list_names(&result));
                }
                match format.as_str() {
                    "json" => Ok(format_list_result_json(&result)),
                    "text" => Ok(format_list_result_text(&result)),
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
            Commands::Inspect { name } => {
                let context = ContextCommandService::run_inspect(&self.store, name)?;
                Ok(format_inspect_result(&context))
            }
            Commands::Remove { name } => {
                let result = ContextCommandService::run_remove(&self.store, name)?;
                Ok(format_remove_result(&result))
            }
        }
    }

    fn handle_create(&self, args: &CreateArgs) -> Result<String, ApiError> {
        let result = match &args.command {
            Some(command) => {
                let (kind, name, description, options) = typed_create_options(command)?;
                ContextCommandService::run_create_typed(
                    &self.store,
                    kind,
                    name,
                    description,
                    &options,
                )?
            }
            None => {
                let options = create_options(args)?;
                ContextCommandService::run_create(&self.store, options)?
            }
        };
        Ok(format_create_result(&result))
    }
}

fn create_options(args: &CreateArgs) -> Result<CreateOptions, ContextError> {
    let name = args.name.clone().ok_or_else(|| ContextError::InvalidName {
        name: String::new(),
        reason: "name is required".to_string(),
    })?;
    Ok(CreateOptions {
        name,
        description: args.description.clone(),
        default_stack_orchestrator: args.default_stack_orchestrator.clone(),
        docker: args
            .docker
            .as_deref()
            .map(|raw| EndpointOptions::parse(EndpointKind::Docker.as_str(), raw))
            .transpose()?,
        kubernetes: args
            .kubernetes
            .as_deref()
            .map(|raw| EndpointOptions::parse(EndpointKind::Kubernetes.as_str(), raw))
            .transpose()?,
        from: args.from.clone(),
    })
}

fn typed_create_options(
    command: &CreateCommands,
) -> Result<(EndpointKind, &str, &str, EndpointOptions), ContextError> {
    match command {
        CreateCommands::Local {
            name,
            description,
            from,
        } => {
            let mut options = EndpointOptions::new();
            insert_opt(&mut options, KEY_FROM, from);
            Ok((EndpointKind::Local, name.as_str(), description.as_str(), options))
        }
        CreateCommands::Example {
            name,
            description,
            fields,
            from,
        } => {
            let mut options = EndpointOptions::new();
            for field in fields {
                let (key, value) = field.split_once('=').ok_or_else(|| {
                    ContextError::invalid_option(
                        EndpointKind::Example.as_str(),
                        field,
                        "expected key=value",
                    )
                })?;
                if key.is_empty() || key == KEY_FROM {
                    return Err(ContextError::invalid_option(
                        EndpointKind::Example.as_str(),
                        field,
                        "invalid field name",
                    ));
                }
                options.insert(key, value);
            }
            insert_opt(&mut options, KEY_FROM, from);
            Ok((EndpointKind::Example, name.as_str(), description.as_str(), options))
        }
        CreateCommands::Aci {
            name,
            description,
            subscription_id,
            resource_group,
            location,
            from,
        } => {
            let mut options = EndpointOptions::new();
            insert_opt(&mut options, KEY_SUBSCRIPTION_ID, subscription_id);
            insert_opt(&mut options, KEY_RESOURCE_GROUP, resource_group);
            insert_opt(&mut options, KEY_LOCATION, location);
            insert_opt(&mut options, KEY_FROM, from);
            Ok((EndpointKind::Aci, name.as_str(), description.as_str(), options))
        }
    }
}

fn insert_opt(options: &mut EndpointOptions, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        options.insert(key, value.as_str());
    }
}
