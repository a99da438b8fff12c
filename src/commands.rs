//! Context command service: single entry point per context command variant.
//!
//! Owns the create workflow (option validation, `from` resolution, endpoint
//! building) so the CLI only parses flags, calls one method, and formats output.

use crate::builder::docker::KEY_HOST;
use crate::builder::{build_endpoint, EndpointOptions};
use crate::context::{validate_name, Context, ContextSummary, METADATA_VERSION};
use crate::endpoint::{EndpointDescriptor, EndpointKind};
use crate::error::ContextError;
use crate::store::ContextStore;
use std::collections::BTreeMap;
use tracing::debug;

pub struct ContextCommandService;

/// Inputs of a create invocation, collected once and passed by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: String,
    pub description: String,
    /// Stored verbatim
    pub default_stack_orchestrator: Option<String>,
    pub docker: Option<EndpointOptions>,
    pub kubernetes: Option<EndpointOptions>,
    /// Context to copy from
    pub from: Option<String>,
}

impl CreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_stack_orchestrator(mut self, orchestrator: impl Into<String>) -> Self {
        self.default_stack_orchestrator = Some(orchestrator.into());
        self
    }

    pub fn docker(mut self, options: EndpointOptions) -> Self {
        self.docker = Some(options);
        self
    }

    pub fn kubernetes(mut self, options: EndpointOptions) -> Self {
        self.kubernetes = Some(options);
        self
    }

    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.from = Some(source.into());
        self
    }

    fn has_endpoint_options(&self) -> bool {
        self.docker.is_some() || self.kubernetes.is_some()
    }

    fn endpoint_options(&self) -> Vec<(EndpointKind, &EndpointOptions)> {
        let mut requested = Vec::new();
        if let Some(docker) = &self.docker {
            requested.push((EndpointKind::Docker, docker));
        }
        if let Some(kubernetes) = &self.kubernetes {
            requested.push((EndpointKind::Kubernetes, kubernetes));
        }
        requested
    }
}

/// Result of context create command.
#[derive(Debug, Clone)]
pub struct ContextCreateResult {
    pub context: Context,
    pub location: String,
}

/// Result of context list command.
#[derive(Debug, Clone)]
pub struct ContextListResult {
    pub contexts: Vec<ContextSummary>,
    pub current: Option<String>,
}

/// Result of context remove command.
#[derive(Debug, Clone)]
pub struct ContextRemoveResult {
    pub name: String,
}

impl ContextCommandService {
    /// Store a single-endpoint context. Every "create X context" variant ends here.
    pub fn create_context(
        store: &ContextStore,
        name: &str,
        kind: EndpointKind,
        description: &str,
        payload: EndpointDescriptor,
    ) -> Result<(), ContextError> {
        store.create(name, kind, description, payload)
    }

    /// Build one endpoint of `kind` from raw options and store it under `name`.
    /// A `from` key in the options seeds the endpoint from that context.
    pub fn run_create_typed(
        store: &ContextStore,
        kind: EndpointKind,
        name: &str,
        description: &str,
        options: &EndpointOptions,
    ) -> Result<ContextCreateResult, ContextError> {
        validate_name(name)?;
        let seed = match options.from_context() {
            Some(source) => Some(Self::source_endpoint(&store.get(source)?, kind)?),
            None => None,
        };
        let payload = build_endpoint(kind, options, seed.as_ref())?;
        let context = Context::new(name, description, payload);
        store.create_context(&context)?;
        Ok(ContextCreateResult {
            context,
            location: store.location(),
        })
    }

    /// Compose and store a context from docker/kubernetes option maps.
    pub fn run_create(
        store: &ContextStore,
        options: CreateOptions,
    ) -> Result<ContextCreateResult, ContextError> {
        let context = Self::compose(store, &options)?;
        store.create_context(&context)?;
        Ok(ContextCreateResult {
            context,
            location: store.location(),
        })
    }

    /// Build the record `run_create` would store, without writing it.
    ///
    /// With `from` and no endpoint maps every endpoint of the source is
    /// copied. Otherwise each map is built on its own seed: the context named
    /// by its `from` key, else the top-level source, else defaults. With
    /// neither maps nor `from`, a default docker endpoint is created.
    pub fn compose(store: &ContextStore, options: &CreateOptions) -> Result<Context, ContextError> {
        validate_name(&options.name)?;
        Self::check_from_conflicts(options)?;

        let source = match options.from.as_deref() {
            Some(name) => Some(store.get(name)?),
            None => None,
        };

        if let (Some(source), false) = (&source, options.has_endpoint_options()) {
            debug!(context = %options.name, from = %source.name, "Cloning all endpoints");
            return Ok(Context {
                name: options.name.clone(),
                description: options.description.clone(),
                context_type: source.context_type,
                endpoints: source.endpoints.clone(),
                default_stack_orchestrator: options
                    .default_stack_orchestrator
                    .clone()
                    .or_else(|| source.default_stack_orchestrator.clone()),
                metadata_version: METADATA_VERSION.to_string(),
            });
        }

        let default_docker = EndpointOptions::new();
        let mut requested = options.endpoint_options();
        if requested.is_empty() {
            requested.push((EndpointKind::Docker, &default_docker));
        }

        let mut endpoints = BTreeMap::new();
        for (kind, endpoint_options) in &requested {
            let seed = Self::resolve_seed(store, *kind, endpoint_options, source.as_ref())?;
            let descriptor = build_endpoint(*kind, endpoint_options, seed.as_ref())?;
            debug!(
                context = %options.name,
                kind = %kind,
                seeded = seed.is_some(),
                "Built endpoint"
            );
            endpoints.insert(*kind, descriptor);
        }

        Ok(Context {
            name: options.name.clone(),
            description: options.description.clone(),
            context_type: requested[0].0,
            endpoints,
            default_stack_orchestrator: options.default_stack_orchestrator.clone(),
            metadata_version: METADATA_VERSION.to_string(),
        })
    }

    pub fn run_list(store: &ContextStore) -> Result<ContextListResult, ContextError> {
        let contexts = store
            .list()?
            .iter()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContextListResult {
            contexts,
            current: store.current_context().map(str::to_string),
        })
    }

    pub fn run_inspect(store: &ContextStore, name: &str) -> Result<Context, ContextError> {
        store.get(name)
    }

    pub fn run_remove(store: &ContextStore, name: &str) -> Result<ContextRemoveResult, ContextError> {
        store.remove(name)?;
        Ok(ContextRemoveResult {
            name: name.to_string(),
        })
    }

    /// A per-endpoint `from` naming a different context than the top-level
    /// `from` is ambiguous. A docker `host` defines a fresh endpoint, so it
    /// cannot be combined with any source.
    fn check_from_conflicts(options: &CreateOptions) -> Result<(), ContextError> {
        let top = options.from.as_deref();
        for (kind, endpoint_options) in options.endpoint_options() {
            let inner = endpoint_options.from_context();
            if let (Some(top), Some(inner)) = (top, inner) {
                if inner != top {
                    return Err(ContextError::ConflictingOptions(format!(
                        "--from {} conflicts with {} from={}",
                        top, kind, inner
                    )));
                }
            }
            if kind == EndpointKind::Docker && endpoint_options.get(KEY_HOST).is_some() {
                if let Some(source) = inner.or(top) {
                    return Err(ContextError::ConflictingOptions(format!(
                        "docker host= cannot be combined with from={}",
                        source
                    )));
                }
            }
        }
        Ok(())
    }

    fn resolve_seed(
        store: &ContextStore,
        kind: EndpointKind,
        options: &EndpointOptions,
        source: Option<&Context>,
    ) -> Result<Option<EndpointDescriptor>, ContextError> {
        match (options.from_context(), source) {
            (Some(name), Some(source)) if source.name == name => {
                Self::source_endpoint(source, kind).map(Some)
            }
            (Some(name), _) => Self::source_endpoint(&store.get(name)?, kind).map(Some),
            (None, Some(source)) => Ok(source.endpoint(kind).cloned()),
            (None, None) => Ok(None),
        }
    }

    fn source_endpoint(
        source: &Context,
        kind: EndpointKind,
    ) -> Result<EndpointDescriptor, ContextError> {
        source
            .endpoint(kind)
            .cloned()
            .ok_or_else(|| ContextError::EndpointNotFound {
                context: source.name.clone(),
                kind,
            })
    }
}
