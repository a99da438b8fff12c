//! Kubernetes endpoint builder.

use crate::builder::options::{non_empty, EndpointOptions, KEY_FROM};
use crate::endpoint::KubernetesEndpoint;
use crate::error::ContextError;

const SCOPE: &str = "kubernetes";

pub const KEY_CONFIG_FILE: &str = "config-file";
pub const KEY_CONTEXT_OVERRIDE: &str = "context-override";
pub const KEY_NAMESPACE_OVERRIDE: &str = "namespace-override";

pub const KUBERNETES_KEYS: &[&str] = &[
    KEY_FROM,
    KEY_CONFIG_FILE,
    KEY_CONTEXT_OVERRIDE,
    KEY_NAMESPACE_OVERRIDE,
];

pub fn build_kubernetes_endpoint(
    options: &EndpointOptions,
    source: Option<&KubernetesEndpoint>,
) -> Result<KubernetesEndpoint, ContextError> {
    options.validate_keys(SCOPE, KUBERNETES_KEYS)?;

    let mut endpoint = source.cloned().unwrap_or_default();
    for (key, value) in options.overrides() {
        let value = Some(non_empty(SCOPE, key, value)?);
        match key {
            KEY_CONFIG_FILE => endpoint.config_file = value,
            KEY_CONTEXT_OVERRIDE => endpoint.context_override = value,
            KEY_NAMESPACE_OVERRIDE => endpoint.namespace_override = value,
            _ => return Err(ContextError::invalid_option(SCOPE, key, "unknown option")),
        }
    }
    Ok(endpoint)
}
