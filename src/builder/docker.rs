//! Docker engine endpoint builder.

use crate::builder::options::{non_empty, parse_bool, EndpointOptions, KEY_FROM};
use crate::endpoint::DockerEndpoint;
use crate::error::ContextError;

const SCOPE: &str = "docker";

pub const KEY_HOST: &str = "host";
pub const KEY_CA: &str = "ca";
pub const KEY_CERT: &str = "cert";
pub const KEY_KEY: &str = "key";
pub const KEY_SKIP_TLS_VERIFY: &str = "skip-tls-verify";

pub const DOCKER_KEYS: &[&str] = &[
    KEY_FROM,
    KEY_HOST,
    KEY_CA,
    KEY_CERT,
    KEY_KEY,
    KEY_SKIP_TLS_VERIFY,
];

const HOST_SCHEMES: &[&str] = &["unix", "tcp", "npipe", "ssh", "fd"];

/// Build a docker endpoint, starting from `source` when given.
///
/// TLS paths are stored as given; whether they exist is the consumer's
/// concern when it connects.
pub fn build_docker_endpoint(
    options: &EndpointOptions,
    source: Option<&DockerEndpoint>,
) -> Result<DockerEndpoint, ContextError> {
    options.validate_keys(SCOPE, DOCKER_KEYS)?;

    let mut endpoint = source.cloned().unwrap_or_default();
    for (key, value) in options.overrides() {
        match key {
            KEY_HOST => endpoint.host = Some(parse_host(value)?),
            KEY_CA => endpoint.ca = Some(non_empty(SCOPE, key, value)?),
            KEY_CERT => endpoint.cert = Some(non_empty(SCOPE, key, value)?),
            KEY_KEY => endpoint.key = Some(non_empty(SCOPE, key, value)?),
            KEY_SKIP_TLS_VERIFY => {
                endpoint.skip_tls_verify = Some(parse_bool(SCOPE, key, value)?)
            }
            _ => return Err(ContextError::invalid_option(SCOPE, key, "unknown option")),
        }
    }
    Ok(endpoint)
}

fn parse_host(value: &str) -> Result<String, ContextError> {
    let host = non_empty(SCOPE, KEY_HOST, value)?;
    let scheme = host
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| {
            ContextError::invalid_option(SCOPE, KEY_HOST, format!("{:?} has no scheme", host))
        })?;
    if !HOST_SCHEMES.contains(&scheme) {
        return Err(ContextError::invalid_option(
            SCOPE,
            KEY_HOST,
            format!(
                "unsupported scheme {:?} (expected one of {})",
                scheme,
                HOST_SCHEMES.join(", ")
            ),
        ));
    }
    Ok(host)
}
