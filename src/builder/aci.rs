//! Cloud container instance endpoint builder.

use crate::builder::options::{non_empty, EndpointOptions, KEY_FROM};
use crate::endpoint::AciEndpoint;
use crate::error::ContextError;

const SCOPE: &str = "aci";

pub const KEY_SUBSCRIPTION_ID: &str = "subscription-id";
pub const KEY_RESOURCE_GROUP: &str = "resource-group";
pub const KEY_LOCATION: &str = "location";

pub const ACI_KEYS: &[&str] = &[
    KEY_FROM,
    KEY_SUBSCRIPTION_ID,
    KEY_RESOURCE_GROUP,
    KEY_LOCATION,
];

pub fn build_aci_endpoint(
    options: &EndpointOptions,
    source: Option<&AciEndpoint>,
) -> Result<AciEndpoint, ContextError> {
    options.validate_keys(SCOPE, ACI_KEYS)?;

    let mut endpoint = source.cloned().unwrap_or_default();
    for (key, value) in options.overrides() {
        let value = Some(non_empty(SCOPE, key, value)?);
        match key {
            KEY_SUBSCRIPTION_ID => endpoint.subscription_id = value,
            KEY_RESOURCE_GROUP => endpoint.resource_group = value,
            KEY_LOCATION => endpoint.location = value,
            _ => return Err(ContextError::invalid_option(SCOPE, key, "unknown option")),
        }
    }
    Ok(endpoint)
}
