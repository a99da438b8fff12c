//! Endpoint builders
//!
//! One pure function per endpoint kind turns a raw option map into a typed
//! descriptor. When a source descriptor is supplied it is copied first and
//! only the keys present in the options overwrite its fields.

pub mod aci;
pub mod docker;
pub mod kubernetes;
pub mod options;

pub use aci::build_aci_endpoint;
pub use docker::build_docker_endpoint;
pub use kubernetes::build_kubernetes_endpoint;
pub use options::{EndpointOptions, KEY_FROM};

use crate::endpoint::{EndpointDescriptor, EndpointKind, ExampleEndpoint, LocalEndpoint};
use crate::error::ContextError;

/// The local engine takes no options beyond `from`.
pub fn build_local_endpoint(
    options: &EndpointOptions,
    source: Option<&LocalEndpoint>,
) -> Result<LocalEndpoint, ContextError> {
    options.validate_keys(EndpointKind::Local.as_str(), &[KEY_FROM])?;
    Ok(source.cloned().unwrap_or_default())
}

/// Example endpoints accept any key; each becomes a field.
pub fn build_example_endpoint(
    options: &EndpointOptions,
    source: Option<&ExampleEndpoint>,
) -> Result<ExampleEndpoint, ContextError> {
    let mut endpoint = source.cloned().unwrap_or_default();
    for (key, value) in options.overrides() {
        endpoint.fields.insert(key.to_string(), value.to_string());
    }
    Ok(endpoint)
}

/// Build a descriptor of `kind`, dispatching to the matching builder.
///
/// A source descriptor of another kind is a caller error.
pub fn build_endpoint(
    kind: EndpointKind,
    options: &EndpointOptions,
    source: Option<&EndpointDescriptor>,
) -> Result<EndpointDescriptor, ContextError> {
    if let Some(source) = source {
        if source.kind() != kind {
            return Err(ContextError::ConflictingOptions(format!(
                "cannot seed a {} endpoint from a {} endpoint",
                kind,
                source.kind()
            )));
        }
    }

    let descriptor = match (kind, source) {
        (EndpointKind::Local, Some(EndpointDescriptor::Local(src))) => {
            build_local_endpoint(options, Some(src))?.into()
        }
        (EndpointKind::Local, _) => build_local_endpoint(options, None)?.into(),
        (EndpointKind::Example, Some(EndpointDescriptor::Example(src))) => {
            build_example_endpoint(options, Some(src))?.into()
        }
        (EndpointKind::Example, _) => build_example_endpoint(options, None)?.into(),
        (EndpointKind::Aci, Some(EndpointDescriptor::Aci(src))) => {
            build_aci_endpoint(options, Some(src))?.into()
        }
        (EndpointKind::Aci, _) => build_aci_endpoint(options, None)?.into(),
        (EndpointKind::Kubernetes, Some(EndpointDescriptor::Kubernetes(src))) => {
            build_kubernetes_endpoint(options, Some(src))?.into()
        }
        (EndpointKind::Kubernetes, _) => build_kubernetes_endpoint(options, None)?.into(),
        (EndpointKind::Docker, Some(EndpointDescriptor::Docker(src))) => {
            build_docker_endpoint(options, Some(src))?.into()
        }
        (EndpointKind::Docker, _) => build_docker_endpoint(options, None)?.into(),
    };
    Ok(descriptor)
}
