//! Endpoint descriptors
//!
//! A context carries at most one descriptor per endpoint kind. Descriptors are
//! plain records of connection fields; nothing here touches the network or the
//! filesystem, so TLS material is kept as the paths the user supplied.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default engine address used when a docker endpoint has no `host`.
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Endpoint kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// Implicit local engine
    Local,
    /// Fixed-output fixture used to exercise the store
    Example,
    /// Cloud container instances
    Aci,
    Kubernetes,
    /// Docker engine reached over a socket or TCP
    Docker,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 5] = [
        EndpointKind::Local,
        EndpointKind::Example,
        EndpointKind::Aci,
        EndpointKind::Kubernetes,
        EndpointKind::Docker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EndpointKind::Local => "local",
            EndpointKind::Example => "example",
            EndpointKind::Aci => "aci",
            EndpointKind::Kubernetes => "kubernetes",
            EndpointKind::Docker => "docker",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKind {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EndpointKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ContextError::invalid_option(
                    "endpoint",
                    s,
                    "unknown endpoint kind (expected local, example, aci, kubernetes or docker)",
                )
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEndpoint {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleEndpoint {
    pub fields: BTreeMap<String, String>,
}

/// Cloud container instance coordinates. All values are opaque to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AciEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesEndpoint {
    /// Path to a kubeconfig file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    /// Overrides the context selected in the kubeconfig
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_override: Option<String>,
    /// Overrides the namespace selected in the kubeconfig
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_override: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// CA bundle path, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// Client certificate path, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    /// Client key path, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// `None` means unset, which reads as `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_tls_verify: Option<bool>,
}

impl DockerEndpoint {
    pub fn resolved_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_DOCKER_HOST)
    }

    pub fn skip_tls_verify(&self) -> bool {
        self.skip_tls_verify.unwrap_or(false)
    }
}

/// Typed endpoint payload, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointDescriptor {
    Local(LocalEndpoint),
    Example(ExampleEndpoint),
    Aci(AciEndpoint),
    Kubernetes(KubernetesEndpoint),
    Docker(DockerEndpoint),
}

impl EndpointDescriptor {
    pub fn kind(&self) -> EndpointKind {
        match self {
            EndpointDescriptor::Local(_) => EndpointKind::Local,
            EndpointDescriptor::Example(_) => EndpointKind::Example,
            EndpointDescriptor::Aci(_) => EndpointKind::Aci,
            EndpointDescriptor::Kubernetes(_) => EndpointKind::Kubernetes,
            EndpointDescriptor::Docker(_) => EndpointKind::Docker,
        }
    }

    pub fn as_docker(&self) -> Option<&DockerEndpoint> {
        match self {
            EndpointDescriptor::Docker(ep) => Some(ep),
            _ => None,
        }
    }

    pub fn as_kubernetes(&self) -> Option<&KubernetesEndpoint> {
        match self {
            EndpointDescriptor::Kubernetes(ep) => Some(ep),
            _ => None,
        }
    }

    pub fn as_aci(&self) -> Option<&AciEndpoint> {
        match self {
            EndpointDescriptor::Aci(ep) => Some(ep),
            _ => None,
        }
    }

    pub fn as_example(&self) -> Option<&ExampleEndpoint> {
        match self {
            EndpointDescriptor::Example(ep) => Some(ep),
            _ => None,
        }
    }
}

impl From<LocalEndpoint> for EndpointDescriptor {
    fn from(ep: LocalEndpoint) -> Self {
        EndpointDescriptor::Local(ep)
    }
}

impl From<ExampleEndpoint> for EndpointDescriptor {
    fn from(ep: ExampleEndpoint) -> Self {
        EndpointDescriptor::Example(ep)
    }
}

impl From<AciEndpoint> for EndpointDescriptor {
    fn from(ep: AciEndpoint) -> Self {
        EndpointDescriptor::Aci(ep)
    }
}

impl From<KubernetesEndpoint> for EndpointDescriptor {
    fn from(ep: KubernetesEndpoint) -> Self {
        EndpointDescriptor::Kubernetes(ep)
    }
}

impl From<DockerEndpoint> for EndpointDescriptor {
    fn from(ep: DockerEndpoint) -> Self {
        EndpointDescriptor::Docker(ep)
    }
}
