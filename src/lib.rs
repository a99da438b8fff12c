//! ctxstore: Named Endpoint Contexts
//!
//! A registry of named contexts, each bundling the endpoint configuration
//! needed to reach one or more backends (a local engine, a docker engine, a
//! kubernetes cluster, a cloud container service). Contexts are created from
//! raw option maps, optionally cloned from an existing context, and persisted
//! atomically through a pluggable storage port.

pub mod builder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod store;

pub use commands::{ContextCommandService, CreateOptions};
pub use context::Context;
pub use endpoint::{EndpointDescriptor, EndpointKind};
pub use error::{ApiError, ContextError, ErrorKind};
pub use store::ContextStore;
