//! Weir - Adapters
//!
//! The destination adapter registry. An adapter translates one destination
//! kind's key/value configuration into the exporter (and any ancillary
//! components) the engine needs, confined to the `Config` it is handed.
//!
//! # Contract
//!
//! For each enabled signal the adapter creates one pipeline named
//! `"<signal>/<discriminator>"` and returns exactly those names; all
//! component names derive deterministically from the adapter kind and the
//! destination ID so repeated compiles are stable. A missing required key
//! fails with a descriptive error, which the compiler records against the
//! destination without failing the compile.
//!
//! New destination kinds plug in by appending to the registration list in
//! [`builtin_adapters`]; the compiler never changes.

mod common;
mod debug;
mod endpoint;
mod error;
mod otlp_grpc;
mod otlp_http;
mod registry;

pub use common::export_pipelines;
pub use debug::DebugAdapter;
pub use endpoint::{parse_otlp_grpc_endpoint, parse_otlp_http_endpoint};
pub use error::{AdapterError, Result};
pub use otlp_grpc::OtlpGrpcAdapter;
pub use otlp_http::OtlpHttpAdapter;
pub use registry::{builtin_adapters, AdapterRegistry, DestinationAdapter};
