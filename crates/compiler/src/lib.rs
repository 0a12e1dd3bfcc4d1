//! Weir - Compiler
//!
//! Compiles destinations, user-defined processors, and data streams into
//! the wire-ready collector configuration the gateway runs.
//!
//! # Shape of the compiled graph
//!
//! ```text
//! otlp ──→ [<signal>/in root pipelines] ──→ weirrouter/<signal>
//!                                               │
//!                              [<signal>/<group> data-stream pipelines]
//!                                               │
//!                                      forward/<pipeline> connectors
//!                                               │
//!                              [<signal>/<discriminator> destination pipelines]
//! ```
//!
//! The compiler runs synchronously, single pass, once per reconciliation.
//! Per-destination and per-processor failures degrade the compile report
//! without blocking the rest; only the preconditions and the final
//! serialization are fatal.

mod base;
mod datastream;
mod error;
mod features;
mod gateway;
mod options;
mod processors;
mod self_telemetry;


pub use base::{base_config, default_memory_limiter};
pub use error::{CompileError, Result};
pub use gateway::{compile_gateway, compile_gateway_config, GatewayConfig};
pub use options::CompileOptions;
pub use processors::{compile_processors, ProcessorCompilation};
pub use self_telemetry::{OwnTelemetryPipeline, SelfTelemetryHook, SELF_METRICS_RECEIVER};
