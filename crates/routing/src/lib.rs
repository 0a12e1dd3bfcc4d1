//! Weir - Routing
//!
//! Routing tables mapping workload identity to pipeline names, per signal.
//!
//! A table is compiled once (by the gateway compiler when it embeds data
//! streams into the router connector config, and again by the runtime
//! router when that connector starts) and is read-only afterwards. The
//! hot path is a single hash lookup returning pre-built name sets.
//!
//! # Key form
//!
//! Workloads are keyed `"<namespace>/<kind>/<name>"` where the kind is the
//! canonical lowercase token ([`WorkloadKind::as_str`]). Any accepted
//! spelling of a kind normalizes to the same token, so the compiler's keys
//! and the router's attribute-derived keys always agree.

mod error;
mod table;
mod workload;


pub use error::{Result, RoutingError};
pub use table::{MergeStrategy, RoutingTable, RoutingTableBuilder, SignalPipelines};
pub use workload::{WorkloadKey, WorkloadKind};
