//! User-defined processor inputs
//!
//! A processor contributes one entry to the document's `processors` section
//! and a position in the per-signal processor chains. The order hint splits
//! the trace chain in two: hints below [`ORDER_HINT_POST_THRESHOLD`] run on
//! the root pipeline, the rest run on the export-only branch.

use crate::{GenericMap, ProcessorError, Signal};

/// Order hints at or above this value place a trace processor on the
/// export-only branch instead of the root pipeline.
pub const ORDER_HINT_POST_THRESHOLD: i32 = 10;

/// A user-defined telemetry transformation stage.
///
/// Implementations translate their own definition into the processor's
/// native engine configuration. Failing with an error marks this processor
/// as degraded in the compile report; it never fails the compile.
pub trait ProcessorConfigurer {
    /// Engine component kind (e.g. `"filter"`, `"transform"`).
    fn kind(&self) -> &str;

    /// Unique processor ID, `[a-zA-Z0-9-_]+`.
    fn id(&self) -> &str;

    /// Ordering tier; see [`ORDER_HINT_POST_THRESHOLD`].
    fn order_hint(&self) -> i32;

    /// Signals this processor applies to.
    fn signals(&self) -> &[Signal];

    /// Produce the processor's native configuration.
    fn config(&self) -> Result<GenericMap, ProcessorError>;

    /// Component name in the document: `"<kind>/<id>"`.
    ///
    /// Empty when the kind is empty, which the compiler treats as the
    /// processor declining to participate.
    fn component_key(&self) -> String {
        if self.kind().is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.kind(), self.id())
        }
    }
}

/// A processor whose configuration is known up front.
///
/// The common case for processors generated from declarative definitions,
/// and the standard test double.
#[derive(Debug, Clone)]
pub struct StaticProcessor {
    kind: String,
    id: String,
    order_hint: i32,
    signals: Vec<Signal>,
    config: GenericMap,
}

impl StaticProcessor {
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<String>,
        order_hint: i32,
        signals: impl IntoIterator<Item = Signal>,
        config: GenericMap,
    ) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            order_hint,
            signals: signals.into_iter().collect(),
            config,
        }
    }
}

impl ProcessorConfigurer for StaticProcessor {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order_hint(&self) -> i32 {
        self.order_hint
    }

    fn signals(&self) -> &[Signal] {
        &self.signals
    }

    fn config(&self) -> Result<GenericMap, ProcessorError> {
        Ok(self.config.clone())
    }
}
