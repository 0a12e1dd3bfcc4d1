//! Processor compilation
//!
//! Turns user-defined processors into document entries and classifies each
//! into the per-signal chains. A processor that fails to produce its config
//! is recorded and skipped; the rest of the compile continues.

use std::collections::BTreeMap;

use weir_model::{GenericMap, ProcessorConfigurer, Signal, ORDER_HINT_POST_THRESHOLD};

/// The outcome of compiling the processor list.
#[derive(Debug, Default)]
pub struct ProcessorCompilation {
    /// Document entries: component key → native config.
    pub configs: GenericMap,

    /// Trace processors for the root pipeline (order hint below the
    /// post threshold).
    pub traces_pre: Vec<String>,

    /// Trace processors for the export-only branch (order hint at or above
    /// the post threshold).
    pub traces_post: Vec<String>,

    /// Metrics processors for the metrics root pipeline.
    pub metrics: Vec<String>,

    /// Logs processors for the logs root pipeline.
    pub logs: Vec<String>,

    /// Config-generation failures, keyed by processor ID.
    pub errors: BTreeMap<String, String>,
}

/// Compile the ordered processor list.
///
/// Classification preserves input order within each list. A processor
/// enabled for several signals appears in each matching list. An empty
/// component key or an empty config is treated as the processor declining
/// to participate.
pub fn compile_processors(processors: &[Box<dyn ProcessorConfigurer>]) -> ProcessorCompilation {
    let mut compilation = ProcessorCompilation::default();

    for processor in processors {
        let key = processor.component_key();
        let config = match processor.config() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(
                    processor = %processor.id(),
                    error = %err,
                    "skipping processor with failing config"
                );
                compilation
                    .errors
                    .insert(processor.id().to_string(), err.to_string());
                continue;
            }
        };

        if key.is_empty() || config.is_empty() {
            continue;
        }

        compilation
            .configs
            .insert(key.clone(), serde_json::Value::Object(config));

        for &signal in processor.signals() {
            match signal {
                Signal::Traces => {
                    if processor.order_hint() < ORDER_HINT_POST_THRESHOLD {
                        compilation.traces_pre.push(key.clone());
                    } else {
                        compilation.traces_post.push(key.clone());
                    }
                }
                Signal::Metrics => compilation.metrics.push(key.clone()),
                Signal::Logs => compilation.logs.push(key.clone()),
            }
        }
    }

    compilation
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use weir_model::{ProcessorError, StaticProcessor};

    use crate::base::object;

    struct FailingProcessor;

    impl ProcessorConfigurer for FailingProcessor {
        fn kind(&self) -> &str {
            "filter"
        }

        fn id(&self) -> &str {
            "broken"
        }

        fn order_hint(&self) -> i32 {
            0
        }

        fn signals(&self) -> &[Signal] {
            &[Signal::Traces]
        }

        fn config(&self) -> Result<GenericMap, ProcessorError> {
            Err(ProcessorError::invalid_config("broken", "missing field 'rules'"))
        }
    }

    fn boxed(processor: StaticProcessor) -> Box<dyn ProcessorConfigurer> {
        Box::new(processor)
    }

    #[test]
    fn test_empty_input() {
        let compilation = compile_processors(&[]);
        assert!(compilation.configs.is_empty());
        assert!(compilation.errors.is_empty());
    }

    #[test]
    fn test_order_hint_splits_trace_tiers() {
        let processors = vec![
            boxed(StaticProcessor::new(
                "filter",
                "early",
                5,
                [Signal::Traces],
                object(json!({ "error_mode": "ignore" })),
            )),
            boxed(StaticProcessor::new(
                "transform",
                "late",
                10,
                [Signal::Traces],
                object(json!({ "statements": [] })),
            )),
        ];

        let compilation = compile_processors(&processors);
        assert_eq!(compilation.traces_pre, vec!["filter/early"]);
        assert_eq!(compilation.traces_post, vec!["transform/late"]);
        assert!(compilation.configs.contains_key("filter/early"));
        assert!(compilation.configs.contains_key("transform/late"));
    }

    #[test]
    fn test_multi_signal_processor_listed_per_signal() {
        let processors = vec![boxed(StaticProcessor::new(
            "attributes",
            "tag",
            1,
            [Signal::Traces, Signal::Metrics, Signal::Logs],
            object(json!({ "actions": [] })),
        ))];

        let compilation = compile_processors(&processors);
        assert_eq!(compilation.traces_pre, vec!["attributes/tag"]);
        assert_eq!(compilation.metrics, vec!["attributes/tag"]);
        assert_eq!(compilation.logs, vec!["attributes/tag"]);
        // Only one document entry regardless of how many signals use it.
        assert_eq!(compilation.configs.len(), 1);
    }

    #[test]
    fn test_failing_processor_recorded_and_skipped() {
        let processors: Vec<Box<dyn ProcessorConfigurer>> = vec![
            Box::new(FailingProcessor),
            boxed(StaticProcessor::new(
                "filter",
                "good",
                1,
                [Signal::Traces],
                object(json!({ "error_mode": "ignore" })),
            )),
        ];

        let compilation = compile_processors(&processors);
        assert_eq!(compilation.traces_pre, vec!["filter/good"]);
        assert!(compilation.errors["broken"].contains("missing field 'rules'"));
        assert!(!compilation.configs.contains_key("filter/broken"));
    }

    #[test]
    fn test_empty_config_skipped_silently() {
        let processors = vec![boxed(StaticProcessor::new(
            "noop",
            "empty",
            1,
            [Signal::Logs],
            GenericMap::new(),
        ))];

        let compilation = compile_processors(&processors);
        assert!(compilation.configs.is_empty());
        assert!(compilation.logs.is_empty());
        assert!(compilation.errors.is_empty());
    }

    #[test]
    fn test_empty_kind_skipped_silently() {
        let processors = vec![boxed(StaticProcessor::new(
            "",
            "anonymous",
            1,
            [Signal::Logs],
            object(json!({ "x": 1 })),
        ))];

        let compilation = compile_processors(&processors);
        assert!(compilation.configs.is_empty());
        assert!(compilation.errors.is_empty());
    }

    #[test]
    fn test_input_order_preserved() {
        let processors = vec![
            boxed(StaticProcessor::new(
                "filter",
                "b",
                1,
                [Signal::Metrics],
                object(json!({ "x": 1 })),
            )),
            boxed(StaticProcessor::new(
                "filter",
                "a",
                2,
                [Signal::Metrics],
                object(json!({ "x": 2 })),
            )),
        ];

        let compilation = compile_processors(&processors);
        assert_eq!(compilation.metrics, vec!["filter/b", "filter/a"]);
    }
}
