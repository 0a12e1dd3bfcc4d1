//! Shared adapter helpers

use weir_model::{Config, Destination, Pipeline, Signal};

/// Create one export pipeline per enabled signal.
///
/// Each pipeline is named `"<signal>/<discriminator>"` and declares only its
/// exporter; receivers and shared processors are wired in by the compiler.
/// Returns the created names in signal order. A destination with no enabled
/// signals yields nothing.
pub fn export_pipelines(
    dest: &Destination,
    config: &mut Config,
    discriminator: &str,
    exporter_name: &str,
) -> Vec<String> {
    let mut created = Vec::new();
    for signal in Signal::ALL {
        if !dest.has_signal(signal) {
            continue;
        }
        let pipeline_name = signal.pipeline_name(discriminator);
        config.service.pipelines.insert(
            pipeline_name.clone(),
            Pipeline::exporting_to(vec![exporter_name.to_string()]),
        );
        created.push(pipeline_name);
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_pipeline_per_enabled_signal() {
        let dest = Destination::new("d1", "debug").with_signals([Signal::Traces, Signal::Logs]);
        let mut config = Config::default();

        let created = export_pipelines(&dest, &mut config, "debug-d1", "debug/d1");

        assert_eq!(created, vec!["traces/debug-d1", "logs/debug-d1"]);
        assert_eq!(config.service.pipelines.len(), 2);
        assert_eq!(
            config.service.pipelines["traces/debug-d1"].exporters,
            vec!["debug/d1"]
        );
    }

    #[test]
    fn test_no_signals_no_pipelines() {
        let dest = Destination::new("d1", "debug");
        let mut config = Config::default();

        let created = export_pipelines(&dest, &mut config, "debug-d1", "debug/d1");

        assert!(created.is_empty());
        assert!(config.service.pipelines.is_empty());
    }
}
