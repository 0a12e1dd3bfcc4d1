//! Data-stream pipeline assembly
//!
//! One pipeline per (data stream, signal) with at least one resolved
//! destination pipeline: it receives from the signal's routing connector
//! and fans out to the forward connectors of the stream's destinations.

use std::collections::{BTreeMap, BTreeSet};

use weir_model::{names, DataStream, Pipeline, Signal};

/// Build the data-stream pipelines.
///
/// `dest_forward_connectors` maps destination ID to the forward connectors
/// created for it (one per destination pipeline, named
/// `"forward/<signal>/<discriminator>"`). A (stream, signal) pair whose
/// destinations resolved to no connector is skipped entirely, since an
/// empty pipeline would make the engine reject the document.
pub(crate) fn build_datastream_pipelines(
    datastreams: &[DataStream],
    dest_forward_connectors: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Pipeline> {
    let mut pipelines: BTreeMap<String, Pipeline> = BTreeMap::new();

    for datastream in datastreams {
        for signal in Signal::ALL {
            let signal_prefix = format!("{}{}/", names::FORWARD_CONNECTOR_PREFIX, signal);

            let mut exporters: BTreeSet<String> = BTreeSet::new();
            for destination in &datastream.destinations {
                if !destination.signals.contains(&signal) {
                    continue;
                }
                let Some(connectors) = dest_forward_connectors.get(&destination.destination_name)
                else {
                    continue;
                };
                exporters.extend(
                    connectors
                        .iter()
                        .filter(|connector| connector.starts_with(&signal_prefix))
                        .cloned(),
                );
            }

            if exporters.is_empty() {
                continue;
            }

            let name = names::datastream_pipeline_name(signal, &datastream.name);
            let pipeline = pipelines.entry(name).or_insert_with(|| Pipeline {
                receivers: vec![names::router_connector_name(signal)],
                ..Pipeline::default()
            });
            let merged: BTreeSet<String> = pipeline
                .exporters
                .iter()
                .cloned()
                .chain(exporters)
                .collect();
            pipeline.exporters = merged.into_iter().collect();
        }
    }

    pipelines
}
