//! Pairwise extraction: the inverse of assembly
//!
//! Reconstructs the flat liftover table between one recorded source model
//! and the graph's anchor. Row order carries no meaning; compare results as
//! a set.

use tracing::info;

use crate::error::{LiftoverError, Result};
use crate::graph::MappingGraph;
use crate::row::LiftoverRow;

/// Extract the direct mappings from `source_model` to the anchor
/// (the PairwiseExtractor).
///
/// Targets with no entry for `source_model` emit nothing: an unmapped
/// target is simply absent from the table rather than reported as a
/// placeholder row. TBD edges originating in `source_model` do emit a row,
/// with empty destination node/property, so still-unresolved lineage stays
/// visible in the output.
pub fn extract_pairwise(graph: &MappingGraph, source_model: &str) -> Result<Vec<LiftoverRow>> {
    let anchor_version = graph
        .version_of(&graph.source)
        .ok_or_else(|| LiftoverError::missing_source_model(&graph.source))?;
    let source_version = graph
        .version_of(source_model)
        .ok_or_else(|| LiftoverError::missing_source_model(source_model))?;

    let mut rows = Vec::new();

    for (target_node, props) in &graph.props {
        for (target_prop, model_entries) in props {
            let Some(entries) = model_entries.get(source_model) else {
                continue;
            };
            for entry in entries {
                rows.push(LiftoverRow::new(
                    &entry.source_node,
                    &entry.source_prop,
                    source_version,
                    target_node,
                    target_prop,
                    anchor_version,
                ));
            }
        }
    }

    for edge in &graph.tbd {
        if edge.old_model == source_model {
            rows.push(LiftoverRow::new(
                &edge.old_node,
                &edge.old_prop,
                source_version,
                "",
                "",
                anchor_version,
            ));
        }
    }

    info!(
        source_model,
        anchor = %graph.source,
        rows = rows.len(),
        "extracted pairwise mappings"
    );
    Ok(rows)
}
