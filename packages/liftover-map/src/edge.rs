//! Mapping edges extracted from liftover rows
//!
//! An edge is one documented one-hop crosswalk fact: property `old_prop` on
//! node `old_node` in `old_model` became property `new_prop` on node
//! `new_node` in `new_model`. Empty node/prop fields mean "no counterpart
//! exists at that end".

use serde::{Deserialize, Serialize};

use crate::row::LiftoverRow;

/// Fixed handle prepended to version strings to form model names
pub const MODEL_HANDLE: &str = "CCDI";

/// Compose a model name from a version string ("1.7.2" → "CCDIv1.7.2")
pub fn model_name(version: &str) -> String {
    format!("{MODEL_HANDLE}v{version}")
}

/// Recover the version string from a model name ("CCDIv1.7.2" → "1.7.2")
///
/// Falls back to the segment after the last 'v' for names that do not carry
/// the standard handle prefix.
pub fn model_version(model: &str) -> String {
    model
        .strip_prefix(MODEL_HANDLE)
        .and_then(|rest| rest.strip_prefix('v'))
        .unwrap_or_else(|| model.rsplit('v').next().unwrap_or(model))
        .to_string()
}

/// Key identifying one endpoint of an edge: (model, node, prop)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub model: String,
    pub node: String,
    pub prop: String,
}

impl Triple {
    pub fn new(model: impl Into<String>, node: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            node: node.into(),
            prop: prop.into(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}.{}", self.model, self.node, self.prop)
    }
}

/// One directed property mapping between two model versions.
///
/// Immutable once created. Serializes with these exact field names; the TBD
/// section of the consolidated mapping file is a list of these records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub old_model: String,
    pub old_node: String,
    pub old_prop: String,
    pub new_model: String,
    pub new_node: String,
    pub new_prop: String,
}

impl Edge {
    /// Build an edge from a table row, composing model names from the
    /// version columns. Empty node/prop fields pass through unchanged.
    pub fn from_row(row: &LiftoverRow) -> Self {
        Self {
            old_model: model_name(&row.lift_from_version),
            old_node: row.lift_from_node.clone(),
            old_prop: row.lift_from_property.clone(),
            new_model: model_name(&row.lift_to_version),
            new_node: row.lift_to_node.clone(),
            new_prop: row.lift_to_property.clone(),
        }
    }

    /// The (old_model, old_node, old_prop) endpoint
    pub fn source_triple(&self) -> Triple {
        Triple::new(&self.old_model, &self.old_node, &self.old_prop)
    }

    /// The (new_model, new_node, new_prop) endpoint
    pub fn dest_triple(&self) -> Triple {
        Triple::new(&self.new_model, &self.new_node, &self.new_prop)
    }

    /// True when all three destination fields are non-empty, i.e. the edge
    /// can act as the source of a next hop.
    pub fn has_full_destination(&self) -> bool {
        !self.new_model.is_empty() && !self.new_node.is_empty() && !self.new_prop.is_empty()
    }
}

/// Extract one edge per table row (the EdgeExtractor).
///
/// Pure per-row mapping with no side effects; malformed rows are a
/// loader-level failure and never reach this function.
pub fn extract_edges(rows: &[LiftoverRow]) -> Vec<Edge> {
    rows.iter().map(Edge::from_row).collect()
}
