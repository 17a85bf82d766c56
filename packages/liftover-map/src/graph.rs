//! The consolidated mapping graph and its assembler
//!
//! YAML shape of the artifact:
//!
//! ```yaml
//! Source: CCDIv2.1.0
//! Models:
//!   CCDIv1.7.2: { Version: 1.7.2 }
//! Props:
//!   target_node:
//!     target_prop:
//!       CCDIv1.7.2:
//!         - source_prop: { Parents: source_node }
//! TBD:
//!   - { old_model: ..., old_node: ..., old_prop: ..., new_model: ..., ... }
//! ```
//!
//! `Models` and `Props` are ordered maps, so assembling the same input twice
//! serializes byte-for-byte identically.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain::Chain;
use crate::edge::{model_name, model_version, Edge};
use crate::row::LiftoverRow;

/// Per-model metadata in the Models section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(rename = "Version")]
    pub version: String,
}

/// One historical crosswalk entry under a target property: the property and
/// the node it lived on in some older model.
///
/// Serializes as the single-key map `{source_prop: {Parents: source_node}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropEntry {
    pub source_prop: String,
    pub source_node: String,
}

impl PropEntry {
    pub fn new(source_prop: impl Into<String>, source_node: impl Into<String>) -> Self {
        Self {
            source_prop: source_prop.into(),
            source_node: source_node.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ParentRef {
    #[serde(rename = "Parents")]
    parents: String,
}

impl Serialize for PropEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.source_prop,
            &ParentRef {
                parents: self.source_node.clone(),
            },
        )?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, ParentRef>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((prop, parent)), None) => Ok(PropEntry {
                source_prop: prop,
                source_node: parent.parents,
            }),
            _ => Err(D::Error::custom(
                "expected a single {source_prop: {Parents: source_node}} entry",
            )),
        }
    }
}

/// source_model → ordered, deduplicated entries for one target property
pub type ModelEntries = BTreeMap<String, Vec<PropEntry>>;

/// target_node → target_prop → per-model entries
pub type PropMap = BTreeMap<String, BTreeMap<String, ModelEntries>>;

/// The canonical consolidated artifact.
///
/// `Props` is keyed only by anchor-side targets; `TBD` holds the flattened,
/// deduplicated edges of lineage that never reached the anchor and is kept
/// out of `Props` for operator review. Read-only once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingGraph {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Models")]
    pub models: BTreeMap<String, ModelInfo>,
    #[serde(rename = "Props")]
    pub props: PropMap,
    #[serde(rename = "TBD")]
    pub tbd: Vec<Edge>,
}

impl MappingGraph {
    /// Version string recorded for `model`, if the model is registered
    pub fn version_of(&self, model: &str) -> Option<&str> {
        self.models.get(model).map(|m| m.version.as_str())
    }
}

/// Owns the in-progress graph exclusively during one assembly run and
/// yields the immutable result (the MappingGraphAssembler).
pub struct MappingGraphBuilder {
    graph: MappingGraph,
}

impl MappingGraphBuilder {
    pub fn new(anchor_model: impl Into<String>) -> Self {
        Self {
            graph: MappingGraph {
                source: anchor_model.into(),
                models: BTreeMap::new(),
                props: BTreeMap::new(),
                tbd: Vec::new(),
            },
        }
    }

    fn register_model(&mut self, model: &str) {
        self.graph
            .models
            .entry(model.to_string())
            .or_insert_with(|| ModelInfo {
                version: model_version(model),
            });
    }

    fn register_edge_models(&mut self, edge: &Edge) {
        self.register_model(&edge.old_model);
        self.register_model(&edge.new_model);
    }

    fn push_prop_entry(
        &mut self,
        target_node: &str,
        target_prop: &str,
        source_model: &str,
        entry: PropEntry,
    ) {
        let entries = self
            .graph
            .props
            .entry(target_node.to_string())
            .or_default()
            .entry(target_prop.to_string())
            .or_default()
            .entry(source_model.to_string())
            .or_default();
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }

    /// Fold one complete chain into Props. The final edge's destination is
    /// the target key; every edge contributes an entry under its own model.
    pub fn add_complete_chain(&mut self, chain: &Chain) {
        let final_edge = chain.final_edge();
        let target_node = final_edge.new_node.clone();
        let target_prop = final_edge.new_prop.clone();

        self.graph
            .props
            .entry(target_node.clone())
            .or_default()
            .entry(target_prop.clone())
            .or_default();

        for edge in chain.edges() {
            self.register_edge_models(edge);
            self.push_prop_entry(
                &target_node,
                &target_prop,
                &edge.old_model,
                PropEntry::new(&edge.old_prop, &edge.old_node),
            );
        }
    }

    /// Record one conflicted chain: its edges go to TBD, flattened and
    /// deduplicated, and never touch Props. Their models are still
    /// registered so TBD-only models stay extractable.
    pub fn add_conflicted_chain(&mut self, chain: &Chain) {
        for edge in chain.edges() {
            self.register_edge_models(edge);
            if !self.graph.tbd.contains(edge) {
                self.graph.tbd.push(edge.clone());
            }
        }
    }

    /// Fold one table row directly, without chain resolution (the
    /// SingleTableConverter path for the two-version case).
    pub fn add_row(&mut self, row: &LiftoverRow) {
        self.register_model(&model_name(&row.lift_from_version));
        self.register_model(&model_name(&row.lift_to_version));

        if row.lift_to_node.is_empty() {
            let edge = Edge::from_row(row);
            if !self.graph.tbd.contains(&edge) {
                self.graph.tbd.push(edge);
            }
            return;
        }

        self.graph
            .props
            .entry(row.lift_to_node.clone())
            .or_default()
            .entry(row.lift_to_property.clone())
            .or_default();

        if !row.lift_from_property.is_empty() {
            let old_model = model_name(&row.lift_from_version);
            self.push_prop_entry(
                &row.lift_to_node,
                &row.lift_to_property,
                &old_model,
                PropEntry::new(&row.lift_from_property, &row.lift_from_node),
            );
        }
    }

    pub fn finish(self) -> MappingGraph {
        self.graph
    }
}

/// Assemble the canonical graph from classified chains.
pub fn assemble(complete: &[Chain], conflicted: &[Chain], anchor_model: &str) -> MappingGraph {
    let mut builder = MappingGraphBuilder::new(anchor_model);
    for chain in complete {
        builder.add_complete_chain(chain);
    }
    for chain in conflicted {
        builder.add_conflicted_chain(chain);
    }
    builder.finish()
}

/// Convert a single two-version table directly, bypassing chain resolution.
pub fn convert_single_table(rows: &[LiftoverRow], source_model: &str) -> MappingGraph {
    let mut builder = MappingGraphBuilder::new(source_model);
    for row in rows {
        builder.add_row(row);
    }
    builder.finish()
}
