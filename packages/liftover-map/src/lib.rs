//! liftover-map — consolidated multi-version schema mapping graphs
//!
//! Converts pairwise "liftover" tables (property-level crosswalks between
//! two successive model versions) into one consolidated mapping graph keyed
//! by a designated anchor model, and inverts that graph back into a pairwise
//! table for any recorded version.
//!
//! Pipeline:
//! - rows → [`extract_edges`] → edges
//! - edges → [`build_chains`] → complete/conflicted chains
//! - chains → [`assemble`] → [`MappingGraph`]
//! - graph → [`extract_pairwise`] → rows
//!
//! [`convert_single_table`] is the direct two-version path that bypasses
//! chain resolution. Everything is a one-shot, deterministic batch
//! transform over exclusively-owned data.

pub mod chain;
pub mod edge;
pub mod error;
pub mod extract;
pub mod graph;
pub mod io;
pub mod row;
pub mod split;

pub use chain::{build_chains, Chain};
pub use edge::{extract_edges, model_name, model_version, Edge, Triple, MODEL_HANDLE};
pub use error::{LiftoverError, Result};
pub use extract::extract_pairwise;
pub use graph::{
    assemble, convert_single_table, MappingGraph, MappingGraphBuilder, ModelInfo, PropEntry,
};
pub use io::{load_liftover_tsv, load_mapping_yaml, write_liftover_tsv, write_mapping_yaml};
pub use row::LiftoverRow;
pub use split::{is_relationship_row, split_rows};
