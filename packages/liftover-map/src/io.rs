//! Table and mapping-file I/O
//!
//! Thin plumbing around the core: tab-separated liftover tables with the
//! standard six-column header, and the consolidated mapping file as YAML.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::graph::MappingGraph;
use crate::row::LiftoverRow;

/// Load a liftover TSV. The header row is required; rows are validated at
/// load time (version columns must be present and non-empty).
pub fn load_liftover_tsv(path: impl AsRef<Path>) -> Result<Vec<LiftoverRow>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<LiftoverRow>().enumerate() {
        let row = record?;
        // 1-based file line: header is line 1
        row.validate(idx as u64 + 2)?;
        rows.push(row);
    }
    info!(path = %path.display(), rows = rows.len(), "loaded liftover table");
    Ok(rows)
}

/// Write rows as a liftover TSV with the standard header.
pub fn write_liftover_tsv(path: impl AsRef<Path>, rows: &[LiftoverRow]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote liftover table");
    Ok(())
}

/// Load a consolidated mapping YAML file.
pub fn load_mapping_yaml(path: impl AsRef<Path>) -> Result<MappingGraph> {
    let file = File::open(path.as_ref())?;
    let graph = serde_yaml::from_reader(BufReader::new(file))?;
    Ok(graph)
}

/// Write a consolidated mapping YAML file.
pub fn write_mapping_yaml(path: impl AsRef<Path>, graph: &MappingGraph) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    serde_yaml::to_writer(BufWriter::new(file), graph)?;
    info!(path = %path.display(), source = %graph.source, "wrote mapping file");
    Ok(())
}
