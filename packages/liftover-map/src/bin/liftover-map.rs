//! liftover-map CLI
//!
//! # Usage
//!
//! ```bash
//! # Combine several liftover TSVs into one consolidated mapping file
//! liftover-map combine -l 1.7.2_1.9.1.tsv -l 1.9.1_2.1.0.tsv -s CCDIv2.1.0 -o mapping.yml
//!
//! # Convert a single two-version table directly
//! liftover-map convert -l 1.7.2_1.9.1.tsv -s CCDIv1.9.1 -o mapping.yml
//!
//! # Recover the pairwise table for one recorded model
//! liftover-map extract -m mapping.yml -s CCDIv1.7.2
//!
//! # Split a table into node and relationship mappings
//! liftover-map split -l 1.7.2_1.9.1.tsv
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use liftover_map::{
    assemble, build_chains, convert_single_table, extract_edges, extract_pairwise, io, split_rows,
    Edge, LiftoverError, Result,
};

#[derive(Parser)]
#[command(name = "liftover-map")]
#[command(about = "Convert liftover mapping tables to and from consolidated mapping files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine liftover TSVs into a consolidated mapping YAML, chaining
    /// hops across versions toward the anchor model
    Combine {
        /// Liftover TSV file path (repeatable)
        #[arg(short, long = "liftover-file", required = true)]
        liftover_files: Vec<PathBuf>,

        /// Anchor model that links the others together (e.g. CCDIv2.1.0)
        #[arg(short, long)]
        source_model: String,

        /// Output mapping file path
        #[arg(short, long)]
        output_file: PathBuf,
    },

    /// Convert a single two-version liftover TSV directly (no chaining)
    Convert {
        /// Liftover TSV file path
        #[arg(short, long)]
        liftover_file: PathBuf,

        /// Source model of the mapping file (e.g. CCDIv1.9.1)
        #[arg(short, long)]
        source_model: String,

        /// Output mapping file path
        #[arg(short, long)]
        output_file: PathBuf,
    },

    /// Extract the pairwise table for one source model from a
    /// consolidated mapping file
    Extract {
        /// Combined mapping YAML file path
        #[arg(short, long)]
        map_mdf: PathBuf,

        /// Source model to extract (e.g. CCDIv1.7.2)
        #[arg(short, long)]
        source_model: String,

        /// Output TSV file path (default: auto-generated)
        #[arg(short, long)]
        liftover_file: Option<PathBuf>,
    },

    /// Split a liftover TSV into node and relationship mapping files
    Split {
        /// Liftover TSV file path
        #[arg(short, long)]
        liftover_tsv: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Combine {
            liftover_files,
            source_model,
            output_file,
        } => combine(&liftover_files, &source_model, &output_file),
        Commands::Convert {
            liftover_file,
            source_model,
            output_file,
        } => convert(&liftover_file, &source_model, &output_file),
        Commands::Extract {
            map_mdf,
            source_model,
            liftover_file,
        } => extract(&map_mdf, &source_model, liftover_file),
        Commands::Split { liftover_tsv } => split(&liftover_tsv),
    }
}

fn combine(liftover_files: &[PathBuf], source_model: &str, output_file: &Path) -> Result<()> {
    // Per-table extraction is independent; chaining needs the full edge set.
    let edge_sets: Vec<Vec<Edge>> = liftover_files
        .par_iter()
        .map(|path| {
            info!(path = %path.display(), "processing file");
            let rows = io::load_liftover_tsv(path)?;
            Ok(extract_edges(&rows))
        })
        .collect::<Result<_>>()?;
    let all_edges: Vec<Edge> = edge_sets.into_iter().flatten().collect();

    let (complete, conflicted) = build_chains(&all_edges, source_model)?;
    info!(
        complete = complete.len(),
        "found complete chain(s) reaching {source_model}"
    );
    if !conflicted.is_empty() {
        warn!(
            conflicted = conflicted.len(),
            "found chain(s) that did not reach {source_model}"
        );
    }

    let graph = assemble(&complete, &conflicted, source_model);
    io::write_mapping_yaml(output_file, &graph)?;
    info!(output = %output_file.display(), "combined mapping saved");
    Ok(())
}

fn convert(liftover_file: &Path, source_model: &str, output_file: &Path) -> Result<()> {
    let rows = io::load_liftover_tsv(liftover_file)?;
    let graph = convert_single_table(&rows, source_model);
    io::write_mapping_yaml(output_file, &graph)
}

fn extract(map_mdf: &Path, source_model: &str, liftover_file: Option<PathBuf>) -> Result<()> {
    let graph = io::load_mapping_yaml(map_mdf)?;
    let rows = extract_pairwise(&graph, source_model)?;

    let output_path = match liftover_file {
        Some(path) => path,
        None => {
            let source_version = graph
                .version_of(source_model)
                .ok_or_else(|| LiftoverError::missing_source_model(source_model))?;
            let anchor_version = graph
                .version_of(&graph.source)
                .ok_or_else(|| LiftoverError::missing_source_model(&graph.source))?;
            PathBuf::from(format!(
                "{source_version}_{anchor_version}_MAPPING_EXTRACTED.tsv"
            ))
        }
    };

    io::write_liftover_tsv(&output_path, &rows)?;
    info!(
        source_model,
        anchor = %graph.source,
        output = %output_path.display(),
        mappings = rows.len(),
        "pairwise mapping saved"
    );
    Ok(())
}

fn split(liftover_tsv: &Path) -> Result<()> {
    let rows = io::load_liftover_tsv(liftover_tsv)?;
    let (nodes, relationships) = split_rows(rows);

    let stem = liftover_tsv
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = liftover_tsv.parent().unwrap_or_else(|| Path::new(""));
    let nodes_path = parent.join(format!("{stem}_nodes.tsv"));
    let relationships_path = parent.join(format!("{stem}_relationships.tsv"));

    io::write_liftover_tsv(&nodes_path, &nodes)?;
    io::write_liftover_tsv(&relationships_path, &relationships)?;
    info!(
        nodes = nodes.len(),
        relationships = relationships.len(),
        "split liftover table"
    );
    Ok(())
}
