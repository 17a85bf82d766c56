//! Node/relationship row splitter
//!
//! Relationship mappings are written with a dotted property path
//! (`node.property`); everything else is a plain node mapping.

use crate::row::LiftoverRow;

/// True when either property column carries a dotted path
pub fn is_relationship_row(row: &LiftoverRow) -> bool {
    row.lift_from_property.contains('.') || row.lift_to_property.contains('.')
}

/// Partition rows into (node rows, relationship rows), preserving order.
pub fn split_rows(rows: Vec<LiftoverRow>) -> (Vec<LiftoverRow>, Vec<LiftoverRow>) {
    rows.into_iter().partition(|row| !is_relationship_row(row))
}
