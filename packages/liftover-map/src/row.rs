//! Fixed-schema liftover table rows
//!
//! One row describes a single one-hop property crosswalk between two model
//! versions. Column names match the standard liftover TSV header.

use serde::{Deserialize, Serialize};

use crate::error::{LiftoverError, Result};

/// One row of a pairwise liftover table.
///
/// Node and property columns may be empty ("no counterpart at that end");
/// the version columns must never be.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiftoverRow {
    pub lift_from_node: String,
    pub lift_from_property: String,
    pub lift_from_version: String,
    pub lift_to_node: String,
    pub lift_to_property: String,
    pub lift_to_version: String,
}

impl LiftoverRow {
    pub fn new(
        old_node: impl Into<String>,
        old_prop: impl Into<String>,
        old_version: impl Into<String>,
        new_node: impl Into<String>,
        new_prop: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        Self {
            lift_from_node: old_node.into(),
            lift_from_property: old_prop.into(),
            lift_from_version: old_version.into(),
            lift_to_node: new_node.into(),
            lift_to_property: new_prop.into(),
            lift_to_version: new_version.into(),
        }
    }

    /// Load-time validation: version columns are required.
    ///
    /// `line` is the 1-based line number in the source file, used for error
    /// reporting only.
    pub fn validate(&self, line: u64) -> Result<()> {
        if self.lift_from_version.is_empty() {
            return Err(LiftoverError::malformed_row(
                line,
                "empty lift_from_version",
            ));
        }
        if self.lift_to_version.is_empty() {
            return Err(LiftoverError::malformed_row(line, "empty lift_to_version"));
        }
        Ok(())
    }
}
