//! What a single file's command produced
//!
//! An outcome lives only long enough to be rendered. Values are already
//! rendered to strings by the driver, so the renderer never needs to know
//! which database produced them.

/// The result of executing one file's command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The command returned rows
    ResultSet {
        /// Column names in result order
        columns: Vec<String>,
        /// Rows in result order, each value in column order
        rows: Vec<Vec<String>>,
    },

    /// The command returned no rows; this many rows were affected
    RowCount(u64),
}

impl ExecutionOutcome {
    /// Whether the command produced a row-returning result set
    pub fn is_result_set(&self) -> bool {
        matches!(self, ExecutionOutcome::ResultSet { .. })
    }

    /// Rows returned or affected
    pub fn row_count(&self) -> u64 {
        match self {
            ExecutionOutcome::ResultSet { rows, .. } => rows.len() as u64,
            ExecutionOutcome::RowCount(count) => *count,
        }
    }
}
