//! Result rendering for sqlbatch
//!
//! Row-returning commands are printed as comma-separated lines, optionally
//! preceded by a header line of column names. Other commands print a single
//! `N records affected.` line.
//!
//! By default values are joined with commas exactly as they are, with no
//! quoting. A value containing a comma or newline therefore changes the shape
//! of its row, and an empty value stays empty. `--quote` writes proper CSV
//! through the csv crate, quoting only where a value needs it.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::outcome::ExecutionOutcome;

/// Renders execution outcomes to a writer
#[derive(Debug, Clone, Copy)]
pub struct ResultRenderer {
    print_columns: bool,
    quote: bool,
}

impl ResultRenderer {
    /// Create a renderer
    ///
    /// # Arguments
    /// * `print_columns` - Whether to emit a header line of column names
    /// * `quote` - Whether to quote values that contain delimiters
    pub fn new(print_columns: bool, quote: bool) -> Self {
        ResultRenderer {
            print_columns,
            quote,
        }
    }

    /// Write one outcome and flush the writer
    pub fn render<W: Write>(&self, outcome: &ExecutionOutcome, out: &mut W) -> csv::Result<()> {
        match outcome {
            ExecutionOutcome::ResultSet { columns, rows } if self.quote => {
                let mut writer = WriterBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .quote_style(QuoteStyle::Necessary)
                    .terminator(Terminator::Any(b'\n'))
                    .from_writer(&mut *out);

                if self.print_columns {
                    writer.write_record(columns)?;
                }
                for row in rows {
                    writer.write_record(row)?;
                }
                writer.flush()?;
            }
            ExecutionOutcome::ResultSet { columns, rows } => {
                if self.print_columns {
                    writeln!(out, "{}", columns.join(","))?;
                }
                for row in rows {
                    writeln!(out, "{}", row.join(","))?;
                }
                out.flush()?;
            }
            ExecutionOutcome::RowCount(count) => {
                writeln!(out, "{count} records affected.")?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
