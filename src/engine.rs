//! Execution engine for sqlbatch
//!
//! Files run strictly in the order given. For each file the engine reads the
//! whole text, submits it as one command, commits if the transaction mode
//! asks for a commit per file, and renders the outcome before moving on. The
//! first failure stops the run; later files are never read.
//!
//! Under [`TransactionMode::None`] the engine never commits. Whatever the
//! commands changed is left to the driver when the connection closes, which
//! for SQLite means it is discarded.

use std::fs;
use std::io::Write;

use tracing::{debug, info};

use crate::config::RunConfig;
use crate::connection::Connection;
use crate::error::{BatchError, BatchResult};
use crate::renderer::ResultRenderer;
use crate::source_file::SourceFile;
use crate::transaction::TransactionMode;

/// Runs validated files against one open connection
pub struct ExecutionEngine<'a> {
    connection: &'a dyn Connection,
    tx_mode: TransactionMode,
    renderer: ResultRenderer,
}

impl<'a> ExecutionEngine<'a> {
    /// Create an engine for `connection` using the run's settings
    pub fn new(connection: &'a dyn Connection, config: &RunConfig) -> Self {
        ExecutionEngine {
            connection,
            tx_mode: config.tx_mode(),
            renderer: ResultRenderer::new(config.print_columns(), config.quote()),
        }
    }

    /// Execute every file in order, writing outcomes to `out`
    ///
    /// # Returns
    /// * `Ok(())` once every file ran and any ALL-mode commit succeeded
    /// * `Err(BatchError)` for the first failure; nothing after it ran
    pub fn run<W: Write>(&self, files: Vec<SourceFile>, out: &mut W) -> BatchResult<()> {
        let mut statement = self
            .connection
            .create_statement()
            .map_err(BatchError::CreateStatement)?;

        for file in files {
            let path = file.display_path();

            let command = fs::read_to_string(file.path()).map_err(|source| BatchError::FileRead {
                path: path.clone(),
                source,
            })?;

            info!("Executing command:\n{command}");
            let outcome = statement
                .execute(&command)
                .map_err(|source| BatchError::Execute {
                    path: path.clone(),
                    source: Box::new(source),
                })?;

            if self.tx_mode.commits_after_each_file() {
                self.connection
                    .commit()
                    .map_err(|source| BatchError::CommitFile {
                        path: path.clone(),
                        source,
                    })?;
                debug!(file = %path.display(), "committed");
            }
            info!("Command execution complete.");

            if outcome.is_result_set() {
                info!(
                    "Command returned resultset with {} rows. Printing:",
                    outcome.row_count()
                );
            } else {
                info!("Command did not return resultset.");
            }

            self.renderer
                .render(&outcome, out)
                .map_err(|source| BatchError::Execute {
                    path,
                    source: Box::new(source),
                })?;
        }

        if self.tx_mode.commits_at_end() {
            self.connection.commit().map_err(BatchError::CommitAll)?;
            debug!("committed all files");
        }

        Ok(())
    }
}
