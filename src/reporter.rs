//! Outcome reporting for sqlbatch
//!
//! Runs once at the end of every run, whether the engine succeeded or not.
//! After a failure the open connection is rolled back; the connection is
//! then always closed. Failures during this cleanup are kept as secondary
//! errors. The exit code is taken from the first failure of the run, and
//! from a cleanup failure only if nothing failed before it.

use tracing::error;

use crate::connection::Connection;
use crate::error::{BatchError, BatchResult};

/// The final result of a run
#[derive(Debug)]
pub struct RunResult {
    exit_code: u8,
    error: Option<BatchError>,
    cleanup_errors: Vec<BatchError>,
}

impl RunResult {
    /// Process exit code
    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// The failure that ended the run, if any
    pub fn error(&self) -> Option<&BatchError> {
        self.error.as_ref()
    }

    /// Rollback and close failures, in the order they happened
    pub fn cleanup_errors(&self) -> &[BatchError] {
        &self.cleanup_errors
    }

    /// Whether the run and its cleanup both succeeded
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// The message to show the user, if the run did not succeed
    pub fn message(&self) -> Option<String> {
        self.error
            .as_ref()
            .or_else(|| self.cleanup_errors.first())
            .map(ToString::to_string)
    }
}

/// Clean up after the engine and produce the run's result
///
/// # Arguments
/// * `connection` - The run's connection, if one was opened
/// * `outcome` - What the engine (or the steps before it) returned
pub fn finish(connection: Option<Box<dyn Connection>>, outcome: BatchResult<()>) -> RunResult {
    let mut cleanup_errors = Vec::new();

    if let Err(err) = &outcome {
        error!("{}", err.cause_chain());
    }

    if let Some(connection) = connection {
        if outcome.is_err() {
            if let Err(source) = connection.rollback() {
                let err = BatchError::Rollback(source);
                error!("{}", err.cause_chain());
                cleanup_errors.push(err);
            }
        }

        if let Err(source) = connection.close() {
            let err = BatchError::Close(source);
            error!("{}", err.cause_chain());
            cleanup_errors.push(err);
        }
    }

    let error = outcome.err();
    let exit_code = error
        .as_ref()
        .or_else(|| cleanup_errors.first())
        .map(BatchError::exit_code)
        .unwrap_or(0);

    RunResult {
        exit_code,
        error,
        cleanup_errors,
    }
}
