//! One complete run: validate files, connect, execute, report
//!
//! Files are validated before any connection is attempted, so a bad path
//! never touches the database. Whatever happens after the connection opens,
//! it is handed to the reporter for rollback and close.

use std::io::Write;

use tracing::info;

use crate::config::RunConfig;
use crate::connection::{self, Connection, DriverRegistry};
use crate::engine::ExecutionEngine;
use crate::error::BatchResult;
use crate::reporter::{self, RunResult};
use crate::source_file::validate_files;

/// Run every configured file and report the result
///
/// # Arguments
/// * `config` - Settings for this run
/// * `registry` - Drivers to resolve the connection URL against
/// * `out` - Where results are written
pub fn run<W: Write>(config: &RunConfig, registry: &DriverRegistry, out: &mut W) -> RunResult {
    let mut connection = None;
    let outcome = execute(config, registry, &mut connection, out);
    reporter::finish(connection, outcome)
}

fn execute<W: Write>(
    config: &RunConfig,
    registry: &DriverRegistry,
    slot: &mut Option<Box<dyn Connection>>,
    out: &mut W,
) -> BatchResult<()> {
    let files = validate_files(config.files())?;

    let connection = slot.insert(connection::connect(
        registry,
        config.db_url(),
        config.username(),
        config.password(),
    )?);

    info!("Using Transaction Type: {}", config.tx_mode());
    ExecutionEngine::new(&**connection, config).run(files, out)
}
