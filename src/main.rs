//! sqlbatch - run SQL files against a database from the command line
//!
//! Every file's contents are executed as one command, in the order the files
//! are given. Query results are printed to stdout as CSV, other commands as
//! `N records affected.`. Diagnostics go to stderr.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | usage error, or a path that is not a readable file |
//! | 2 | no driver for the URL, or the connection failed |
//! | 4 | could not create a statement |
//! | 5 | could not read a file |
//! | 6 | a file's command failed |
//! | 7 | a commit failed |
//! | 8 | rollback after a failure failed |
//! | 9 | closing the connection failed |

use std::io;
use std::process::ExitCode;

use sqlbatch::cli;
use sqlbatch::connection::DriverRegistry;
use sqlbatch::logging;
use sqlbatch::runner;

fn main() -> ExitCode {
    // Step 1: Parse command-line arguments; usage errors exit before any I/O
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprint!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    let config = args.into_config();

    // Step 2: Diagnostics go to stderr, silenced entirely by --quiet
    if let Err(err) = logging::init(config.verbose()) {
        eprintln!("warning: {err:#}");
    }

    // Step 3: Validate, connect, execute and clean up
    let registry = DriverRegistry::with_builtin_drivers();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = runner::run(&config, &registry, &mut out);

    if let Some(message) = result.message() {
        eprintln!("error: {message}");
    }

    ExitCode::from(result.exit_code())
}
