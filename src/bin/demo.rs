// demo: run one design-pattern demo, the whole catalog, or list the ids.
//
//   demo               run every demo in canonical order
//   demo list          print the canonical order
//   demo <pattern-id>  run a single demo
//
// Exit codes: 0 success, 1 unknown pattern or bad usage, 2 output failure.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;

use design_patterns::catalog::{Catalog, LoggingConfig};
use design_patterns::logging::setup_tracing;
use design_patterns::{Harness, HarnessError, Mode, Registry};

fn run() -> Result<(), HarnessError> {
    let catalog = Catalog::embedded()?;
    setup_tracing(&catalog.logging)?;

    let mode = Mode::from_args(env::args().skip(1))?;
    let harness = Harness::new(Registry::with_builtin_demos(&catalog)?);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    harness.execute(&mode, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The catalog may be what failed, so fall back to default logging.
            let _ = setup_tracing(&LoggingConfig::default());
            debug!(exit_code = err.exit_code(), ?err, "harness failed");
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(err.exit_code())
        }
    }
}
