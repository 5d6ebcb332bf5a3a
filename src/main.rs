use std::{io::Write, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use fir::{
    interpreter::session::{DEFAULT_MAX_INCLUDE_DEPTH, SessionOptions},
    run_script,
};
use tracing_subscriber::EnvFilter;

/// fir runs scripts written in Fir, a line-oriented stack language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    script: PathBuf,

    /// Logs every executed command and include to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Does not print the execution time when the script ends.
    #[arg(long)]
    no_timing: bool,

    /// Maximum nesting of `using` directives.
    #[arg(long, default_value_t = DEFAULT_MAX_INCLUDE_DEPTH)]
    max_include_depth: usize,
}

/// Installs the log subscriber. `FIR_LOG` sets the filter; `--verbose`
/// raises it to `debug`.
fn install_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("FIR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    let start = Instant::now();
    let options = SessionOptions { base_dir:          None,
                                   max_include_depth: args.max_include_depth, };

    let status = match run_script(&args.script, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = std::io::stdout().flush();
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    };

    if !args.no_timing {
        println!("Execution time: {} seconds", start.elapsed().as_secs_f64());
    }
    status
}
