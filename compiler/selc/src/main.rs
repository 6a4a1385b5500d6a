//! Selang scanner CLI.
//!
//! Thin wiring around [`selc::commands`]: tracing setup, handle
//! plumbing, and the process exit code. Argument handling lives in the
//! library so it stays testable.

use selc::commands::{dispatch, EXIT_FAILURE};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = match dispatch(&args, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
