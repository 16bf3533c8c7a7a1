/// Command line and environment configuration of the REPL.
mod config;

use clap::Parser;
use config::Config;
use std::io::{self, BufRead, Write};
use tforth::runtime::interpreter::{CodeManagement, threaded_interpreter::ThreadedInterpreter};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Hand one line to the interpreter and print it the way the REPL history shows it.  Blank lines
/// are ignored.
fn run_line(interpreter: &mut ThreadedInterpreter, config: &Config, line: &str) {
    let line = line.trim();

    if line.is_empty() {
        return;
    }

    let result = interpreter.process_line(line);

    println!("{} {}", line, result);

    if let Some(colour) = result.background_hex() {
        info!(colour = %colour, "background changed");
    }

    if config.show_state {
        println!("{}", interpreter);
    }
}

fn main() -> io::Result<()> {
    let config = Config::parse();

    // Log output goes to stderr so it never mixes with the REPL's output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(io::stderr)
        .init();

    debug!(?config, "starting tforth v{}", env!("CARGO_PKG_VERSION"));

    // Create the session.  It lives until the input runs out.
    let mut interpreter = ThreadedInterpreter::new();

    for line in &config.eval {
        run_line(&mut interpreter, &config, line);
    }

    if config.no_repl {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if !config.prompt.is_empty() {
            write!(stdout, "{}", config.prompt)?;
            stdout.flush()?;
        }

        let mut line = String::new();

        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        run_line(&mut interpreter, &config, &line);
    }

    Ok(())
}
