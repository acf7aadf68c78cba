use strata_trace::{OutputFormat, TraceError, run};
use tracing_subscriber::EnvFilter;

fn usage() -> &'static str {
    "strata-trace\n\
\n\
USAGE:\n\
  strata-trace [--json]\n\
\n\
NOTES:\n\
  - Prints final node positions, then nodes grouped by rank and sorted by order.\n\
  - --json prints a snapshot of nodes and edge routes instead.\n\
  - RUST_LOG controls diagnostics on stderr, e.g. RUST_LOG=strata::order=debug.\n\
  - STRATA_LAYOUT_TIMING=1 logs per-phase timings.\n\
"
}

enum Action {
    Run(OutputFormat),
    Help,
}

fn parse_args(argv: &[String]) -> Result<Action, TraceError> {
    let mut format = OutputFormat::Text;
    for arg in argv.iter().skip(1) {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => return Ok(Action::Help),
            other => {
                return Err(TraceError::Usage(format!(
                    "unexpected argument: {other}\n\n{}",
                    usage()
                )));
            }
        }
    }
    Ok(Action::Run(format))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let format = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(Action::Run(format)) => format,
        Ok(Action::Help) => {
            print!("{}", usage());
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let stdout = std::io::stdout();
    if let Err(err) = run(format, &mut stdout.lock()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
