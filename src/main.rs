use argh::FromArgs;
use chain_shell::{EditorLines, Interpreter, LineSource, ReaderLines, SessionEnd};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(FromArgs)]
/// Run commands chained with `;` (one after another) and `&` (side by side).
struct Args {
    #[argh(switch)]
    /// read lines from stdin without the line editor
    plain: bool,

    #[argh(option, short = 'c')]
    /// run this line instead of prompting; may be repeated
    command: Vec<String>,

    #[argh(option, default = "String::from(\"warn\")")]
    /// log filter used when RUST_LOG is not set
    log_level: String,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(unix)]
fn run(args: Args) -> anyhow::Result<SessionEnd> {
    use chain_shell::ChainOutcome;
    use chain_shell::ProcessFacility;

    let mut sh = Interpreter::new(ProcessFacility::new(), io::stdout());

    if !args.command.is_empty() {
        for line in &args.command {
            if sh.execute_line(line)? == ChainOutcome::Exit {
                return Ok(SessionEnd::Exit);
            }
        }
        return Ok(SessionEnd::EndOfInput);
    }

    let mut lines: Box<dyn LineSource> = if args.plain {
        Box::new(ReaderLines::new(io::stdin().lock(), io::stdout()))
    } else {
        match EditorLines::new() {
            Ok(editor) => Box::new(editor),
            Err(e) => {
                tracing::warn!(error = %e, "line editor unavailable, reading plain stdin");
                Box::new(ReaderLines::new(io::stdin().lock(), io::stdout()))
            }
        }
    };
    sh.repl(lines.as_mut())
}

#[cfg(not(unix))]
fn run(_args: Args) -> anyhow::Result<SessionEnd> {
    anyhow::bail!("no execution facility is available on this platform")
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    init_tracing(&args.log_level);

    match run(args) {
        Ok(end) => {
            tracing::debug!(?end, "session terminated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("chain_shell: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
