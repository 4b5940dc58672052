use crate::command::{ExecutionFacility, Handle};
use crate::error::SpawnError;
use std::io::{self, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Name of the only builtin the interpreter recognizes.
pub const EXIT: &str = "exit";

/// Result of handing one command to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The command was the `exit` builtin; nothing was started.
    Exit,
    /// A new execution context was started.
    Started(Handle),
    /// The facility could not start the command. The error was already reported.
    Failed,
}

/// Echoes the program name to `out`, then starts `argv` on `facility`.
///
/// `argv` must not be empty. The echo is written before the `exit` check, so
/// `exit` is traced like any other command. Facility errors are written to `out`
/// as `<program>: <error>` and reported as [`Dispatched::Failed`]. A panic inside
/// the facility is contained here and reported the same way. Only a failing
/// output sink makes this function return `Err`.
pub fn dispatch<F>(facility: &mut F, out: &mut dyn Write, argv: &[String]) -> io::Result<Dispatched>
where
    F: ExecutionFacility + ?Sized,
{
    let Some(name) = argv.first() else {
        return Ok(Dispatched::Failed);
    };

    writeln!(out, "{}", name)?;
    out.flush()?;

    if name == EXIT {
        return Ok(Dispatched::Exit);
    }

    let started = catch_unwind(AssertUnwindSafe(|| facility.spawn(argv)))
        .unwrap_or_else(|payload| Err(SpawnError::Other(panic_payload_to_string(payload.as_ref()))));

    match started {
        Ok(handle) => {
            tracing::debug!(program = %name, %handle, "dispatched");
            Ok(Dispatched::Started(handle))
        }
        Err(e) => {
            tracing::warn!(program = %name, error = %e, "dispatch failed");
            writeln!(out, "{}: {}", name, e)?;
            out.flush()?;
            Ok(Dispatched::Failed)
        }
    }
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
