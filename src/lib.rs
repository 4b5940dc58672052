//! A small command-line interpreter for `;`/`&` command chains.
//!
//! A line such as `make ; ./run & tail log` is split into commands joined by
//! sequential (`;`) and concurrent (`&`) delimiters. Each command is handed to an
//! [`ExecutionFacility`], and the interpreter blocks exactly where the delimiters
//! require it: before a command that follows `;`, and at the end of every line
//! that does not end with `&`.
//!
//! The main entry point is [`Interpreter`]. The facility is pluggable; on unix,
//! [`ProcessFacility`] runs real processes.

mod command;
mod dispatch;
mod error;
#[cfg(unix)]
mod external;
mod interpreter;
mod io_adapters;
pub mod lexer;
pub mod parser;
mod sync;
#[cfg(test)]
mod testing;

pub use command::{ExecutionFacility, Handle};
pub use dispatch::{Dispatched, EXIT, dispatch};
pub use error::{SpawnError, WaitError};
#[cfg(unix)]
pub use external::ProcessFacility;
pub use interpreter::{Interpreter, SessionEnd, SessionState};
pub use io_adapters::{EditorLines, LineSource, MemWriter, ReaderLines};
pub use sync::{ChainOutcome, Synchronizer};
