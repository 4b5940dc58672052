use crate::command::ExecutionFacility;
use crate::io_adapters::LineSource;
use crate::lexer;
use crate::parser;
use crate::sync::{ChainOutcome, Synchronizer};
use std::io::Write;

/// Why a session stopped reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// An `exit` command was reached.
    Exit,
    /// The line source ran dry.
    EndOfInput,
}

/// Session-lifetime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Number shown in the next prompt; starts at 1.
    pub prompt_counter: u64,
    pub terminated: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            prompt_counter: 1,
            terminated: false,
        }
    }
}

/// A minimal command-line interpreter running `;`/`&` chains on an execution facility.
///
/// The interpreter owns the facility, the output sink and the [`SessionState`].
/// Every line goes through tokenizing, chain parsing and the [`Synchronizer`].
///
/// Example
/// ```
/// use chain_shell::{Interpreter, MemWriter, ReaderLines, SessionEnd};
/// # use chain_shell::{ExecutionFacility, Handle, SpawnError, WaitError};
/// # struct Nothing;
/// # impl ExecutionFacility for Nothing {
/// #     fn spawn(&mut self, _: &[String]) -> Result<Handle, SpawnError> { Err(SpawnError::NotFound) }
/// #     fn wait_any(&mut self) -> Result<Handle, WaitError> { Err(WaitError::NoChildren) }
/// # }
/// let out = MemWriter::new();
/// let mut sh = Interpreter::new(Nothing, out.clone());
/// let mut lines = ReaderLines::new("exit\n".as_bytes(), out.clone());
/// assert_eq!(sh.repl(&mut lines).unwrap(), SessionEnd::Exit);
/// assert_eq!(out.contents(), "shell[1]% exit\n");
/// ```
pub struct Interpreter<F, W> {
    facility: F,
    output: W,
    state: SessionState,
}

impl<F: ExecutionFacility, W: Write> Interpreter<F, W> {
    pub fn new(facility: F, output: W) -> Self {
        Self {
            facility,
            output,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The prompt for the next line, e.g. `shell[3]% `.
    pub fn prompt(&self) -> String {
        format!("shell[{}]% ", self.state.prompt_counter)
    }

    /// Processes one raw input line.
    ///
    /// The prompt counter advances for every non-empty raw line, blank or
    /// delimiter-only ones included, except the line that ends the session. On
    /// `exit` the session is marked terminated and the rest of the chain is dropped.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<ChainOutcome> {
        anyhow::ensure!(!self.state.terminated, "session already terminated");

        let chain = parser::construct_chain(lexer::split_into_tokens(line));
        let outcome = if chain.is_noop() {
            ChainOutcome::Completed
        } else {
            Synchronizer::new(&mut self.facility, &mut self.output).run_chain(&chain)?
        };

        match outcome {
            ChainOutcome::Exit => {
                tracing::debug!(prompt = self.state.prompt_counter, "exit requested");
                self.state.terminated = true;
            }
            ChainOutcome::Completed if !line.is_empty() => self.state.prompt_counter += 1,
            ChainOutcome::Completed => {}
        }
        Ok(outcome)
    }

    /// Runs the prompt/read/execute loop until `exit` or end of input.
    pub fn repl(&mut self, lines: &mut dyn LineSource) -> anyhow::Result<SessionEnd> {
        while !self.state.terminated {
            let Some(line) = lines.read_line(&self.prompt())? else {
                tracing::debug!("end of input");
                return Ok(SessionEnd::EndOfInput);
            };
            self.execute_line(&line)?;
        }
        Ok(SessionEnd::Exit)
    }
}
