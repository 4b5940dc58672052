//! Ordering and synchronization of the commands of one chain.
//!
//! The facility only offers "wait for any child". Waiting for one particular
//! handle is emulated by [`Synchronizer::wait_for`], which reaps children one by
//! one and discards every handle that is not the awaited one.
//!
//! The reaping primitive is shared by the whole session. A background job from
//! an earlier line that terminates while some unrelated handle is being awaited
//! is reaped and discarded by that wait; its termination is never observed again.
//! Nothing detects or reports this. A facility with per-handle join could replace
//! the discard loop and the lost terminations would disappear with it.

use crate::command::{ExecutionFacility, Handle};
use crate::dispatch::{Dispatched, dispatch};
use crate::error::WaitError;
use crate::parser::{Chain, Delimiter};
use std::io::{self, Write};

/// How processing of a chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every command was handled; the session continues.
    Completed,
    /// An `exit` command was reached; the session must terminate.
    Exit,
}

/// State threaded through a single chain.
#[derive(Debug, Default)]
struct ChainState {
    previous: Option<Handle>,
    pending: Delimiter,
}

/// Dispatches the commands of a chain and blocks where its delimiters demand.
pub struct Synchronizer<'a, F: ?Sized> {
    facility: &'a mut F,
    out: &'a mut dyn Write,
}

impl<'a, F: ExecutionFacility + ?Sized> Synchronizer<'a, F> {
    pub fn new(facility: &'a mut F, out: &'a mut dyn Write) -> Self {
        Self { facility, out }
    }

    /// Runs every non-empty command of `chain` in order.
    ///
    /// Before a command that follows `;`, the previous handle is awaited. After
    /// the last command, the final handle is awaited unless the line ended with
    /// `&`. An `exit` stops the chain at once, after any wait it was queued behind.
    pub fn run_chain(&mut self, chain: &Chain) -> io::Result<ChainOutcome> {
        let mut state = ChainState::default();

        for command in chain.dispatchable() {
            if state.pending == Delimiter::Sequential {
                if let Some(previous) = state.previous {
                    self.wait_or_warn(previous);
                }
            }

            match dispatch(&mut *self.facility, &mut *self.out, &command.argv)? {
                Dispatched::Exit => return Ok(ChainOutcome::Exit),
                Dispatched::Started(handle) => state.previous = Some(handle),
                Dispatched::Failed => {}
            }

            state.pending = command.delimiter_after;
        }

        match state.previous {
            Some(last) if !chain.ends_in_background() => self.wait_or_warn(last),
            _ => {}
        }

        Ok(ChainOutcome::Completed)
    }

    /// Blocks until `handle` terminates, discarding every other reaped handle.
    ///
    /// Returns an error only when the facility cannot reap at all, e.g. because
    /// no children are left; in that case `handle` was already reaped elsewhere.
    pub fn wait_for(&mut self, handle: Handle) -> Result<(), WaitError> {
        loop {
            let reaped = self.facility.wait_any()?;
            if reaped == handle {
                tracing::debug!(%handle, "awaited handle terminated");
                return Ok(());
            }
            tracing::trace!(%handle, discarded = %reaped, "discarded unrelated termination");
        }
    }

    fn wait_or_warn(&mut self, handle: Handle) {
        if let Err(e) = self.wait_for(handle) {
            tracing::warn!(%handle, error = %e, "gave up waiting");
        }
    }
}
