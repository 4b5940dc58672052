use crate::error::{SpawnError, WaitError};
use std::fmt;
use std::num::NonZeroU32;

/// Opaque identifier of a dispatched execution context.
///
/// Handles are never zero; "no handle yet" is expressed as `Option<Handle>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroU32);

impl Handle {
    /// Returns `None` for the reserved raw value `0`.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Handle)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facility that runs commands in independently scheduled execution contexts.
///
/// Starting a command never blocks. The only blocking operation is
/// [`wait_any`](ExecutionFacility::wait_any), which reaps whichever outstanding
/// context terminates next; the caller does not get to choose which one.
pub trait ExecutionFacility {
    /// Start `argv[0]` with the remaining elements as arguments.
    fn spawn(&mut self, argv: &[String]) -> Result<Handle, SpawnError>;

    /// Block until any outstanding context terminates and return its handle.
    fn wait_any(&mut self) -> Result<Handle, WaitError>;
}

impl<T: ExecutionFacility + ?Sized> ExecutionFacility for &mut T {
    fn spawn(&mut self, argv: &[String]) -> Result<Handle, SpawnError> {
        (**self).spawn(argv)
    }

    fn wait_any(&mut self) -> Result<Handle, WaitError> {
        (**self).wait_any()
    }
}

impl<T: ExecutionFacility + ?Sized> ExecutionFacility for Box<T> {
    fn spawn(&mut self, argv: &[String]) -> Result<Handle, SpawnError> {
        (**self).spawn(argv)
    }

    fn wait_any(&mut self) -> Result<Handle, WaitError> {
        (**self).wait_any()
    }
}
