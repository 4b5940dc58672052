//! Scripted execution facility used by the unit tests.

use crate::command::{ExecutionFacility, Handle};
use crate::error::{SpawnError, WaitError};
use std::collections::{HashSet, VecDeque};

/// Something the fake facility observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Spawn(String, Handle),
    Reap(Handle),
}

/// In-memory facility: handles are allocated from 1 upwards, children never
/// really run, and they terminate in a scripted order.
///
/// Without a script, the oldest outstanding child terminates first.
#[derive(Default)]
pub(crate) struct FakeFacility {
    next: u32,
    running: Vec<Handle>,
    finish_order: VecDeque<u32>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    pub events: Vec<Event>,
}

impl FakeFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program names that fail to start.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// Program names whose start panics inside the facility.
    pub fn panicking(mut self, program: &str) -> Self {
        self.panicking.insert(program.to_string());
        self
    }

    /// Raw handles in the order they should be reaped.
    pub fn finishing(mut self, order: &[u32]) -> Self {
        self.finish_order.extend(order.iter().copied());
        self
    }

    pub fn h(raw: u32) -> Handle {
        Handle::new(raw).unwrap()
    }

    pub fn spawned(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Spawn(name, _) => Some(name.as_str()),
                Event::Reap(_) => None,
            })
            .collect()
    }

    pub fn reaped(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Reap(h) => Some(h.get()),
                Event::Spawn(..) => None,
            })
            .collect()
    }

    pub fn position(&self, event: &Event) -> usize {
        self.events
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("event {:?} not recorded in {:?}", event, self.events))
    }

    pub fn outstanding(&self) -> &[Handle] {
        &self.running
    }
}

impl ExecutionFacility for FakeFacility {
    fn spawn(&mut self, argv: &[String]) -> Result<Handle, SpawnError> {
        let name = argv.first().ok_or(SpawnError::EmptyCommand)?;
        if self.panicking.contains(name) {
            panic!("facility fault starting {}", name);
        }
        if self.failing.contains(name) {
            return Err(SpawnError::NotFound);
        }
        self.next += 1;
        let handle = Self::h(self.next);
        self.running.push(handle);
        self.events.push(Event::Spawn(name.clone(), handle));
        Ok(handle)
    }

    fn wait_any(&mut self) -> Result<Handle, WaitError> {
        if self.running.is_empty() {
            return Err(WaitError::NoChildren);
        }
        // first scripted handle that is actually outstanding, else the oldest child
        let scripted = self
            .finish_order
            .iter()
            .position(|raw| self.running.iter().any(|h| h.get() == *raw));
        let idx = match scripted.and_then(|i| self.finish_order.remove(i)) {
            Some(raw) => self.running.iter().position(|h| h.get() == raw).unwrap(),
            None => 0,
        };
        let handle = self.running.remove(idx);
        self.events.push(Event::Reap(handle));
        Ok(handle)
    }
}
