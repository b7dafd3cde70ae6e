//! Edge detection for the host's reset counter.

/// Tracks the last value of an externally owned reset signal.
///
/// Hosts typically bump a counter whenever the die should be hidden; any
/// change of value, in either direction, counts as one reset request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSignal {
    last: u64,
}

impl ResetSignal {
    /// Start tracking from `initial`. Observing `initial` again is not a change.
    #[must_use]
    pub fn new(initial: u64) -> Self {
        Self { last: initial }
    }

    /// Record `value`; returns true if it differs from the previous one.
    pub fn observe(&mut self, value: u64) -> bool {
        let changed = value != self.last;
        self.last = value;
        changed
    }

    /// The last value observed.
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last
    }
}
