//! Request sequencing.
//!
//! Fetches are not cancelled when a newer one starts. Instead each fetch is
//! issued a [`Ticket`], and its result is applied only if no newer ticket
//! has been issued for the same slot in the meantime.

/// Monotonic identifier for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct Sequencer {
    next: u64,
    latest: Option<Ticket>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding all earlier ones.
    pub fn issue(&mut self) -> Ticket {
        self.next += 1;
        let ticket = Ticket(self.next);
        self.latest = Some(ticket);
        ticket
    }

    /// Whether `ticket` is the most recently issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }
}
