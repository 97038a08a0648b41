use std::time::{Duration, Instant};

/// Quiet period before typed search text is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(619);

/// Handle for one armed wait. Only the most recent ticket can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    generation: u64,
    armed_at: Instant,
    delay: Duration,
}

impl DebounceTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Instant {
        self.armed_at + self.delay
    }
}

/// Trailing-edge debounce: every `arm` cancels whatever was pending.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn arm(&mut self, now: Instant) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(now);
        DebounceTicket {
            generation: self.generation,
            armed_at: now,
            delay: self.delay,
        }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, ticket: &DebounceTicket) -> bool {
        self.pending.is_some() && ticket.generation == self.generation
    }

    /// True once the ticket is still the latest and its quiet period has passed.
    pub fn is_due(&self, ticket: &DebounceTicket, now: Instant) -> bool {
        self.is_current(ticket) && now >= ticket.deadline()
    }

    /// Consumes the pending wait if `ticket` may fire now.
    pub fn fire(&mut self, ticket: &DebounceTicket, now: Instant) -> bool {
        if !self.is_due(ticket, now) {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
