//! Debounced search input.
//!
//! [`Debouncer`] owns the visible input value and at most one pending commit.
//! It never touches a clock: each keystroke hands back a [`Ticket`] and the
//! platform arms a timer for [`Debouncer::quiet_period`] that later calls
//! [`Debouncer::fire`]. Only the newest ticket can commit, so a stale timer
//! that slips through is harmless. After [`Debouncer::teardown`] nothing
//! commits at all.
use std::time::Duration;

pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Identifies one scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
struct Pending {
    ticket: Ticket,
    value: String,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    visible: String,
    pending: Option<Pending>,
    issued: u64,
    torn_down: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_QUIET_PERIOD)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            visible: String::new(),
            pending: None,
            issued: 0,
            torn_down: false,
        }
    }

    /// Start from an already-committed value (e.g. the current search term).
    #[must_use]
    pub fn with_value(quiet_period: Duration, value: impl Into<String>) -> Self {
        Self {
            visible: value.into(),
            ..Self::new(quiet_period)
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// The value the input box shows right now.
    #[must_use]
    pub fn visible(&self) -> &str {
        &self.visible
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Record a keystroke and reschedule the commit.
    ///
    /// Returns the ticket the caller must pass to [`Self::fire`] once the quiet
    /// period elapses, or `None` after teardown.
    pub fn input(&mut self, value: impl Into<String>) -> Option<Ticket> {
        if self.torn_down {
            return None;
        }
        self.visible = value.into();
        Some(self.schedule(self.visible.clone()))
    }

    /// Replace any pending commit with one for `value`.
    pub fn schedule(&mut self, value: String) -> Ticket {
        self.issued = self.issued.wrapping_add(1);
        let ticket = Ticket(self.issued);
        self.pending = Some(Pending { ticket, value });
        ticket
    }

    /// Timer callback. Yields the value to commit only for the newest ticket.
    pub fn fire(&mut self, ticket: Ticket) -> Option<String> {
        if self.torn_down {
            return None;
        }
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Explicit submit: drop the pending commit and commit the visible value now.
    pub fn submit(&mut self) -> Option<String> {
        if self.torn_down {
            return None;
        }
        self.pending = None;
        Some(self.visible.clone())
    }

    /// Drop the pending commit, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Component teardown: cancel and refuse all further commits.
    pub fn teardown(&mut self) {
        self.cancel();
        self.torn_down = true;
    }

    /// Sync the visible value with a term committed elsewhere, without scheduling.
    pub fn reset_visible(&mut self, value: impl Into<String>) {
        self.pending = None;
        self.visible = value.into();
    }
}
