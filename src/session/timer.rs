use std::time::{Duration, Instant};

/// Periodic refresh signal for the live timer label.
///
/// Armed while a session is running; once cancelled it never fires again
/// until re-armed, so a finished session cannot keep updating the display.
#[derive(Clone, Debug)]
pub struct RefreshTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true when a period has elapsed, then schedules the next one.
    /// Missed periods collapse into a single fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}
