use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::TICK_INTERVAL_MS;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Handle for the recurring animation tick.
///
/// Once cancelled a schedule is never due again; a new run gets a new schedule.
#[derive(Debug)]
pub struct TickSchedule {
    period: Duration,
    next_due: Option<Instant>,
    token: CancellationToken,
}

impl TickSchedule {
    pub fn new(period: Duration) -> Self {
        TickSchedule {
            period,
            next_due: None,
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The first tick fires immediately.
    pub fn arm(&mut self, now: Instant) {
        if !self.is_cancelled() {
            self.next_due = Some(now);
        }
    }

    pub fn reschedule(&mut self, now: Instant) {
        if !self.is_cancelled() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn due(&self, now: Instant) -> bool {
        !self.is_cancelled() && self.next_due.map_or(false, |due| now >= due)
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        if self.is_cancelled() {
            return None;
        }
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
        self.next_due = None;
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        TickSchedule::new(Duration::from_millis(TICK_INTERVAL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_immediate() {
        let now = Instant::now();
        let mut schedule = TickSchedule::default();
        assert!(!schedule.due(now));

        schedule.arm(now);
        assert!(schedule.due(now));
        assert_eq!(schedule.time_until(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_reschedule_waits_one_period() {
        let now = Instant::now();
        let mut schedule = TickSchedule::new(Duration::from_millis(20));
        schedule.arm(now);
        schedule.reschedule(now);

        assert!(!schedule.due(now));
        assert!(schedule.due(now + Duration::from_millis(20)));
        assert_eq!(schedule.time_until(now), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_cancelled_schedule_is_never_due() {
        let now = Instant::now();
        let mut schedule = TickSchedule::default();
        schedule.arm(now);
        schedule.cancel();

        assert!(!schedule.due(now + Duration::from_secs(10)));
        assert_eq!(schedule.time_until(now), None);

        schedule.arm(now);
        schedule.reschedule(now);
        assert!(!schedule.due(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_token_clones_share_state() {
        let schedule = TickSchedule::default();
        let token = schedule.token();
        token.cancel();
        assert!(schedule.is_cancelled());
    }
}
