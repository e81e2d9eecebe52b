//! Millisecond timers and deferred one-shot events
//!
//! `Timer` measures intervals against a caller-supplied clock so the
//! simulation never reads wall time itself. `Schedule` replaces fire-and-forget
//! timer callbacks: events come due inside `advance`, which the frame loop
//! calls, so a delayed reset always lands between two frames.

/// Start/stop interval timer, all times in ms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    /// Start tick while running; the measured interval once stopped
    start: u64,
    started: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: u64) {
        self.started = true;
        self.start = now;
    }

    /// Freeze the interval between start and now until restarted
    pub fn stop(&mut self, now: u64) {
        if self.started {
            self.started = false;
            self.start = now.saturating_sub(self.start);
        }
    }

    /// Elapsed time while running, frozen interval when stopped
    pub fn time(&self, now: u64) -> u64 {
        if self.started {
            now.saturating_sub(self.start)
        } else {
            self.start
        }
    }

    /// Stop and clear
    pub fn reset(&mut self) {
        self.started = false;
        self.start = 0;
    }

    /// Elapsed time, then start again from `now` (frame deltas)
    pub fn restart(&mut self, now: u64) -> u64 {
        let elapsed = self.time(now);
        self.start(now);
        elapsed
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }
}

#[derive(Debug, Clone)]
struct Pending<E> {
    due: u64,
    seq: u64,
    event: E,
}

/// Queue of events that fire once after a delay
#[derive(Debug, Clone)]
pub struct Schedule<E> {
    pending: Vec<Pending<E>>,
    now: u64,
    next_seq: u64,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            now: 0,
            next_seq: 0,
        }
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once, `delay_ms` from now
    pub fn after(&mut self, delay_ms: u32, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now + u64::from(delay_ms),
            seq,
            event,
        });
    }

    /// Advance the schedule clock and take every event that came due, in
    /// due-time order (FIFO for equal times)
    pub fn advance(&mut self, dt_ms: u32) -> Vec<E> {
        self.now += u64::from(dt_ms);
        if self.pending.is_empty() {
            return Vec::new();
        }

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.event).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_running_and_stopped() {
        let mut t = Timer::new();
        assert_eq!(t.time(500), 0);
        assert!(!t.started());

        t.start(1000);
        assert_eq!(t.time(1250), 250);

        t.stop(1400);
        assert!(!t.started());
        // Frozen at the start→stop interval
        assert_eq!(t.time(9000), 400);

        t.reset();
        assert_eq!(t.time(9000), 0);
    }

    #[test]
    fn test_timer_restart() {
        let mut t = Timer::new();
        t.start(0);
        assert_eq!(t.restart(16), 16);
        assert_eq!(t.restart(33), 17);
        assert_eq!(t.time(40), 7);
    }

    #[test]
    fn test_schedule_fires_once_in_order() {
        let mut s = Schedule::new();
        s.after(1500, "reset");
        s.after(100, "spark");
        s.after(100, "spark2");

        assert!(s.advance(99).is_empty());
        assert_eq!(s.advance(1), vec!["spark", "spark2"]);
        assert_eq!(s.len(), 1);
        assert!(s.advance(1000).is_empty());
        assert_eq!(s.advance(400), vec!["reset"]);
        assert!(s.is_empty());
        assert!(s.advance(10_000).is_empty());
    }

    #[test]
    fn test_schedule_late_frame_delivers_all_due() {
        let mut s = Schedule::new();
        s.after(30, 2);
        s.after(10, 1);
        assert_eq!(s.advance(50), vec![1, 2]);
    }

    #[test]
    fn test_schedule_cancel() {
        let mut s = Schedule::new();
        s.after(10, ());
        s.cancel_all();
        assert!(s.advance(20).is_empty());
    }
}
