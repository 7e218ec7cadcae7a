//! Periodic timers on a virtual millisecond clock
//!
//! The caller advances the clock by however much time passed (real or
//! simulated); fires come out one at a time in due order. When both timers
//! fall due at the same instant gravity fires before the frame, so the frame
//! samples the post-gravity state.

use arrayvec::ArrayVec;

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Gravity,
    Frame,
}

#[derive(Debug, Clone)]
struct Periodic {
    period_ms: u32,
    until_next_ms: u32,
}

impl Periodic {
    fn new(period_ms: u32) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            until_next_ms: period_ms,
        }
    }

    /// Let `ms` pass (never more than `until_next_ms`); true if it fired.
    fn elapse(&mut self, ms: u32) -> bool {
        self.until_next_ms -= ms;
        if self.until_next_ms == 0 {
            self.until_next_ms = self.period_ms;
            return true;
        }
        false
    }
}

/// Gravity and frame timers.
#[derive(Debug, Clone)]
pub struct Clock {
    gravity: Periodic,
    frame: Periodic,
    pending: ArrayVec<Tick, 2>,
    cancelled: bool,
    now_ms: u64,
}

impl Clock {
    pub fn new(gravity_ms: u32, frame_ms: u32) -> Self {
        Self {
            gravity: Periodic::new(gravity_ms),
            frame: Periodic::new(frame_ms),
            pending: ArrayVec::new(),
            cancelled: false,
            now_ms: 0,
        }
    }

    /// Milliseconds of virtual time elapsed so far.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop both timers for good. Returns false if already cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        self.cancelled = true;
        self.pending.clear();
        true
    }

    /// Next fire within `budget_ms`, consuming the time up to it.
    ///
    /// Returns `None` once the budget is spent (the remainder is carried
    /// towards the next fire) or the clock is cancelled.
    pub fn next_fire(&mut self, budget_ms: &mut u32) -> Option<Tick> {
        if self.cancelled {
            return None;
        }
        if !self.pending.is_empty() {
            return Some(self.pending.remove(0));
        }

        let step = self.gravity.until_next_ms.min(self.frame.until_next_ms);
        if step > *budget_ms {
            self.gravity.until_next_ms -= *budget_ms;
            self.frame.until_next_ms -= *budget_ms;
            self.now_ms += u64::from(*budget_ms);
            *budget_ms = 0;
            return None;
        }

        *budget_ms -= step;
        self.now_ms += u64::from(step);
        if self.gravity.elapse(step) {
            self.pending.push(Tick::Gravity);
        }
        if self.frame.elapse(step) {
            self.pending.push(Tick::Frame);
        }
        Some(self.pending.remove(0))
    }

    /// Milliseconds until the next fire (for sleeping until it).
    pub fn until_next_ms(&self) -> u32 {
        self.gravity.until_next_ms.min(self.frame.until_next_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut Clock, mut budget: u32) -> Vec<Tick> {
        let mut ticks = Vec::new();
        while let Some(t) = clock.next_fire(&mut budget) {
            ticks.push(t);
        }
        ticks
    }

    #[test]
    fn fires_in_due_order() {
        let mut clock = Clock::new(10, 4);
        let ticks = drain(&mut clock, 12);
        assert_eq!(
            ticks,
            vec![Tick::Frame, Tick::Frame, Tick::Gravity, Tick::Frame]
        );
        assert_eq!(clock.now_ms(), 12);
    }

    #[test]
    fn gravity_wins_ties() {
        let mut clock = Clock::new(4, 4);
        assert_eq!(drain(&mut clock, 4), vec![Tick::Gravity, Tick::Frame]);
    }

    #[test]
    fn partial_budget_carries_over() {
        let mut clock = Clock::new(500, 17);
        assert!(drain(&mut clock, 10).is_empty());
        assert_eq!(clock.until_next_ms(), 7);
        assert_eq!(drain(&mut clock, 7), vec![Tick::Frame]);
    }

    #[test]
    fn cancel_is_permanent_and_once() {
        let mut clock = Clock::new(5, 5);
        assert!(clock.cancel());
        assert!(!clock.cancel());
        assert!(drain(&mut clock, 1000).is_empty());
    }
}
