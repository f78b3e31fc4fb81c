use std::time::{Duration, Instant};

/// Fixed-rate frame pacing for the event loop.
///
/// The clock never sleeps itself; the loop asks how long it may block on
/// input (`until_next`) and then whether a frame is due.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next: Option<Instant>,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            interval: Duration::from_secs(1) / fps.max(1),
            next: None,
            frames: 0,
        }
    }

    /// Schedule the first frame one interval after `now`. No-op if running.
    pub fn start(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    /// Time left until the next frame, `None` when stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Consume the pending frame if it is due. A loop that fell behind skips
    /// the missed frames instead of replaying them.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.frames += 1;
                let following = next + self.interval;
                self.next = Some(if following <= now { now + self.interval } else { following });
                true
            }
            _ => false,
        }
    }

    /// Frames delivered so far.
    pub fn frame(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn paces_at_the_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(50);
        assert!(!clock.is_active());
        assert!(!clock.due(t0));
        clock.start(t0);
        assert_eq!(clock.until_next(t0), Some(20 * MS));
        assert!(!clock.due(t0 + 19 * MS));
        assert!(clock.due(t0 + 20 * MS));
        assert!(!clock.due(t0 + 21 * MS));
        assert!(clock.due(t0 + 40 * MS));
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn late_loop_skips_missed_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(50);
        clock.start(t0);
        assert!(clock.due(t0 + 200 * MS));
        assert!(!clock.due(t0 + 210 * MS));
        assert_eq!(clock.until_next(t0 + 200 * MS), Some(20 * MS));
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn cancel_stops_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(60);
        clock.start(t0);
        clock.cancel();
        assert_eq!(clock.until_next(t0), None);
        assert!(!clock.due(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn start_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(10);
        clock.start(t0);
        clock.start(t0 + 50 * MS);
        assert_eq!(clock.until_next(t0), Some(100 * MS));
    }
}
