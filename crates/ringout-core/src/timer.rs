/// Progress reported by [`RoundTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// No countdown is running.
    Idle,
    /// Still counting; nothing new to display.
    Running,
    /// The displayed whole-second value changed.
    Second(u32),
    /// The countdown reached zero this tick.
    Finished,
}

/// Pre-round countdown. Players stay locked while it runs.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    duration: f32,
    remaining: Option<f32>,
    shown: u32,
}

impl RoundTimer {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration: duration_secs.max(0.0),
            remaining: None,
            shown: 0,
        }
    }

    /// Start (or restart) the countdown from its full duration.
    pub fn start_countdown(&mut self) {
        self.remaining = Some(self.duration);
        self.shown = self.duration.ceil() as u32;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Whole seconds left, rounded up, as a countdown display shows them.
    pub fn seconds_left(&self) -> Option<u32> {
        self.remaining.map(|r| r.ceil() as u32)
    }

    pub fn tick(&mut self, dt: f32) -> CountdownStatus {
        let Some(remaining) = self.remaining else {
            return CountdownStatus::Idle;
        };
        let remaining = remaining - dt.max(0.0);
        if remaining <= 0.0 {
            self.remaining = None;
            self.shown = 0;
            return CountdownStatus::Finished;
        }
        self.remaining = Some(remaining);
        let whole = remaining.ceil() as u32;
        if whole != self.shown {
            self.shown = whole;
            CountdownStatus::Second(whole)
        } else {
            CountdownStatus::Running
        }
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }
}

/// Elapsed time of the active part of a round.
#[derive(Debug, Clone, Default)]
pub struct GameTimer {
    elapsed: f32,
    running: bool,
}

impl GameTimer {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

struct Pending<T> {
    remaining: f32,
    action: T,
}

/// Delayed actions advanced by the game loop.
///
/// Firing hands the action back to the owner, which must re-check whether
/// it still applies; a scheduled action carries no guarantee about the
/// state it will land in.
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_secs: f32, action: T) {
        self.pending.push(Pending {
            remaining: delay_secs.max(0.0),
            action,
        });
    }

    /// Advance all timers and return the actions that came due, in the order
    /// they were scheduled.
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        let dt = dt.max(0.0);
        for p in &mut self.pending {
            p.remaining -= dt;
        }
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.remaining <= 0.0);
        self.pending = waiting;
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_reports_seconds_then_finishes() {
        let mut t = RoundTimer::new(3.0);
        assert_eq!(t.tick(0.5), CountdownStatus::Idle);

        t.start_countdown();
        assert_eq!(t.seconds_left(), Some(3));
        assert_eq!(t.tick(0.5), CountdownStatus::Running);
        assert_eq!(t.tick(0.75), CountdownStatus::Second(2));
        assert_eq!(t.tick(1.0), CountdownStatus::Second(1));
        assert_eq!(t.tick(1.0), CountdownStatus::Finished);
        assert!(!t.is_running());
        assert_eq!(t.tick(1.0), CountdownStatus::Idle);
    }

    #[test]
    fn zero_length_countdown_finishes_on_first_tick() {
        let mut t = RoundTimer::new(0.0);
        t.start_countdown();
        assert_eq!(t.tick(0.0), CountdownStatus::Finished);
    }

    #[test]
    fn restart_resets_remaining() {
        let mut t = RoundTimer::new(2.0);
        t.start_countdown();
        t.tick(1.5);
        t.start_countdown();
        assert_eq!(t.seconds_left(), Some(2));
        t.cancel();
        assert_eq!(t.seconds_left(), None);
    }

    #[test]
    fn game_timer_only_counts_while_running() {
        let mut g = GameTimer::default();
        g.tick(1.0);
        assert_eq!(g.elapsed(), 0.0);
        g.start();
        g.tick(1.0);
        g.tick(0.5);
        assert!((g.elapsed() - 1.5).abs() < f32::EPSILON);
        g.stop();
        g.tick(1.0);
        assert!((g.elapsed() - 1.5).abs() < f32::EPSILON);
        g.reset();
        assert_eq!(g.elapsed(), 0.0);
        assert!(!g.is_running());
    }

    #[test]
    fn scheduler_fires_once_after_delay() {
        let mut s = Scheduler::new();
        s.schedule(2.0, "next");
        assert!(s.tick(1.0).is_empty());
        assert_eq!(s.tick(1.0), vec!["next"]);
        assert!(s.is_empty());
        assert!(s.tick(5.0).is_empty(), "Fired actions never repeat");
    }

    #[test]
    fn scheduler_keeps_order_and_clears() {
        let mut s = Scheduler::new();
        s.schedule(1.0, 1);
        s.schedule(0.5, 2);
        s.schedule(3.0, 3);
        assert_eq!(s.tick(1.0), vec![1, 2]);
        assert_eq!(s.len(), 1);
        s.clear();
        assert!(s.tick(10.0).is_empty());
    }
}
