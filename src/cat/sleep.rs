use std::time::Duration;

use instant::Instant;

/// Seconds of no interaction before the cat falls asleep.
const SLEEP_AFTER: Duration = Duration::from_secs(5);
/// Extra delay after falling asleep before the Zzz decoration returns.
const ZZZ_DELAY: Duration = Duration::from_secs(1);

/// Whether the cat is awake or dozing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Awake,
    Sleeping,
}

/// Two-stage idle timer: Awake -> Sleeping after 5s of no interaction,
/// then the Zzz decoration 1s later.
///
/// Deadlines are plain values replaced on each interaction, so there is no
/// timer handle to cancel and teardown needs no cleanup.
#[derive(Debug, Clone, Copy)]
pub struct SleepTimer {
    activity: Activity,
    zzz_visible: bool,
    sleep_deadline: Option<Instant>,
    zzz_deadline: Option<Instant>,
}

impl SleepTimer {
    /// The cat starts asleep with the decoration showing.
    pub fn new() -> Self {
        Self {
            activity: Activity::Sleeping,
            zzz_visible: true,
            sleep_deadline: None,
            zzz_deadline: None,
        }
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_sleeping(&self) -> bool {
        self.activity == Activity::Sleeping
    }

    /// The decoration only ever shows while asleep.
    pub fn zzz_visible(&self) -> bool {
        self.is_sleeping() && self.zzz_visible
    }

    /// An interaction happened: wake up, hide the decoration synchronously,
    /// and restart the countdown from now. Any pending transition is
    /// superseded by the new deadline.
    pub fn interact(&mut self, now: Instant) {
        self.activity = Activity::Awake;
        self.zzz_visible = false;
        self.sleep_deadline = Some(now + SLEEP_AFTER);
        self.zzz_deadline = None;
    }

    /// Advance the timer. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.sleep_deadline {
            if now >= deadline {
                self.activity = Activity::Sleeping;
                self.sleep_deadline = None;
                // Zzz delay counts from the moment sleep began, not from
                // whenever this poll happened to run.
                self.zzz_deadline = Some(deadline + ZZZ_DELAY);
            }
        }

        if let Some(deadline) = self.zzz_deadline {
            if self.is_sleeping() && now >= deadline {
                self.zzz_visible = true;
                self.zzz_deadline = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn starts_asleep_with_decoration() {
        let timer = SleepTimer::new();
        assert!(timer.is_sleeping());
        assert!(timer.zzz_visible());
    }

    #[test]
    fn interaction_wakes_and_hides_decoration_synchronously() {
        let t0 = Instant::now();
        let mut timer = SleepTimer::new();

        timer.interact(t0);
        assert_eq!(timer.activity(), Activity::Awake);
        assert!(!timer.zzz_visible());
    }

    #[test]
    fn falls_asleep_after_five_seconds_then_zzz_after_one_more() {
        let t0 = Instant::now();
        let mut timer = SleepTimer::new();
        timer.interact(t0);

        timer.poll(t0 + secs(4.99));
        assert_eq!(timer.activity(), Activity::Awake);

        timer.poll(t0 + secs(5.0));
        assert!(timer.is_sleeping());
        assert!(!timer.zzz_visible());

        timer.poll(t0 + secs(5.99));
        assert!(!timer.zzz_visible());

        timer.poll(t0 + secs(6.0));
        assert!(timer.zzz_visible());
    }

    #[test]
    fn interaction_at_4_9s_cancels_pending_sleep() {
        let t0 = Instant::now();
        let mut timer = SleepTimer::new();
        timer.interact(t0);

        // Re-interact just before the deadline; the countdown restarts.
        timer.interact(t0 + secs(4.9));

        timer.poll(t0 + secs(5.0));
        assert_eq!(timer.activity(), Activity::Awake);
        timer.poll(t0 + secs(9.8));
        assert_eq!(timer.activity(), Activity::Awake);

        // The restarted deadline still fires.
        timer.poll(t0 + secs(9.9));
        assert!(timer.is_sleeping());
    }

    #[test]
    fn zzz_delay_counts_from_sleep_onset_even_with_sparse_polls() {
        let t0 = Instant::now();
        let mut timer = SleepTimer::new();
        timer.interact(t0);

        // First poll after both deadlines have long passed: the sleep
        // transition and the decoration both apply in one poll.
        timer.poll(t0 + secs(10.0));
        assert!(timer.is_sleeping());
        assert!(timer.zzz_visible());
    }

    #[test]
    fn waking_while_decoration_pending_discards_it() {
        let t0 = Instant::now();
        let mut timer = SleepTimer::new();
        timer.interact(t0);

        timer.poll(t0 + secs(5.5)); // asleep, Zzz still pending
        assert!(timer.is_sleeping());

        timer.interact(t0 + secs(5.6));
        timer.poll(t0 + secs(6.5)); // old Zzz deadline would have fired here
        assert_eq!(timer.activity(), Activity::Awake);
        assert!(!timer.zzz_visible());
    }
}
