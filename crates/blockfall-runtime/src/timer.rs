use std::{cell::Cell, rc::Rc, time::Duration};

use blockfall_engine::TickScheduler;

#[derive(Debug, Default)]
struct TimerState {
    interval: Cell<Option<Duration>>,
    generation: Cell<u64>,
}

/// Handle through which a session reschedules the runtime's tick timer.
///
/// Clones share one timer. Every [`reschedule`](TickScheduler::reschedule)
/// restarts the interval from the moment the event loop next looks at it,
/// even when the interval value is unchanged.
#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    state: Rc<TimerState>,
}

impl TickTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently scheduled interval; `None` when stopped.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.state.interval.get()
    }

    /// Counter bumped on every reschedule.
    pub(crate) fn generation(&self) -> u64 {
        self.state.generation.get()
    }
}

impl TickScheduler for TickTimer {
    fn reschedule(&mut self, interval: Option<Duration>) {
        self.state.interval.set(interval);
        self.state
            .generation
            .set(self.state.generation.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let timer = TickTimer::new();
        let mut handle = timer.clone();
        assert_eq!(timer.interval(), None);

        handle.reschedule(Some(Duration::from_millis(100)));
        assert_eq!(timer.interval(), Some(Duration::from_millis(100)));
        assert_eq!(timer.generation(), 1);

        handle.reschedule(Some(Duration::from_millis(100)));
        assert_eq!(timer.generation(), 2);

        handle.reschedule(None);
        assert_eq!(timer.interval(), None);
    }
}
