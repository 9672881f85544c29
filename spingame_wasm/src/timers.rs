use std::time::Duration;

use gloo::timers::callback::{Interval, Timeout};
use spingame_core::{Scheduler, TimerEvent, TimerHandle};
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

/// Browser timers. Fired events are emitted on `deliver` from a fresh task,
/// never from inside the timer callback, so the receiver may cancel or drop
/// the very timer that fired.
pub struct GlooScheduler {
    deliver: Callback<TimerEvent>,
}

pub enum GlooHandle {
    Interval(Interval),
    Timeout(Timeout),
}

impl TimerHandle for GlooHandle {
    fn cancel(self) {
        match self {
            GlooHandle::Interval(interval) => drop(interval.cancel()),
            GlooHandle::Timeout(timeout) => drop(timeout.cancel()),
        }
    }
}

impl GlooScheduler {
    pub fn new(deliver: Callback<TimerEvent>) -> Self {
        Self { deliver }
    }

    fn emitter(&self, event: TimerEvent) -> impl Fn() + 'static {
        let deliver = self.deliver.clone();
        move || {
            let deliver = deliver.clone();
            spawn_local(async move { deliver.emit(event) });
        }
    }
}

impl Scheduler for GlooScheduler {
    type Handle = GlooHandle;

    fn every(&mut self, period: Duration, event: TimerEvent) -> GlooHandle {
        GlooHandle::Interval(Interval::new(timer_millis(period), self.emitter(event)))
    }

    fn after(&mut self, delay: Duration, event: TimerEvent) -> GlooHandle {
        GlooHandle::Timeout(Timeout::new(timer_millis(delay), self.emitter(event)))
    }
}

pub(crate) fn timer_millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturate() {
        assert_eq!(timer_millis(Duration::from_millis(100)), 100);
        assert_eq!(timer_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
