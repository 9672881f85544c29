//! Timer capability used by the spin controller.
//!
//! The controller never runs callbacks itself. It asks a [`Scheduler`] to
//! deliver a [`TimerEvent`] later (once, or repeatedly) and the host feeds
//! delivered events back through `SpinGame::on_timer`. Hosts decide what
//! "later" means: browser timers, tokio tasks, or the [`VirtualScheduler`]
//! clock used by tests and simulations.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sequence number of an accepted spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpinId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Cosmetic redraw during the shuffle phase.
    ShuffleTick,
    /// Commit the final outcome.
    Resolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerEvent {
    pub spin: SpinId,
    pub kind: TimerKind,
}

pub trait TimerHandle {
    /// Stop the task. A cancelled task never delivers again.
    fn cancel(self);
}

pub trait Scheduler {
    type Handle: TimerHandle;

    /// Deliver `event` every `period`, first after one full period.
    fn every(&mut self, period: Duration, event: TimerEvent) -> Self::Handle;

    /// Deliver `event` once after `delay`.
    fn after(&mut self, delay: Duration, event: TimerEvent) -> Self::Handle;
}

struct Task {
    due: Duration,
    period: Option<Duration>,
    seq: u64,
    event: TimerEvent,
    alive: Rc<Cell<bool>>,
}

/// Deterministic clock that only moves when asked.
///
/// Tasks due at the same instant are delivered in the order they were
/// scheduled; a repeating task keeps its original position in that order.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_seq: u64,
    tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct VirtualHandle {
    alive: Rc<Cell<bool>>,
}

impl TimerHandle for VirtualHandle {
    fn cancel(self) {
        self.alive.set(false);
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks that can still fire.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.alive.get()).count()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .filter(|t| t.alive.get())
            .map(|t| t.due)
            .min()
    }

    /// Pop the earliest event due no later than `until`, moving the clock to
    /// its due time. Returns `None` and moves the clock to `until` when
    /// nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerEvent> {
        self.tasks.retain(|t| t.alive.get());
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now = self.now.max(until);
            return None;
        };

        let task = &mut self.tasks[idx];
        self.now = task.due;
        let event = task.event;
        match task.period {
            Some(period) => task.due += period,
            None => {
                task.alive.set(false);
                self.tasks.swap_remove(idx);
            }
        }
        Some(event)
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, event: TimerEvent) -> VirtualHandle {
        let alive = Rc::new(Cell::new(true));
        self.tasks.push(Task {
            due,
            period,
            seq: self.next_seq,
            event,
            alive: alive.clone(),
        });
        self.next_seq += 1;
        VirtualHandle { alive }
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = VirtualHandle;

    fn every(&mut self, period: Duration, event: TimerEvent) -> VirtualHandle {
        self.push(self.now + period, Some(period), event)
    }

    fn after(&mut self, delay: Duration, event: TimerEvent) -> VirtualHandle {
        self.push(self.now + delay, None, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn ev(kind: TimerKind) -> TimerEvent {
        TimerEvent {
            spin: SpinId(1),
            kind,
        }
    }

    #[test]
    fn repeating_fires_each_period() {
        let mut clock = VirtualScheduler::new();
        clock.every(ms(100), ev(TimerKind::ShuffleTick));
        let mut fired = 0;
        while clock.pop_due(ms(1000)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 10);
        assert_eq!(clock.now(), ms(1000));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut clock = VirtualScheduler::new();
        clock.every(ms(100), ev(TimerKind::ShuffleTick));
        clock.after(ms(200), ev(TimerKind::Resolve));
        let kinds: Vec<TimerKind> = std::iter::from_fn(|| clock.pop_due(ms(200)))
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::ShuffleTick,
                TimerKind::ShuffleTick,
                TimerKind::Resolve
            ]
        );
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut clock = VirtualScheduler::new();
        let h = clock.every(ms(100), ev(TimerKind::ShuffleTick));
        assert!(clock.pop_due(ms(100)).is_some());
        h.cancel();
        assert_eq!(clock.pending(), 0);
        assert!(clock.pop_due(ms(10_000)).is_none());
        assert_eq!(clock.now(), ms(10_000));
    }

    #[test]
    fn one_shot_fires_once() {
        let mut clock = VirtualScheduler::new();
        clock.after(ms(50), ev(TimerKind::Resolve));
        assert_eq!(clock.next_due(), Some(ms(50)));
        assert!(clock.pop_due(ms(40)).is_none());
        assert!(clock.pop_due(ms(60)).is_some());
        assert!(clock.pop_due(ms(1000)).is_none());
    }
}
