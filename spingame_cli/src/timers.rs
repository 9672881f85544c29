use std::time::Duration;

use spingame_core::{Scheduler, TimerEvent, TimerHandle};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

/// Timers as tokio tasks. Fired events arrive on the receiver returned by
/// [`TokioScheduler::new`]; the game loop hands them to `SpinGame::on_timer`.
pub struct TokioScheduler {
    tx: UnboundedSender<TimerEvent>,
}

pub struct TokioHandle(JoinHandle<()>);

impl TimerHandle for TokioHandle {
    fn cancel(self) {
        self.0.abort();
    }
}

impl TokioScheduler {
    pub fn new() -> (Self, UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    fn every(&mut self, period: Duration, event: TimerEvent) -> TokioHandle {
        let tx = self.tx.clone();
        TokioHandle(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        }))
    }

    fn after(&mut self, delay: Duration, event: TimerEvent) -> TokioHandle {
        let tx = self.tx.clone();
        TokioHandle(tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(event);
        }))
    }
}
