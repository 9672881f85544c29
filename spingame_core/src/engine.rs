use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::GameConfig,
    error::ConfigError,
    cue::{Cue, CueGate, CuePlayer},
    paytable::{classify, Payout},
    rng::SymbolSource,
    scheduler::{Scheduler, SpinId, TimerEvent, TimerHandle, TimerKind, VirtualScheduler},
    state::{GameState, Store},
    symbols::{Reels, Wager},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinRejection {
    AlreadySpinning,
    InsufficientBalance { balance: u64, wager: Wager },
}

/// What `spin()` did. A rejection never touches state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinStart {
    Started {
        spin: SpinId,
        wager: Wager,
        balance: u64,
    },
    Rejected(SpinRejection),
}

impl SpinStart {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinStart::Started { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub spin: SpinId,
    pub reels: Reels,
    pub wager: Wager,
    pub payout: Payout,
    pub win: u64,
    pub balance: u64,
}

struct ActiveSpin<H> {
    id: SpinId,
    wager: Wager,
    shuffle: H,
    resolve: H,
}

/// The slot machine: state store, spin controller and cue gate in one place.
///
/// Single-threaded by construction. Timer events scheduled by a spin come
/// back through [`SpinGame::on_timer`]; nothing else mutates the state while
/// a spin is in flight.
pub struct SpinGame<R, S: Scheduler, P> {
    config: GameConfig,
    store: Store,
    symbols: R,
    scheduler: S,
    cues: CueGate<P>,
    spins: u64,
    active: Option<ActiveSpin<S::Handle>>,
}

impl<R, S, P> SpinGame<R, S, P>
where
    R: SymbolSource,
    S: Scheduler,
    P: CuePlayer,
{
    /// Fails when the config would make the shuffle interval or spin
    /// duration unusable, e.g. a zero period that never lets the clock move.
    pub fn new(
        config: GameConfig,
        symbols: R,
        scheduler: S,
        cues: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = Store::new(GameState::from_config(&config));
        Ok(Self {
            config,
            store,
            symbols,
            scheduler,
            cues: CueGate::new(cues),
            spins: 0,
            active: None,
        })
    }

    pub fn state(&self) -> &GameState {
        self.store.snapshot()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Register a listener called with the new snapshot after every change.
    pub fn subscribe(&mut self, f: impl FnMut(&GameState) + 'static) {
        self.store.subscribe(f);
    }

    pub fn can_spin(&self) -> bool {
        self.active.is_none() && self.state().can_spin()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn cue_player(&self) -> &P {
        self.cues.player()
    }

    pub fn cue_player_mut(&mut self) -> &mut P {
        self.cues.player_mut()
    }

    pub fn select_wager(&mut self, wager: Wager) {
        if self.state().wager != wager {
            self.store.set_wager(wager);
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.state().muted != muted {
            self.store.set_muted(muted);
        }
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.state().muted;
        self.store.set_muted(muted);
    }

    pub fn spin(&mut self) -> SpinStart {
        let state = self.store.snapshot();
        if state.spinning || self.active.is_some() {
            debug!("spin rejected: already spinning");
            return SpinStart::Rejected(SpinRejection::AlreadySpinning);
        }
        let wager = state.wager;
        if state.balance < wager.amount() {
            debug!(balance = state.balance, wager = wager.amount(), "spin rejected: insufficient balance");
            return SpinStart::Rejected(SpinRejection::InsufficientBalance {
                balance: state.balance,
                wager,
            });
        }
        let balance = state.balance - wager.amount();

        self.spins += 1;
        let id = SpinId(self.spins);

        self.store.set_spinning(true);
        self.cues.trigger(Cue::Spin, self.store.snapshot().muted);
        self.store.set_balance(balance);

        let shuffle = self.scheduler.every(
            self.config.shuffle_interval(),
            TimerEvent {
                spin: id,
                kind: TimerKind::ShuffleTick,
            },
        );
        let resolve = self.scheduler.after(
            self.config.spin_duration(),
            TimerEvent {
                spin: id,
                kind: TimerKind::Resolve,
            },
        );
        self.active = Some(ActiveSpin {
            id,
            wager,
            shuffle,
            resolve,
        });

        info!(spin = id.0, wager = wager.amount(), balance, "spin started");
        SpinStart::Started {
            spin: id,
            wager,
            balance,
        }
    }

    /// Deliver a timer event. Returns the result when the event resolved a
    /// spin. Events for another spin, or ticks after the shuffle stopped, are
    /// dropped.
    pub fn on_timer(&mut self, event: TimerEvent) -> Option<SpinResult> {
        if self.active.as_ref().map(|a| a.id) != Some(event.spin) {
            debug!(spin = event.spin.0, kind = ?event.kind, "stale timer event");
            return None;
        }

        match event.kind {
            TimerKind::ShuffleTick => {
                let reels = self.symbols.draw_reels();
                self.store.set_reels(reels);
                None
            }
            TimerKind::Resolve => {
                let active = self.active.take()?;
                Some(self.resolve(active))
            }
        }
    }

    fn resolve(&mut self, active: ActiveSpin<S::Handle>) -> SpinResult {
        let ActiveSpin {
            id,
            wager,
            shuffle,
            resolve,
        } = active;
        shuffle.cancel();
        drop(resolve);

        let reels = self.symbols.draw_reels();
        self.store.set_reels(reels);

        let payout = classify(&reels);
        let win = payout.multiplier() * wager.amount();
        let balance = self.store.snapshot().balance.saturating_add(win);
        self.store.set_balance(balance);
        self.store.set_last_win(win);

        let cue = if win > 0 { Cue::Win } else { Cue::Lose };
        self.cues.trigger(cue, self.store.snapshot().muted);
        self.store.set_spinning(false);

        info!(
            spin = id.0,
            reels = %crate::symbols::reels_to_string(&reels),
            payout = ?payout,
            win,
            balance,
            "spin resolved"
        );
        SpinResult {
            spin: id,
            reels,
            wager,
            payout,
            win,
            balance,
        }
    }
}

impl<R, P> SpinGame<R, VirtualScheduler, P>
where
    R: SymbolSource,
    P: CuePlayer,
{
    /// Move the virtual clock forward, delivering every event due on the way
    /// one at a time.
    pub fn advance(&mut self, by: Duration) -> Vec<SpinResult> {
        let until = self.scheduler.now() + by;
        let mut results = Vec::new();
        while let Some(event) = self.scheduler.pop_due(until) {
            if let Some(result) = self.on_timer(event) {
                results.push(result);
            }
        }
        results
    }

    /// Run the in-flight spin to completion, if there is one.
    pub fn finish_spin(&mut self) -> Option<SpinResult> {
        while self.active.is_some() {
            let due = self.scheduler.next_due()?;
            if let Some(event) = self.scheduler.pop_due(due) {
                if let Some(result) = self.on_timer(event) {
                    return Some(result);
                }
            }
        }
        None
    }
}
