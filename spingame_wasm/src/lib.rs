mod audio;
mod console;
mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::ThreadRng;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use spingame_core::{GameConfig, GameState, RandSymbols, SpinGame, TimerEvent, Wager, CURRENCY};

pub use audio::HtmlAudioCues;
pub use console::MakeConsoleWriter;
pub use timers::{GlooHandle, GlooScheduler};

type WebGame = SpinGame<RandSymbols<ThreadRng>, GlooScheduler, HtmlAudioCues>;
type GameCell = Rc<RefCell<Option<WebGame>>>;

fn with_game(game: &GameCell, f: impl FnOnce(&mut WebGame)) {
    if let Some(g) = game.borrow_mut().as_mut() {
        f(g);
    }
}

fn spin_label(state: &GameState) -> &'static str {
    if state.spinning {
        "Spinning..."
    } else {
        "SPIN"
    }
}

fn win_banner(state: &GameState) -> Option<String> {
    (state.last_win > 0).then(|| format!("You won {} {CURRENCY}!", state.last_win))
}

#[function_component(App)]
fn app() -> Html {
    let snapshot = use_state(GameState::default);
    let game: GameCell = use_mut_ref(|| None);

    {
        let game = game.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let weak = Rc::downgrade(&game);
            let deliver = Callback::from(move |event: TimerEvent| {
                if let Some(game) = weak.upgrade() {
                    with_game(&game, |g| {
                        g.on_timer(event);
                    });
                }
            });
            match SpinGame::new(
                GameConfig::default(),
                RandSymbols::thread(),
                GlooScheduler::new(deliver),
                HtmlAudioCues::load(),
            ) {
                Ok(mut g) => {
                    let setter = snapshot.setter();
                    setter.set(g.state().clone());
                    g.subscribe(move |s| setter.set(s.clone()));
                    *game.borrow_mut() = Some(g);
                }
                Err(err) => error!(error = %err, "game not started"),
            }

            // unmount drops the game and with it any running timers
            move || {
                game.borrow_mut().take();
            }
        });
    }

    let state = (*snapshot).clone();

    let on_spin = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| {
            with_game(&game, |g| {
                g.spin();
            })
        })
    };
    let on_mute = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| with_game(&game, |g| g.toggle_mute()))
    };

    let reels = state
        .reels
        .iter()
        .map(|sym| {
            html! {
                <div class={classes!("reel", state.spinning.then_some("shuffling"))}>
                    { sym.glyph() }
                </div>
            }
        })
        .collect::<Html>();

    let wagers = Wager::ALL
        .iter()
        .map(|&w| {
            let game = game.clone();
            let onclick =
                Callback::from(move |_: MouseEvent| with_game(&game, |g| g.select_wager(w)));
            html! {
                <button
                    key={w.amount().to_string()}
                    class={classes!("wager", (w == state.wager).then_some("active"))}
                    {onclick}
                >
                    { format!("{w} {CURRENCY}") }
                </button>
            }
        })
        .collect::<Html>();

    html! {
        <div class="spin-game">
            <div class="header">
                <span class="balance">{ format!("{} {CURRENCY}", state.balance) }</span>
                <button class="mute" onclick={on_mute}>
                    { if state.muted { "🔇" } else { "🔊" } }
                </button>
            </div>
            <div class="reels">{ reels }</div>
            <div class="wagers">{ wagers }</div>
            <button class="spin" onclick={on_spin} disabled={!state.can_spin()}>
                { spin_label(&state) }
            </button>
            if let Some(banner) = win_banner(&state) {
                <div class="win-banner">{ banner }</div>
            }
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::init(tracing::Level::INFO);
    info!("spingame starting");
    yew::Renderer::<App>::new().render();
}
