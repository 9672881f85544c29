mod terminal;
mod timers;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spingame_core::{
    GameConfig, Payout, RandSymbols, SilentCues, SpinGame, SymbolSource, VirtualScheduler, Wager,
    CURRENCY, PAYTABLE,
};
use terminal::{parse_command, render_panel, render_shuffle, Command, TerminalCues, HELP};
use timers::TokioScheduler;

#[derive(Parser)]
#[command(name = "spingame", about = "Three-reel slot machine in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON file with game config overrides
    #[arg(long, global = true, env = "SPINGAME_CONFIG")]
    config: Option<PathBuf>,
    /// Starting balance, overrides the config file
    #[arg(long, global = true, env = "SPINGAME_BALANCE")]
    balance: Option<u64>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        /// Start with cues muted
        #[arg(long)]
        muted: bool,
        /// Seed for reproducible reels
        #[arg(long, env = "SPINGAME_SEED")]
        seed: Option<u64>,
    },
    /// Run spins instantly and report payout statistics
    Simulate {
        #[arg(long, default_value_t = 1000)]
        spins: u64,
        #[arg(long, default_value_t = Wager::Ten, value_parser = parse_wager)]
        wager: Wager,
        #[arg(long, default_value_t = 1, env = "SPINGAME_SEED")]
        seed: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the payout table
    Paytable,
}

fn parse_wager(s: &str) -> Result<Wager, String> {
    let amount: u64 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    Wager::try_from(amount).map_err(|e| e.to_string())
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut cfg = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(balance) = cli.balance {
        cfg.starting_balance = balance;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config(&cli)?;

    match cli.command {
        Commands::Play { muted, seed } => play(cfg, muted, seed).await,
        Commands::Simulate {
            spins,
            wager,
            seed,
            json,
        } => {
            let report = simulate(cfg, spins, wager, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Paytable => {
            for rule in PAYTABLE {
                println!("x{:<3} {}", rule.multiplier(), rule.describe());
            }
            Ok(())
        }
    }
}

async fn play(cfg: GameConfig, muted: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let symbols: Box<dyn SymbolSource> = match seed {
        Some(seed) => Box::new(RandSymbols::seeded(seed)),
        None => Box::new(RandSymbols::thread()),
    };
    let (scheduler, mut timer_rx) = TokioScheduler::new();
    let mut game = SpinGame::new(cfg, symbols, scheduler, TerminalCues::stderr())?;
    game.set_muted(muted);

    let dirty = Rc::new(Cell::new(false));
    {
        let dirty = dirty.clone();
        game.subscribe(move |_| dirty.set(true));
    }

    let mut stdout = std::io::stdout();
    println!("{HELP}");
    println!("{}", render_panel(game.state()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Spin) => {
                        game.spin();
                    }
                    Ok(Command::Bet(wager)) => game.select_wager(wager),
                    Ok(Command::Mute) => game.toggle_mute(),
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Err(msg) => println!("{msg}"),
                }
            }
            Some(event) = timer_rx.recv() => {
                if let Some(result) = game.on_timer(event) {
                    info!(spin = result.spin.0, win = result.win, "resolved");
                    println!();
                }
            }
        }

        if dirty.replace(false) {
            let state = game.state();
            if state.spinning {
                print!("{}", render_shuffle(state));
                stdout.flush()?;
            } else {
                println!("{}", render_panel(state));
            }
        }
    }

    println!("cashed out with {} {CURRENCY}", game.state().balance);
    Ok(())
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: u64,
    wager: Wager,
    spins_played: u64,
    starting_balance: u64,
    final_balance: u64,
    total_wagered: u64,
    total_won: u64,
    hits: BTreeMap<String, u64>,
    rtp: f64,
}

fn simulate(
    cfg: GameConfig,
    spins: u64,
    wager: Wager,
    seed: u64,
) -> anyhow::Result<SimulationReport> {
    let starting_balance = cfg.starting_balance;
    let mut game = SpinGame::new(
        cfg,
        RandSymbols::seeded(seed),
        VirtualScheduler::new(),
        SilentCues,
    )?;
    game.select_wager(wager);

    let mut hits: BTreeMap<String, u64> = BTreeMap::new();
    let mut spins_played = 0;
    let mut total_won = 0;
    for _ in 0..spins {
        if !game.spin().is_started() {
            break;
        }
        let Some(result) = game.finish_spin() else {
            break;
        };
        spins_played += 1;
        total_won += result.win;
        *hits.entry(payout_key(result.payout).to_string()).or_default() += 1;
    }

    let total_wagered = spins_played * wager.amount();
    let rtp = if total_wagered == 0 {
        0.0
    } else {
        total_won as f64 / total_wagered as f64
    };
    Ok(SimulationReport {
        seed,
        wager,
        spins_played,
        starting_balance,
        final_balance: game.state().balance,
        total_wagered,
        total_won,
        hits,
        rtp,
    })
}

fn payout_key(p: Payout) -> &'static str {
    match p {
        Payout::Triple => "triple",
        Payout::AdjacentPair => "pair",
        Payout::Miss => "miss",
    }
}

fn print_report(r: &SimulationReport) {
    println!(
        "seed {} | {} spins at {} {CURRENCY}",
        r.seed, r.spins_played, r.wager
    );
    println!(
        "balance {} -> {} {CURRENCY}",
        r.starting_balance, r.final_balance
    );
    for (kind, n) in &r.hits {
        println!("  {kind:<7} {n}");
    }
    println!(
        "wagered {} won {} rtp {:.4}",
        r.total_wagered, r.total_won, r.rtp
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_books_balance() {
        let r = simulate(GameConfig::default(), 200, Wager::Ten, 5).unwrap();
        assert_eq!(r.spins_played, 200);
        assert_eq!(r.total_wagered, 2000);
        assert_eq!(
            r.final_balance,
            r.starting_balance + r.total_won - r.total_wagered
        );
        assert_eq!(r.hits.values().sum::<u64>(), r.spins_played);
    }

    #[test]
    fn simulation_stops_when_broke() {
        let cfg = GameConfig {
            starting_balance: 499,
            ..GameConfig::default()
        };
        let r = simulate(cfg, 50, Wager::FiveHundred, 1).unwrap();
        assert_eq!(r.spins_played, 0);
        assert_eq!(r.final_balance, 499);
        assert_eq!(r.rtp, 0.0);
    }

    #[test]
    fn simulation_is_repeatable() {
        let a = simulate(GameConfig::default(), 100, Wager::Fifty, 9).unwrap();
        let b = simulate(GameConfig::default(), 100, Wager::Fifty, 9).unwrap();
        assert_eq!(a.final_balance, b.final_balance);
        assert_eq!(a.hits, b.hits);
    }

    #[test]
    fn wager_flag_parses_menu_amounts_only() {
        assert_eq!(parse_wager("100"), Ok(Wager::Hundred));
        assert!(parse_wager("99").is_err());
    }

    #[test]
    fn simulation_rejects_zero_interval() {
        let cfg = GameConfig {
            shuffle_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(simulate(cfg, 10, Wager::Ten, 1).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn balance_and_seed_read_from_env() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let env_of = |cmd: &clap::Command, id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };
        assert_eq!(env_of(&cmd, "balance").as_deref(), Some("SPINGAME_BALANCE"));
        assert_eq!(env_of(&cmd, "config").as_deref(), Some("SPINGAME_CONFIG"));
        for sub in ["play", "simulate"] {
            let sub = cmd.find_subcommand(sub).unwrap();
            assert_eq!(env_of(sub, "seed").as_deref(), Some("SPINGAME_SEED"));
        }
    }
}
