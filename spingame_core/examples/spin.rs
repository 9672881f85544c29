use spingame_core::{
    reels_to_string, GameConfig, RandSymbols, SilentCues, SpinGame, VirtualScheduler, Wager,
    CURRENCY,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example end-to-end spin on the virtual clock
    let mut game = SpinGame::new(
        GameConfig::default(),
        RandSymbols::seeded(1),
        VirtualScheduler::new(),
        SilentCues,
    )?;
    game.select_wager(Wager::Fifty);
    let start = game.spin();
    let outcome = game.finish_spin();
    match outcome {
        Some(r) => println!(
            "start={:?} reels={} payout={:?} win={} {CURRENCY} balance={} {CURRENCY}",
            start,
            reels_to_string(&r.reels),
            r.payout,
            r.win,
            r.balance
        ),
        None => println!("spin did not start: {:?}", start),
    }
    Ok(())
}
