//! Stunt Cat entry point
//!
//! Runs a headless round on the autopilot at a fixed frame rate and prints
//! the final snapshot as JSON.
//!
//! Usage: `stunt-cat [config.json] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use stunt_cat::consts::TICK_MS;
    use stunt_cat::sim::{GameEvent, GameRound, autopilot};
    use stunt_cat::{LogSink, RoundConfig};

    /// One minute of play
    const DEFAULT_TICKS: u32 = 3600;

    env_logger::init();
    log::info!("Stunt Cat (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => RoundConfig::load(path)?,
        None => RoundConfig::default(),
    };
    let ticks = args
        .next()
        .map(|arg| arg.parse::<u32>())
        .transpose()?
        .unwrap_or(DEFAULT_TICKS);

    let mut round = GameRound::new(config)?;
    let mut sink = LogSink;
    let mut deaths = 0u32;
    let mut best = 0u32;

    for _ in 0..ticks {
        let input = autopilot::steer(&round);
        let report = round.step(&input, TICK_MS, &mut sink);
        for event in &report.events {
            match event {
                GameEvent::FishCaught { score } => best = best.max(*score),
                GameEvent::Died(_) => deaths += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Ran {} ticks: {} deaths, best score {}, final score {}",
        ticks,
        deaths,
        best,
        round.score
    );
    println!("{}", serde_json::to_string_pretty(&round.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front-end; the library is the wasm surface
}
