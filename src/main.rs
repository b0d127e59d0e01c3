//! Heavy Tubes entry point
//!
//! On the web the game is driven from JavaScript through `heavy_tubes::web`.
//! Natively this plays one headless round with a simple auto-blocking player.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use heavy_tubes::sim::{GameStatus, GameStore};
    use heavy_tubes::{ManualTimer, Session, Tuning};

    env_logger::init();

    // heavy-tubes [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().context("seed must be an unsigned integer")?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default(),
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_path(&path).with_context(|| format!("loading tuning from {path}"))?,
        None => Tuning::default(),
    };

    log::info!("Heavy Tubes (native) starting with seed {}", seed);
    let mut session = Session::new(GameStore::with_tuning(seed, tuning)?, ManualTimer::default());
    session.start_game();

    while session.status() == GameStatus::Started {
        auto_block(&mut session)?;
        if session.status() != GameStatus::Started {
            break;
        }
        session.on_timer_fired();
        for line in session.snapshot().hud_lines() {
            log::debug!("{}", line);
        }
    }

    let snapshot = session.snapshot();
    if let Some(headline) = snapshot.headline() {
        println!("{headline}");
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Block tubes, first to last, while the worst-case next tick could overshoot
#[cfg(not(target_arch = "wasm32"))]
fn auto_block(
    session: &mut heavy_tubes::Session<heavy_tubes::ManualTimer>,
) -> Result<(), heavy_tubes::GameError> {
    use heavy_tubes::sim::GameStatus;

    while session.status() == GameStatus::Started {
        let store = session.store();
        let state = store.state();
        let headroom = state.target_weight().saturating_sub(state.player_weight());
        let growing: Vec<_> = state.tubes().iter().filter(|t| !t.blocked).map(|t| t.id).collect();
        let worst_case = growing.len() as u32 * store.tuning().increment.max;

        match growing.first() {
            Some(&id) if worst_case > headroom => {
                println!("Blocking tube {} with {} g of headroom left", id, headroom);
                session.click_tube(id)?;
            }
            _ => break,
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is heavy_tubes::web::wasm_start, this is just to satisfy the compiler
}
