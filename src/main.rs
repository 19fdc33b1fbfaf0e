//! Headless bot match for the drill arena.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drill_arena::{init_logging, Arena, ArenaConfig, CombatantEvent, PlayerIndex};
use log::info;

/// Headless drill arena: runs a bot match and logs eliminations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 30.0)]
    seconds: f32,
    /// Number of drills, overriding the config
    #[arg(short, long)]
    players: Option<usize>,
    /// JSON arena config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Real time fed to the arena per loop iteration.
const FRAME_SECS: f32 = 1.0 / 60.0;

fn load_config(args: &Args) -> Result<ArenaConfig> {
    let mut config = args.config.as_ref().map_or_else(
        || Ok(ArenaConfig::default()),
        |path| {
            ArenaConfig::from_path(path)
                .with_context(|| format!("loading arena config from {}", path.display()))
        },
    )?;
    if let Some(players) = args.players {
        config.match_rules.players = players;
        config.validate().context("applying --players")?;
    }
    Ok(config)
}

/// Bots circle in alternating directions and keep the throttle open.
fn drive_bots(arena: &mut Arena, elapsed: f32) -> Result<()> {
    let players = arena.combatants().len();
    for slot in 0..players {
        let index = u8::try_from(slot).context("player slot out of range")?;
        let bot = arena.combatant_mut(PlayerIndex(index))?;
        let direction = if slot % 2 == 0 { 1.0 } else { -1.0 };
        bot.turn(direction * (elapsed * 0.7 + f32::from(index)).sin());
        bot.accelerate(1.0);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let mut arena = Arena::new(config).context("building arena")?;
    arena.start_round();

    let mut elapsed = 0.0_f32;
    let mut eliminations = 0_u32;
    while elapsed < args.seconds {
        drive_bots(&mut arena, elapsed)?;
        arena.advance(FRAME_SECS);
        elapsed += FRAME_SECS;

        for (player, event) in arena.drain_events() {
            if let CombatantEvent::LifeLost {
                last_toucher,
                lives_left,
                ..
            } = event
            {
                eliminations += 1;
                last_toucher.map_or_else(
                    || info!("{player} crashed out"),
                    |scorer| info!("{scorer} scored on {player}"),
                );
                if lives_left > 0 {
                    arena.combatant_mut(player)?.respawn();
                }
            }
        }
        for effect in arena.drain_pickup_effects() {
            info!("{} collected {} points", effect.player, effect.score);
        }

        let standing = arena
            .combatants()
            .iter()
            .filter(|combatant| combatant.lives_left() > 0)
            .count();
        if standing <= 1 && arena.combatants().len() > 1 {
            info!("match decided after {elapsed:.1}s");
            break;
        }
    }

    for combatant in arena.combatants() {
        info!(
            "{}: {} lives left, health {:.1}",
            combatant.player(),
            combatant.lives_left(),
            combatant.health()
        );
    }
    info!("{eliminations} lives lost in total");
    Ok(())
}
