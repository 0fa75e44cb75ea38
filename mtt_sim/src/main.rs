//! Multi-table tournament simulator.
//!
//! Registers synthetic players into a sit-and-go hosted on the tournament
//! actor, then deals all-in confrontations at every table until one player
//! holds every chip.

mod config;
mod hand;
mod observer;

use std::path::PathBuf;

use anyhow::Error;
use chrono::{Duration, Utc};
use ctrlc::set_handler;
use log::{info, warn};
use mtt_engine::{
    table::{MemoryTableFactory, PlayerId},
    tournament::{TournamentConfig, TournamentError, TournamentManager, TurnOutcome},
};
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};

use config::SimConfig;
use observer::LoggingObserver;

const HELP: &str = "\
Simulate a multi-table poker tournament

USAGE:
  mtt_sim [OPTIONS]

OPTIONS:
  --players    N           Number of entrants          [default: env MTT_PLAYERS or 27]
  --seats      N           Seats per table             [default: env MTT_SEATS or 9]
  --seed       N           Seed for seats and hands    [default: env MTT_SEED or random]
  --config     FILE        Tournament configuration (JSON)  [default: env MTT_CONFIG]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  MTT_BUY_IN               Entry fee                   [default: 100]
  MTT_BUST_PROBABILITY     Chance a player busts in a hand  [default: 0.15]
  MTT_MAX_HANDS            Hands dealt before giving up [default: 100000]
  RUST_LOG                 Log level (e.g., info, mtt_engine=debug)
";

struct Args {
    players: Option<usize>,
    seats: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

/// Tournament to simulate, either from the configuration file or a plain sit-and-go
fn tournament_config(sim: &SimConfig) -> Result<TournamentConfig, Error> {
    let mut config = match &sim.config_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            TournamentConfig::from_json(&json)?
        }
        None => TournamentConfig {
            buy_in: sim.buy_in,
            ..TournamentConfig::sit_and_go("Simulation", sim.players, sim.seats)
        },
    };

    if !config.sit_and_go {
        warn!("Tournament '{}' is scheduled, running it as a sit-and-go", config.name);
        config.sit_and_go = true;
    }
    let now = Utc::now() - Duration::seconds(1);
    config.register_time = config.register_time.min(now);
    config.start_time = config.start_time.min(now);
    config.players_quota = sim.players;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        players: pargs.opt_value_from_str("--players")?,
        seats: pargs.opt_value_from_str("--seats")?,
        seed: pargs.opt_value_from_str("--seed")?,
        config: pargs.opt_value_from_str("--config")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let sim = SimConfig::from_env(args.players, args.seats, args.seed, args.config)?;
    let config = tournament_config(&sim)?;
    info!(
        "Simulating '{}': {} players, {}-seat tables, seed {}",
        config.name, sim.players, config.seats_per_table, sim.seed
    );

    let manager = TournamentManager::new();
    let handle = manager
        .spawn(
            config,
            Box::new(MemoryTableFactory::seeded(sim.seed)),
            Box::new(LoggingObserver),
        )
        .await?;

    for player in 1..=sim.players as PlayerId {
        handle.register(player).await?;
    }

    let mut rng = StdRng::seed_from_u64(sim.seed);
    let mut hands = 0;
    let mut finished = false;
    'play: while hands < sim.max_hands {
        let table_ids = handle.table_ids().await?;
        if table_ids.is_empty() {
            break;
        }

        for table_id in table_ids {
            let hand_seed: u64 = rng.random();
            let bust_probability = sim.bust_probability;
            let played = handle
                .with_table(table_id, move |table| {
                    let mut rng = StdRng::seed_from_u64(hand_seed);
                    hand::play_hand(table, &mut rng, bust_probability).map(|_| ())
                })
                .await;

            match played {
                Ok(()) => {}
                // Broken earlier in this round.
                Err(TournamentError::TableNotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            }

            hands += 1;
            if handle.end_turn(table_id).await? == TurnOutcome::Finished {
                finished = true;
                break 'play;
            }
            if hands >= sim.max_hands {
                break 'play;
            }
        }
    }

    let info = handle.info().await?;
    if finished {
        info!("Tournament complete after {} hands", hands);
        let prizes = handle.prizes().await?.unwrap_or_default();
        for (place, (player, prize)) in info.eliminated.iter().zip(&prizes).enumerate() {
            info!("#{} player {} wins {}", place + 1, player, prize);
        }
    } else {
        warn!(
            "Gave up after {} hands with {} players left",
            hands, info.seated_count
        );
    }

    println!("{}", serde_json::to_string_pretty(&info)?);
    manager.close_all().await;
    Ok(())
}
