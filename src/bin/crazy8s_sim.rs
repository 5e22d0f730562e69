//! Crazy 8s simulator - headless bot-versus-bot games.
//!
//! Both seats are driven by move policies through the same entry points an
//! interactive host uses, which makes this a quick end-to-end check of the
//! engine as well as a way to compare policies.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use crazy_eights::{
    is_game_over, new_game, play_turn, BotPolicy, EmptyDeckPolicy, GameConfig, GameRng,
    GreedyBot, PlayerId, PlayerMap, RandomBot, StarterEightPolicy,
};

#[derive(Parser)]
#[command(name = "crazy8s-sim")]
#[command(about = "Headless Crazy 8s simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N. Random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Policy for the seat that opens (the "human" seat)
    #[arg(long, default_value = "greedy")]
    human: PolicyKind,

    /// Policy for the bot seat
    #[arg(long, default_value = "greedy")]
    bot: PolicyKind,

    /// Cards dealt to each seat
    #[arg(long)]
    deal_size: Option<usize>,

    /// Maximum hand size
    #[arg(long)]
    hand_capacity: Option<usize>,

    /// What a draw from an empty draw pile does
    #[arg(long)]
    empty_deck: Option<EmptyDeckArg>,

    /// What happens when an 8 is turned up as the starter
    #[arg(long)]
    starter_eight: Option<StarterEightArg>,

    /// JSON file with a game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up on a game after this many turns
    #[arg(long, default_value = "500")]
    max_turns: u32,

    /// Sleep for the configured bot delay before every bot move
    #[arg(long)]
    pace: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log each game's outcome
    #[arg(long)]
    show_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    Greedy,
    Random,
}

impl PolicyKind {
    fn policy(self) -> Box<dyn BotPolicy> {
        match self {
            PolicyKind::Greedy => Box::new(GreedyBot),
            PolicyKind::Random => Box::new(RandomBot),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmptyDeckArg {
    Reshuffle,
    Fail,
}

impl From<EmptyDeckArg> for EmptyDeckPolicy {
    fn from(arg: EmptyDeckArg) -> Self {
        match arg {
            EmptyDeckArg::Reshuffle => EmptyDeckPolicy::Reshuffle,
            EmptyDeckArg::Fail => EmptyDeckPolicy::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StarterEightArg {
    Keep,
    Redraw,
}

impl From<StarterEightArg> for StarterEightPolicy {
    fn from(arg: StarterEightArg) -> Self {
        match arg {
            StarterEightArg::Keep => StarterEightPolicy::Keep,
            StarterEightArg::Redraw => StarterEightPolicy::Redraw,
        }
    }
}

/// How one game ended.
#[derive(Debug, Clone, Copy)]
struct GameOutcome {
    winner: Option<PlayerId>,
    turns: u32,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: u32,
    human_policy: &'static str,
    bot_policy: &'static str,
    human_wins: u32,
    bot_wins: u32,
    stalled: u32,
    errors: u32,
    average_turns: f64,
    elapsed_ms: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = build_config(&args)?;
    info!(?config, games = args.games, "starting simulator");

    let policies = PlayerMap::new(|player| {
        if player == PlayerId::HUMAN {
            args.human.policy()
        } else {
            args.bot.policy()
        }
    });

    let start = Instant::now();
    let mut summary = Summary {
        games: args.games,
        human_policy: policies[PlayerId::HUMAN].name(),
        bot_policy: policies[PlayerId::BOT].name(),
        ..Summary::default()
    };
    let mut total_turns = 0u64;
    let mut finished = 0u32;

    for game_num in 0..args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        match run_game(config.with_seed(seed), &policies, &args) {
            Ok(outcome) => {
                total_turns += u64::from(outcome.turns);
                finished += 1;
                match outcome.winner {
                    Some(PlayerId::HUMAN) => summary.human_wins += 1,
                    Some(_) => summary.bot_wins += 1,
                    None => {
                        summary.stalled += 1;
                        warn!(game = game_num, seed, turns = outcome.turns, "game stalled");
                    }
                }
                info!(game = game_num, seed, winner = ?outcome.winner, turns = outcome.turns, "game finished");
            }
            Err(e) => {
                summary.errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, seed, e);
            }
        }
    }

    summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if finished > 0 {
        summary.average_turns = total_turns as f64 / f64::from(finished);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Config file first, then flags on top.
fn build_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(deal_size) = args.deal_size {
        config = config.with_deal_size(deal_size);
    }
    if let Some(capacity) = args.hand_capacity {
        config = config.with_hand_capacity(capacity);
    }
    if let Some(policy) = args.empty_deck {
        config = config.with_empty_deck(policy.into());
    }
    if let Some(policy) = args.starter_eight {
        config = config.with_starter_eight(policy.into());
    }
    config.validate()?;
    Ok(config)
}

fn run_game(
    config: GameConfig,
    policies: &PlayerMap<Box<dyn BotPolicy>>,
    args: &Args,
) -> Result<GameOutcome, Box<dyn std::error::Error>> {
    let mut state = new_game(["Player", "Bot"], config)?;
    let mut rngs = PlayerMap::new(|player| {
        let stream = 0xA076_1D64_78BD_642F_u64.wrapping_mul(player.index() as u64 + 1);
        GameRng::new(state.seed() ^ stream)
    });

    while state.turn_number() <= args.max_turns {
        let Some(player) = state.active_player() else {
            break;
        };
        if args.pace && player == PlayerId::BOT {
            std::thread::sleep(config.bot_delay());
        }
        let (next, _) = play_turn(policies[player].as_ref(), &state, &mut rngs[player])?;
        state = next;
    }

    Ok(GameOutcome {
        winner: is_game_over(&state),
        turns: state.turn_number(),
    })
}

fn print_summary(summary: &Summary) {
    println!("\n=== Simulation Summary ===");
    println!(
        "Policies: {} (opens) vs {}",
        summary.human_policy, summary.bot_policy
    );
    println!("Games: {}", summary.games);
    if summary.errors > 0 {
        println!("Errors: {}", summary.errors);
    }
    println!("Total time: {:.1} ms", summary.elapsed_ms);

    let completed = summary.human_wins + summary.bot_wins;
    if completed == 0 {
        return;
    }
    let rate = |wins: u32| f64::from(wins) / f64::from(completed) * 100.0;

    println!("\n=== Results by Seat ===");
    println!(
        "Seat 0 ({}): wins={} ({:.1}%)",
        summary.human_policy,
        summary.human_wins,
        rate(summary.human_wins)
    );
    println!(
        "Seat 1 ({}): wins={} ({:.1}%)",
        summary.bot_policy,
        summary.bot_wins,
        rate(summary.bot_wins)
    );
    println!("Stalled: {}", summary.stalled);
    println!("Average turns: {:.1}", summary.average_turns);
}
