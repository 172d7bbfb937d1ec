use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use kalah::ai::{Agent, MoveSearch, RandomAgent};
use kalah::config::{AppConfig, Controller};
use kalah::game::{BoardState, GameOutcome, Player};
use kalah::session::{play_game, MatchStats};

/// Play Kalah in the terminal.
#[derive(Parser)]
#[command(name = "kalah", about = "Play Kalah against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "kalah.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Controller for the upper side: human, minimax or random
    #[arg(long)]
    upper: Option<String>,

    /// Controller for the lower side: human, minimax or random
    #[arg(long)]
    lower: Option<String>,

    /// Override pits per player
    #[arg(long)]
    pits: Option<usize>,

    /// Override seeds per pit
    #[arg(long)]
    seeds: Option<u32>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Play this many computer-only games and print a summary
    #[arg(long)]
    games: Option<u32>,

    /// Print search scores to stderr
    #[arg(long)]
    trace: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.max_depth = depth;
    }
    if let Some(pits) = cli.pits {
        config.game.pits_per_player = pits;
    }
    if let Some(seeds) = cli.seeds {
        config.game.seeds_per_pit = seeds;
    }
    if let Some(upper) = &cli.upper {
        config.players.upper = upper.parse()?;
    }
    if let Some(lower) = &cli.lower {
        config.players.lower = lower.parse()?;
    }
    if cli.trace {
        config.search.trace = true;
    }
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    match cli.games {
        Some(games) => run_match(&config, games, cli.seed),
        None => run_interactive(&config, cli.seed),
    }
}

fn build_agent(
    config: &AppConfig,
    player: Player,
    seed: Option<u64>,
) -> Result<Option<Box<dyn Agent>>> {
    let agent: Box<dyn Agent> = match config.players.controller(player) {
        Controller::Human => return Ok(None),
        Controller::Minimax => Box::new(MoveSearch::from_config(&config.search, player)?),
        Controller::Random => match seed {
            // Different streams per side so two random players do not mirror each other.
            Some(seed) => Box::new(RandomAgent::with_seed(seed ^ player as u64)),
            None => Box::new(RandomAgent::new()),
        },
    };
    Ok(Some(agent))
}

fn run_match(config: &AppConfig, games: u32, seed: Option<u64>) -> Result<()> {
    let (Some(mut upper), Some(mut lower)) = (
        build_agent(config, Player::Upper, seed)?,
        build_agent(config, Player::Lower, seed)?,
    ) else {
        bail!("--games needs computer controllers on both sides");
    };

    let mut stats = MatchStats::default();
    for game in 0..games {
        let state = config.game.new_board()?;
        let record = play_game(state, upper.as_mut(), lower.as_mut())
            .with_context(|| format!("game {}", game + 1))?;
        println!(
            "game {:>3}: {:>3} moves, Upper {:>2} - Lower {:>2}",
            game + 1,
            record.moves.len(),
            record.final_state.score(Player::Upper),
            record.final_state.score(Player::Lower),
        );
        stats.record(record.outcome);
    }

    println!("-------------------------------------------");
    println!(
        "Upper ({}) wins: {}, Lower ({}) wins: {}, draws: {}",
        upper.name(),
        stats.upper_wins,
        lower.name(),
        stats.lower_wins,
        stats.draws
    );
    Ok(())
}

fn run_interactive(config: &AppConfig, seed: Option<u64>) -> Result<()> {
    let mut upper = build_agent(config, Player::Upper, seed)?;
    let mut lower = build_agent(config, Player::Lower, seed)?;
    let mut state = config.game.new_board()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_over() {
        println!("{state}\n");
        let player = state.current_player();
        let agent = match player {
            Player::Upper => upper.as_mut(),
            Player::Lower => lower.as_mut(),
        };

        let pit = match agent {
            Some(agent) => {
                let pit = agent.select_action(&state)?;
                println!("{} ({}) plays pit {}", player, agent.name(), side_number(&state, pit));
                pit
            }
            None => {
                print!("{} player pick a pit (1-{}): ", player, state.pits_per_player());
                io::stdout().flush()?;
                let line = match lines.next() {
                    Some(line) => line?,
                    None => bail!("input closed before the game ended"),
                };
                match parse_pit(&state, line.trim()) {
                    Some(pit) => pit,
                    None => {
                        println!("Enter a number between 1 and {}", state.pits_per_player());
                        continue;
                    }
                }
            }
        };

        if let Err(err) = state.play_pit(pit) {
            println!("Illegal move: {err}");
            continue;
        }
        if state.last_move_extra_turn() && !state.is_over() {
            println!("{player} gets another turn");
        }
    }

    println!("{state}\n");
    let result = match state.outcome() {
        Some(GameOutcome::Winner(player)) => format!("{player} wins"),
        _ => "Draw".to_string(),
    };
    println!(
        "{result}: Upper {} - Lower {}",
        state.score(Player::Upper),
        state.score(Player::Lower)
    );
    Ok(())
}

/// Side-relative pit number (1-based) to board index
fn parse_pit(state: &BoardState, input: &str) -> Option<usize> {
    let n: usize = input.parse().ok()?;
    if n == 0 || n > state.pits_per_player() {
        return None;
    }
    let first = state.board().side_range(state.current_player()).start;
    Some(first + n - 1)
}

fn side_number(state: &BoardState, pit: usize) -> usize {
    match state.owner(pit) {
        Some(player) => pit - state.board().side_range(player).start + 1,
        None => pit,
    }
}
