use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkers_engine::ai::RandomAgent;
use checkers_engine::game::{Board, GameOutcome, MoveResult, PlayerId, Session};

/// Play random-vs-random checkers games and report how they ended.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run headless random checkers games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Board size: 6, 8 or 10
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Abandon a game after this many completed turns
    #[arg(long, default_value_t = 500)]
    max_plies: usize,
}

/// How a single game ended.
enum GameEnd {
    Finished(GameOutcome),
    /// The player to move had nothing to play and conceded
    Stuck,
    PlyLimit,
}

#[derive(Default)]
struct Tally {
    x_wins: usize,
    o_wins: usize,
    ties: usize,
    stuck: usize,
    cut_off: usize,
    total_plies: usize,
}

impl Tally {
    fn record(&mut self, end: &GameEnd, plies: usize) {
        self.total_plies += plies;
        match end {
            GameEnd::Finished(GameOutcome::Winner(PlayerId::First)) => self.x_wins += 1,
            GameEnd::Finished(GameOutcome::Winner(PlayerId::Second)) => self.o_wins += 1,
            GameEnd::Finished(GameOutcome::Tie) => self.ties += 1,
            GameEnd::Stuck => self.stuck += 1,
            GameEnd::PlyLimit => self.cut_off += 1,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !Board::is_valid_size(cli.size) {
        bail!("unsupported board size {} (expected 6, 8 or 10)", cli.size);
    }
    if cli.games == 0 {
        bail!("--games must be >= 1");
    }

    let agent = match cli.seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };
    let mut session = Session::with_agent(cli.size, "RandomX", "RandomO", false, Box::new(agent));
    let mut tally = Tally::default();

    println!("Self-play: {} games on {}x{}", cli.games, cli.size, cli.size);
    println!("-------------------------------------------");

    for game in 0..cli.games {
        if game > 0 {
            session.reset_game(cli.size);
        }
        let (end, plies) = play_game(&mut session, cli.max_plies);
        tally.record(&end, plies);
    }

    println!("X wins:   {}", tally.x_wins);
    println!("O wins:   {}", tally.o_wins);
    println!("Ties:     {}", tally.ties);
    println!("Stuck:    {}", tally.stuck);
    println!("Cut off:  {}", tally.cut_off);
    println!(
        "Avg length: {:.1} turns",
        tally.total_plies as f64 / cli.games as f64
    );
    println!("-------------------------------------------");
    for player in session.players() {
        println!("{}: {}", player.name(), player.score());
    }

    Ok(())
}

/// Play one game to the end. Returns how it ended and the number of
/// completed turns.
fn play_game(session: &mut Session, max_plies: usize) -> (GameEnd, usize) {
    let mut plies = 0;

    loop {
        let current = session.current_player_id();
        if session.legal_moves().is_empty() {
            session.handle_forfeit(current);
            return (GameEnd::Stuck, plies);
        }

        match session.submit_computer_move() {
            MoveResult::Success => {
                plies += 1;
                if let Some(outcome) = session.is_game_over() {
                    return (GameEnd::Finished(outcome), plies);
                }
                if plies >= max_plies {
                    return (GameEnd::PlyLimit, plies);
                }
            }
            MoveResult::AdditionalCaptureRequired => {}
            other => unreachable!("computer submitted a rejected move: {:?}", other),
        }
    }
}
