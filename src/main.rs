use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkers_engine::config::GameConfig;
use checkers_engine::game::{parse_move_input, GameOutcome, MoveResult, Session};

/// Play checkers in the terminal against a friend or the computer.
#[derive(Parser)]
#[command(name = "checkers", about = "Play checkers in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "checkers.toml")]
    config: PathBuf,

    /// Board size: 6, 8 or 10
    #[arg(long)]
    size: Option<usize>,

    /// Name of the first player (X, moves first)
    #[arg(long)]
    player1: Option<String>,

    /// Name of the second player (O)
    #[arg(long)]
    player2: Option<String>,

    /// Let a second human play O instead of the computer
    #[arg(long)]
    two_player: bool,

    /// Seed for the computer's move choice
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(name) = cli.player1 {
        config.player1_name = name;
    }
    if let Some(name) = cli.player2 {
        config.player2_name = name;
    }
    if cli.two_player {
        config.vs_computer = false;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut session = Session::from_config(&config).context("invalid game settings")?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(outcome) = play_round(&mut session, &config, &mut lines)? else {
            break;
        };

        println!("{}", session.board());
        match outcome {
            GameOutcome::Winner(id) => println!("{} Won!", session.player(id).name()),
            GameOutcome::Tie => println!("Tie!"),
        }
        for player in session.players() {
            println!("  {}: {}", player.name(), player.score());
        }

        if !ask_another_round(&mut lines)? {
            break;
        }
        session.reset_game(config.board_size);
    }

    Ok(())
}

/// Play until the game ends. `None` means input was closed mid-game.
fn play_round<I>(session: &mut Session, config: &GameConfig, lines: &mut I) -> Result<Option<GameOutcome>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let current = session.current_player_id();

        if session.legal_moves().is_empty() {
            println!("{} has no moves left.", session.player(current).name());
            let winner = session.handle_forfeit(current);
            return Ok(Some(GameOutcome::Winner(winner)));
        }

        let result = if session.is_computer_controlled(current) {
            if config.computer_delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(config.computer_delay_ms));
            }
            session.submit_computer_move()
        } else {
            println!("{}", session.board());
            if let Some(summary) = session.last_move_summary() {
                println!("{}", summary);
            }

            let player = session.player(current);
            print!("{}'s turn ({}): ", player.name(), player.side().man().symbol());
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                return Ok(None);
            };

            if line.trim() == "Q" {
                let winner = session.handle_forfeit(current);
                return Ok(Some(GameOutcome::Winner(winner)));
            }

            match parse_move_input(&line) {
                Some((from, to)) => session.submit_move(&from, &to),
                None => MoveResult::InvalidFormat,
            }
        };

        if let Some(message) = describe(result) {
            println!("{}", message);
        }

        if result == MoveResult::Success {
            if let Some(outcome) = session.is_game_over() {
                return Ok(Some(outcome));
            }
        }
    }
}

fn describe(result: MoveResult) -> Option<&'static str> {
    match result {
        MoveResult::InvalidFormat => Some("Invalid cell format!"),
        MoveResult::InvalidMove => Some("Invalid move!"),
        MoveResult::MustCapture => Some("You must capture!"),
        MoveResult::MustCaptureAgain => Some("You have to continue your previous capture!"),
        MoveResult::AdditionalCaptureRequired | MoveResult::Success => None,
    }
}

fn ask_another_round<I>(lines: &mut I) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("Another round? (y/n): ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(false);
        };
        match line.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => continue,
        }
    }
}
