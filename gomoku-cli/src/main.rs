use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gomoku_ai::{AiPlayer, Player, Strategy};
use gomoku_cli::{
    default_roster, format_rankings, load_ai_config, rankings_json, resolve_ai_config, roster_for,
    Entrant, Game, GameOutcome, HumanPlayer, SharedStdin, Tournament,
};
use gomoku_core::{Board, Side, DEFAULT_BOARD_SIZE};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "gomoku", version, about = "Five-in-a-row against a search engine")]
struct Cli {
    /// Board size for play / hotseat / watch
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// JSON file with the AI configuration (strategy/level flags still win)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Human against the engine
    Play {
        /// Side the engine plays (X moves first)
        #[arg(long, value_enum, default_value_t = SideArg::O)]
        ai_side: SideArg,
        /// Defaults to alpha-beta
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Level 1-10, defaults to 6
        #[arg(long)]
        level: Option<u8>,
    },
    /// Two humans at one terminal
    Hotseat,
    /// Engine against engine
    Watch {
        /// Defaults to alpha-beta
        #[arg(long, value_enum)]
        x_strategy: Option<StrategyArg>,
        #[arg(long)]
        x_level: Option<u8>,
        /// Defaults to minimax
        #[arg(long, value_enum)]
        o_strategy: Option<StrategyArg>,
        #[arg(long)]
        o_level: Option<u8>,
    },
    /// Round robin between engines
    Tournament {
        /// Games per pairing, split between who moves first
        #[arg(long, default_value_t = gomoku_cli::tournament::DEFAULT_GAMES_PER_PAIR)]
        games: usize,
        #[arg(long, default_value_t = gomoku_cli::tournament::TOURNAMENT_BOARD_SIZE)]
        board_size: usize,
        /// Only this strategy, at the given depths (plus the random agent)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
        depths: Vec<u8>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print rankings as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    X,
    O,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::X => Side::X,
            SideArg::O => Side::O,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Minimax,
    AlphaBeta,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Minimax => Strategy::Minimax,
            StrategyArg::AlphaBeta => Strategy::AlphaBeta,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志（写到 stderr，棋盘走 stdout）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gomoku=info")))
        .init();

    let file_config = cli
        .config
        .as_deref()
        .map(load_ai_config)
        .transpose()?;
    let ai_config = |strategy: Option<StrategyArg>, level: Option<u8>, fallback: Strategy| {
        resolve_ai_config(file_config.as_ref(), strategy.map(Strategy::from), level, fallback)
    };

    match cli.command {
        Commands::Play {
            ai_side,
            strategy,
            level,
        } => {
            let ai_side: Side = ai_side.into();
            let ai: Box<dyn Player> = Box::new(AiPlayer::new(ai_side, ai_config(strategy, level, Strategy::AlphaBeta)));
            let human: Box<dyn Player> =
                Box::new(HumanPlayer::new(ai_side.opponent(), SharedStdin, io::stdout()));
            let (x, o) = match ai_side {
                Side::X => (ai, human),
                Side::O => (human, ai),
            };
            run_game(cli.size, x, o)
        }
        Commands::Hotseat => {
            let x = Box::new(HumanPlayer::new(Side::X, SharedStdin, io::stdout()));
            let o = Box::new(HumanPlayer::new(Side::O, SharedStdin, io::stdout()));
            run_game(cli.size, x, o)
        }
        Commands::Watch {
            x_strategy,
            x_level,
            o_strategy,
            o_level,
        } => {
            let x = Box::new(AiPlayer::new(
                Side::X,
                ai_config(x_strategy, x_level, Strategy::AlphaBeta),
            ));
            let o = Box::new(AiPlayer::new(
                Side::O,
                ai_config(o_strategy, o_level, Strategy::Minimax),
            ));
            if file_config.is_some() && x_strategy.is_none() && o_strategy.is_none() {
                warn!("Both sides use the config file strategy; pass --x-strategy/--o-strategy to differ");
            }
            run_game(cli.size, x, o)
        }
        Commands::Tournament {
            games,
            board_size,
            strategy,
            depths,
            seed,
            json,
        } => {
            if cli.config.is_some() {
                warn!("--config does not apply to tournament entrants, ignoring it");
            }
            let roster: Vec<Entrant> = match strategy {
                Some(strategy) => {
                    let mut roster = vec![Entrant::Random];
                    roster.extend(roster_for(strategy.into(), &depths));
                    roster
                }
                None => default_roster(),
            };
            let tournament = Tournament {
                board_size,
                games_per_pair: games,
                seed,
            };

            let mut progress = io::stderr();
            let standings = tournament.run(&roster, &mut progress)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rankings_json(&standings))?);
            } else {
                print!("{}", format_rankings(&standings));
            }
            Ok(())
        }
    }
}

fn run_game(size: usize, x: Box<dyn Player>, o: Box<dyn Player>) -> Result<()> {
    let board = Board::new(size).context("Invalid board size")?;
    let mut game = Game::new(board, x, o);
    let outcome = game.play(&mut io::stdout())?;

    info!(?outcome, moves = game.board().move_count(), "Game over");
    if outcome == GameOutcome::Aborted {
        println!("Game abandoned.");
    }
    Ok(())
}
