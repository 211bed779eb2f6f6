use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tetrad::autoplay::{play, Actuator, PlaySummary, SharedSession, SolverWorker};
use tetrad::eval::GradingMode;
use tetrad::{SearchConfig, SearchEngine, Session};

#[derive(Parser, Debug)]
#[command(name = "autoplay_cli", about = "Headless self-play with the placement search")]
struct Args {
    /// Seed for the piece bag
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many pieces
    #[arg(long, default_value_t = 500)]
    pieces: u64,

    /// Pieces per search chain, overrides the config file
    #[arg(long)]
    lookahead: Option<usize>,

    /// Grade every clear instead of holding out for four rows
    #[arg(long)]
    survival: bool,

    /// Cap moves between drops by the level's gravity
    #[arg(long)]
    frame_limited: bool,

    /// JSON search config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the search on a background worker that plays the session
    #[arg(long)]
    threaded: bool,

    /// Print the final board
    #[arg(long)]
    print_board: bool,
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(lookahead) = args.lookahead {
        config.lookahead = lookahead;
    }
    if args.survival {
        config.mode = GradingMode::Survival;
    }
    if args.frame_limited {
        config.frame_limited = true;
    }
    config.validate()?;
    Ok(config)
}

fn play_threaded(seed: u64, config: SearchConfig, pieces: u64) -> Result<(Session, PlaySummary)> {
    let session: SharedSession = Arc::new(Mutex::new(Session::new(seed)));
    let mut worker = SolverWorker::spawn(Arc::clone(&session), config, Actuator::Robot)
        .context("starting solver thread")?;

    loop {
        {
            let session = session.lock();
            if session.is_game_over() || session.spawn_counter() > pieces {
                break;
            }
        }
        if !worker.is_running() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    worker.stop();

    let session = Arc::try_unwrap(session)
        .map_err(|_| anyhow::anyhow!("session still shared after worker stopped"))?
        .into_inner();
    // the falling piece has spawned but not locked, unless the game ended
    let locked = if session.is_game_over() {
        session.spawn_counter()
    } else {
        session.spawn_counter().saturating_sub(1)
    };
    let summary = PlaySummary {
        pieces: locked,
        lines: session.lines(),
        score: session.score(),
        level: session.level(),
        game_over: session.is_game_over(),
    };
    Ok((session, summary))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "seed {} lookahead {} mode {:?} frame_limited {}",
        args.seed,
        config.lookahead,
        config.mode,
        config.frame_limited
    );

    let start = Instant::now();
    let (session, summary) = if args.threaded {
        play_threaded(args.seed, config, args.pieces)?
    } else {
        let mut session = Session::new(args.seed);
        let summary = play(&mut session, &SearchEngine::new(config), args.pieces);
        (session, summary)
    };
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);

    if args.print_board {
        println!("{}", session.board());
    }
    println!(
        "pieces: {} | lines: {} | level: {} | score: {} | game over: {} | pieces/sec: {:.1}",
        summary.pieces,
        summary.lines,
        summary.level,
        summary.score,
        summary.game_over,
        summary.pieces as f64 / elapsed
    );
    Ok(())
}
