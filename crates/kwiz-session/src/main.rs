//! Chronokwiz command line player.
//!
//! Plays a quiz from a quiz directory by reading actions as JSON lines and
//! printing each outcome as a JSON line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kwiz_core::{Action, AttemptCounter, JsonFileStore};
use kwiz_session::{
    default_config_toml, summarize, totals, DirectorySource, KwizConfig, Session, SessionError,
    SessionState,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "chronokwiz")]
#[command(about = "Place historical landmarks on a timeline")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiz directory, overriding the configuration
    #[arg(long, global = true)]
    quiz_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play today's quiz, an archived one or a custom topic
    Play {
        /// Play the quiz published on this date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "topic")]
        date: Option<String>,

        /// Play a generated quiz on this topic
        #[arg(long)]
        topic: Option<String>,

        /// File of JSON actions, one per line; stdin when omitted
        #[arg(long)]
        actions: Option<PathBuf>,

        /// Random seed for the shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Retry once if recording the finished quiz as seen failed
        #[arg(long)]
        retry_seen: bool,
    },
    /// Show which quizzes were played
    History {
        /// Reference date for "future" entries; defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the default configuration
    DefaultConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => KwizConfig::from_file(path)?,
        None => KwizConfig::default(),
    };
    if let Some(quiz_dir) = args.quiz_dir {
        config.source.quiz_dir = quiz_dir;
    }

    match args.command {
        Command::Play {
            date,
            topic,
            actions,
            seed,
            retry_seen,
        } => {
            if seed.is_some() {
                config.session.seed = seed;
            }
            play(&config, date, topic, actions, retry_seen)
        }
        Command::History { today } => history(&config, today),
        Command::DefaultConfig => {
            print!("{}", default_config_toml());
            Ok(())
        }
    }
}

fn play(
    config: &KwizConfig,
    date: Option<String>,
    topic: Option<String>,
    actions: Option<PathBuf>,
    retry_seen: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = DirectorySource::new(&config.source.quiz_dir);
    let mut rng = match config.session.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut session = match (date, topic) {
        (_, Some(topic)) => {
            let store = JsonFileStore::open(&config.attempts.store_path).map_err(SessionError::Store)?;
            let mut counter = AttemptCounter::with_prefix(store, config.attempts.key_prefix.clone());
            Session::custom(source, &mut counter, &topic, config, &mut rng)?
        }
        (Some(date), None) => Session::by_date(source, &date, config, &mut rng)?,
        (None, None) => Session::daily(source, config, &mut rng)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let SessionState::AlreadyCompleted { score } = session.state() {
        writeln!(out, "{}", serde_json::json!({
            "already_completed": true,
            "score": score,
            "landmarks": session.completed_view(),
        }))?;
        return Ok(());
    }

    if let Some(game) = session.game() {
        writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;
    }
    session.on_complete(|score| tracing::info!("Final score: {}", score));

    let reader: Box<dyn BufRead> = match actions {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action: Action = match serde_json::from_str(&line) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("Skipping unreadable action {:?}: {}", line, e);
                continue;
            }
        };
        match session.dispatch(&action) {
            Ok(outcome) => writeln!(out, "{}", serde_json::to_string(&outcome)?)?,
            Err(e) => tracing::warn!("Action rejected: {}", e),
        }
        if session.is_completed() {
            break;
        }
    }

    session.settle_pending_seen(retry_seen);
    if let Some(game) = session.game() {
        writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;
    }
    Ok(())
}

fn history(config: &KwizConfig, today: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    use kwiz_session::QuizSource;

    let today = match today {
        Some(raw) => kwiz_session::normalize_date(&raw).ok_or(SessionError::InvalidDate(raw))?,
        None => chrono::Local::now().date_naive(),
    };

    let source = DirectorySource::new(&config.source.quiz_dir);
    let entries = summarize(&source.fetch_dates()?, today);
    let totals = totals(&entries);

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "entries": entries,
        "totals": totals,
    }))?);
    Ok(())
}
