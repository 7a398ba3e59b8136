//! Highlight scheduling CLI
//!
//! Batch driver around hl_core: loads a match project and its event log,
//! runs the scheduling pipeline, and writes the schedule for the media
//! composition stage.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hl_core::{
    analysis, build_schedule, checkpoint, format_time, track_deadballs, Comment, Event, Game,
    ScheduleConfig,
};

#[derive(Parser)]
#[command(name = "hl")]
#[command(about = "Schedule narrated match highlight videos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full scheduling pipeline and write the schedule
    Schedule {
        /// Match project YAML file
        #[arg(long)]
        game: PathBuf,

        /// Event log (CSV from marking, or YAML)
        #[arg(long)]
        events: PathBuf,

        /// Narration comments YAML (with per-comment clip durations)
        #[arg(long)]
        comments: Option<PathBuf>,

        /// Tuning constants YAML; defaults used when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output schedule JSON path
        #[arg(long, default_value = "schedule.json")]
        out: PathBuf,
    },

    /// Validate an event log without scheduling anything
    Check {
        /// Match project YAML file
        #[arg(long)]
        game: PathBuf,

        /// Event log (CSV or YAML)
        #[arg(long)]
        events: PathBuf,
    },

    /// Convert an event log between CSV and YAML
    Events {
        /// Input event log
        #[arg(long = "in")]
        input: PathBuf,

        /// Output event log; format chosen by extension
        #[arg(long)]
        out: PathBuf,
    },
}

/// Comments checkpoint entry: the comment plus its synthesized duration.
#[derive(serde::Serialize, serde::Deserialize)]
struct VoicedComment {
    #[serde(flatten)]
    comment: Comment,
    /// Clip length in seconds; zero or absent when not yet synthesized.
    #[serde(default)]
    duration: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Schedule { game, events, comments, config, out } => {
            run_schedule(&game, &events, comments.as_deref(), config.as_deref(), &out)
        }
        Commands::Check { game, events } => run_check(&game, &events),
        Commands::Events { input, out } => run_convert(&input, &out),
    }
}

fn load_game(path: &Path) -> Result<Game> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading project {}", path.display()))?;
    let game: Game = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing project {}", path.display()))?;
    Ok(game)
}

fn load_events(path: &Path) -> Result<Vec<Event>> {
    let events = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => checkpoint::load_events_csv(path)?,
        Some("yaml") | Some("yml") => checkpoint::load_yaml(path)?,
        other => bail!("unsupported event log format: {:?}", other),
    };
    Ok(events)
}

fn run_schedule(
    game_path: &Path,
    events_path: &Path,
    comments_path: Option<&Path>,
    config_path: Option<&Path>,
    out: &Path,
) -> Result<()> {
    let mut game = load_game(game_path)?;
    let events = load_events(events_path)?;
    game.load_clock_bounds(&events);

    let config = match config_path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str::<ScheduleConfig>(&data)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ScheduleConfig::default(),
    };

    if game.score_updates.is_empty() {
        analysis::record_score_updates(&mut game, &events);
    }

    let (comments, durations) = match comments_path {
        Some(path) => {
            let voiced: Vec<VoicedComment> = checkpoint::load_yaml(path)?;
            voiced.into_iter().map(|v| (v.comment, v.duration)).unzip()
        }
        None => (Vec::new(), Vec::new()),
    };

    let schedule = build_schedule(&game, &events, &comments, &durations, &config)?;

    log::info!(
        "match [{} .. {}): {} segments, {} replays, {} narration clips",
        format_time(game.start),
        format_time(game.end),
        schedule.segments.len(),
        schedule.replays.len(),
        schedule.audio.len()
    );

    let data = serde_json::to_string_pretty(&schedule)?;
    std::fs::write(out, data).with_context(|| format!("writing {}", out.display()))?;
    println!("schedule written to {}", out.display());
    Ok(())
}

fn run_check(game_path: &Path, events_path: &Path) -> Result<()> {
    let mut game = load_game(game_path)?;
    let events = load_events(events_path)?;
    game.load_clock_bounds(&events);
    game.check_clock()?;

    hl_core::models::ensure_sorted(&events)?;
    for event in &events {
        if event.time < game.start || event.time > game.end {
            bail!("event {} outside match clock", event);
        }
    }
    let deadballs = track_deadballs(&events);

    println!(
        "{} events ok ({} dead-ball intervals), match clock [{} .. {})",
        events.len(),
        deadballs.len(),
        format_time(game.start),
        format_time(game.end)
    );
    Ok(())
}

fn run_convert(input: &Path, out: &Path) -> Result<()> {
    let events = load_events(input)?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("csv") => checkpoint::save_events_csv(&events, out)?,
        Some("yaml") | Some("yml") => checkpoint::save_yaml(&events, out)?,
        other => bail!("unsupported output format: {:?}", other),
    }
    println!("{} events written to {}", events.len(), out.display());
    Ok(())
}
