mod display;
mod export;
mod import;
mod interactive;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use powerpick_core::context::LotteryContext;
use powerpick_core::frequency::{cold_numbers, hot_numbers};
use powerpick_core::models::NewDrawing;
use powerpick_core::session::TicketSession;

use crate::display::{
    display_load_summary, display_numbers, display_rating_guide, display_session, display_stats,
    display_ticket_detail, display_tickets,
};
use crate::export::{ExportFormat, export_session};
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "powerpick",
    about = "Frequency-weighted Powerball ticket generator and rater"
)]
struct Cli {
    /// Historical drawings file (overrides the settings file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, global = true, default_value = "powerpick.json")]
    config: PathBuf,

    /// Seed for reproducible tickets
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary of the loaded history
    Stats,

    /// Generate frequency-weighted tickets
    Generate {
        /// Number of tickets (1 to the configured maximum)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Write the session to this file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },

    /// Rate your own combination: 5 white balls then the powerball
    Rate {
        #[arg(num_args = 6, required = true)]
        numbers: Vec<u32>,
    },

    /// Most frequent numbers
    Hot {
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Least frequent numbers
    Cold {
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Add a drawing to the history file
    Add {
        /// Drawing date (MM/DD/YYYY)
        #[arg(long)]
        date: String,

        /// Five white balls, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        white_balls: Vec<u32>,

        #[arg(long)]
        powerball: u32,
    },

    /// Merge the new drawings of another history file into the data file
    Merge {
        /// History file in the same format
        file: PathBuf,
    },

    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Show the rating bands
    Ratings,

    /// Interactive mode (REPL)
    Interactive,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Init { force } = cli.command {
        return cmd_init(&cli.config, force);
    }

    let settings = Settings::load(&cli.config)?;
    let data_path = cli.data.clone().unwrap_or_else(|| settings.data_path.clone());

    if let Command::Ratings = cli.command {
        display_rating_guide();
        return Ok(());
    }

    let (mut ctx, parsed) = import::load_history(&data_path)?;
    log::debug!("{} lines rejected in {:?}", parsed.errors.len(), data_path);

    let mut rng: StdRng = match cli.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match cli.command {
        Command::Stats => {
            display_load_summary(&ctx, &parsed);
            display_stats(ctx.frequency()?);
            Ok(())
        }
        Command::Generate {
            count,
            export,
            format,
        } => cmd_generate(&ctx, &settings, count, export.as_deref(), format, &mut rng),
        Command::Rate { numbers } => cmd_rate(&ctx, &numbers),
        Command::Hot { count } => {
            cmd_numbers(&ctx, count.unwrap_or(settings.hot_cold_count), true)
        }
        Command::Cold { count } => {
            cmd_numbers(&ctx, count.unwrap_or(settings.hot_cold_count), false)
        }
        Command::Add {
            date,
            white_balls,
            powerball,
        } => {
            let entry = NewDrawing {
                date,
                white_balls,
                powerball,
            };
            add_drawing(&mut ctx, &data_path, &entry)
        }
        Command::Merge { file } => {
            let merged = import::merge_history(&mut ctx, &data_path, &file)?;
            println!(
                "{} new drawings merged from {} ({} drawings)",
                merged,
                file.display(),
                ctx.drawings().len()
            );
            Ok(())
        }
        Command::Init { .. } | Command::Ratings => Ok(()),
        Command::Interactive => interactive::run_interactive(ctx, &settings, &data_path, rng),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{:?} already exists (use --force to overwrite)", path);
    }
    Settings::default().save(path)?;
    println!("Settings written to {}", path.display());
    Ok(())
}

fn cmd_generate(
    ctx: &LotteryContext,
    settings: &Settings,
    count: Option<usize>,
    export: Option<&Path>,
    format: ExportFormat,
    rng: &mut StdRng,
) -> Result<()> {
    let count = settings.clamp_count(count);
    let tickets = ctx
        .generate_many(count, rng)
        .context("Failed to generate tickets")?;

    display_tickets(&tickets);
    if let [only] = tickets.as_slice() {
        display_ticket_detail(only);
    }

    let mut session = TicketSession::new();
    session.add_tickets(tickets);
    display_session(&session);

    if let Some(path) = export {
        export_session(&session, path, format)?;
        println!("Session written to {}", path.display());
    }
    Ok(())
}

fn cmd_rate(ctx: &LotteryContext, numbers: &[u32]) -> Result<()> {
    let [w1, w2, w3, w4, w5, powerball] = numbers else {
        bail!("Expected 5 white balls and 1 powerball");
    };
    let ticket = ctx
        .rate(&[*w1, *w2, *w3, *w4, *w5], *powerball)
        .context("Failed to rate numbers")?;
    display_ticket_detail(&ticket);
    Ok(())
}

pub(crate) fn cmd_numbers(ctx: &LotteryContext, count: usize, hot: bool) -> Result<()> {
    let data = ctx.frequency()?;
    if hot {
        display_numbers(
            "Hot numbers (most frequent first)",
            &hot_numbers(&data.white_ball_frequencies, count),
            &hot_numbers(&data.powerball_frequencies, count),
        );
    } else {
        display_numbers(
            "Cold numbers (least frequent first)",
            &cold_numbers(&data.white_ball_frequencies, count),
            &cold_numbers(&data.powerball_frequencies, count),
        );
    }
    Ok(())
}

/// Persists a drawing to the history file, then admits it into the context.
/// A failed write leaves the context untouched.
pub(crate) fn add_drawing(ctx: &mut LotteryContext, data_path: &Path, entry: &NewDrawing) -> Result<()> {
    let drawing = ctx.check_drawing(entry)?;
    import::insert_drawings(data_path, std::slice::from_ref(&drawing))?;
    ctx.add_drawing(entry)?;
    println!(
        "Drawing for {} added successfully! ({} drawings)",
        drawing.date,
        ctx.drawings().len()
    );
    Ok(())
}
