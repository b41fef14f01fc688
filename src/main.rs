use clap::{Parser, Subcommand};
use easelbot::art::{self, POST_SIZE, PROFILE_SIZE};
use easelbot::artifact::{Artifact, ArtifactKind};
use easelbot::config::{self, BotConfig};
use easelbot::cycle::CycleOptions;
use easelbot::publish::{Credentials, HttpPublisher};
use easelbot::schedule::{self, ScheduleOptions, SleepTicker};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Flags for the offline rendering command.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Seed the generator for a reproducible canvas
    #[arg(long)]
    seed: Option<u64>,

    /// Render the profile-picture canvas instead of a post canvas
    #[arg(long)]
    profile: bool,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser)]
#[command(name = "easelbot")]
#[command(about = "Paints procedurally-random abstract art and posts it on a schedule")]
#[command(long_about = "\
Paints procedurally-random abstract art and posts it on a schedule

Each post is a 1080x1080 canvas: one random primary color, twenty circles,
rectangles and lines in near-primary shades, layered over white. Roughly
one post in ten also swaps the account's profile picture for a fresh
concentric-ring pattern.

Credentials come from the environment (a .env file is honored):

  EASELBOT_USERNAME   account name
  EASELBOT_PASSWORD   account password

Everything else lives in easelbot.toml in the current directory, or
wherever --config points. Run 'easelbot gen-config' to generate a
documented starting point.

Logging is controlled by RUST_LOG (default 'info').")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./easelbot.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Post a test image now, then keep posting on the configured interval
    Run,
    /// Run a single publish cycle and exit
    Post,
    /// Render a canvas to disk without uploading anything
    Render(RenderArgs),
    /// Print a stock easelbot.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run => {
            let config = load_config(&cli)?;
            let creds = Credentials::from_env();
            let publisher = HttpPublisher::new(&config.account.base_url)?;
            let work_dir = prepare_work_dir(&config)?;
            let mut ticker = SleepTicker::minutes(config.schedule.interval_minutes);

            schedule::run_forever(
                &publisher,
                &creds,
                &ScheduleOptions {
                    work_dir: &work_dir,
                    caption: &config.post.caption,
                    interval_minutes: config.schedule.interval_minutes,
                },
                &mut ticker,
                &mut rand::thread_rng(),
            )
        }
        Command::Post => {
            let config = load_config(&cli)?;
            let creds = Credentials::from_env();
            let publisher = HttpPublisher::new(&config.account.base_url)?;
            let work_dir = prepare_work_dir(&config)?;

            let report = schedule::run_slot(
                &publisher,
                &creds,
                &CycleOptions {
                    work_dir: &work_dir,
                    caption: &config.post.caption,
                    test: false,
                },
                &mut rand::thread_rng(),
            )?;
            println!("Posted {}", report.post_id);
            if report.profile_updated() {
                println!("Profile picture rotated");
            }
        }
        Command::Render(args) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let (kind, canvas) = if args.profile {
                (
                    ArtifactKind::Profile,
                    art::generate_profile(PROFILE_SIZE, PROFILE_SIZE, &mut rng),
                )
            } else {
                (
                    ArtifactKind::Post,
                    art::generate_post(POST_SIZE, POST_SIZE, &mut rng),
                )
            };
            std::fs::create_dir_all(&args.out)?;
            let path = Artifact::write(&args.out, kind, &canvas)?.keep()?;
            println!("Rendered {}", path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config from `--config` or the current directory.
fn load_config(cli: &Cli) -> Result<BotConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

/// Resolve the artifact work directory and make sure it exists.
fn prepare_work_dir(config: &BotConfig) -> std::io::Result<PathBuf> {
    let dir = PathBuf::from(&config.post.work_dir);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
