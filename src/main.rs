//! Lucky 9 - slot machine toy
//!
//! Usage:
//!   lucky-nine                       - Open the slot machine window
//!   lucky-nine simulate -m triple    - Spin headless and print results
//!   lucky-nine --config lucky9.yaml  - Use a custom timing config

mod app;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iced::{Task, Theme};

use l9_core::ReelCount;
use l9_slot::{SlotConfig, SlotMachine, TimingConfig, TimingProfile};

use app::LuckyNine;

#[derive(Parser)]
#[command(name = "lucky-nine", about = "Lucky 9 slot machine", version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Timing profile (overrides the config file's timing)
    #[arg(short, long, global = true, value_enum)]
    profile: Option<Profile>,

    /// RNG seed for reproducible spins
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the slot machine window
    Play,
    /// Spin without a window and print the results
    Simulate {
        /// single, double or triple
        #[arg(short, long, default_value = "triple")]
        mode: ReelCount,

        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 10)]
        spins: u32,

        /// Print each spin's stage trace as JSON
        #[arg(short, long)]
        trace: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Studio,
}

impl From<Profile> for TimingProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Normal => TimingProfile::Normal,
            Profile::Turbo => TimingProfile::Turbo,
            Profile::Studio => TimingProfile::Studio,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SlotConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.timing = TimingConfig::from_profile(profile.into());
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(config),
        Commands::Simulate { mode, spins, trace } => simulate::run(config, mode, spins, trace),
    }
}

fn play(config: SlotConfig) -> Result<()> {
    log::info!("Starting Lucky 9...");
    let machine = SlotMachine::new(config);

    iced::application("Lucky 9", LuckyNine::update, LuckyNine::view)
        .subscription(LuckyNine::subscription)
        .theme(|_| Theme::Dark)
        .window_size((640.0, 620.0))
        .antialiasing(true)
        .run_with(move || (LuckyNine::new(machine), Task::none()))
        .context("slot machine window failed")
}
