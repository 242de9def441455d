use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::profile::{ActivityLevel, AgeBand, Gender, ProfileUpdate};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scan nutrition labels and grade them for your profile", long_about = None)]
pub struct Cli {
    /// Directory for the saved profile and last scan (overrides NUTRISCAN_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON instead of a text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a label, analyze it and remember it as the last scan
    Scan {
        /// File holding the recognized label text
        #[arg(short, long, conflicts_with = "sample", required_unless_present = "sample")]
        text_file: Option<PathBuf>,

        /// Use the built-in demo label instead of a file
        #[arg(long)]
        sample: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Re-analyze the last scan with the current profile
    Results {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Show or change the saved profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Analyze every row of a CSV file of nutrition records
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the summary CSV (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Export the per-profile thresholds and daily targets as CSV
    Table {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    Show,
    Set {
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long, value_enum)]
    pub gender: Option<Gender>,

    #[arg(long, value_enum)]
    pub age: Option<AgeBand>,

    #[arg(long, value_enum)]
    pub activity: Option<ActivityLevel>,
}

impl ProfileArgs {
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            gender: self.gender,
            age_band: self.age,
            activity_level: self.activity,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
