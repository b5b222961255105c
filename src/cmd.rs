pub mod budget;
pub mod calculate;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::activity::ActivityProfile;
use crate::config::{self, PROFILE_ENV};
use crate::report::CSV_FILE_NAME;

#[derive(Parser)]
#[command(name = "lifehours")]
#[command(about = "See how the hours of your life add up.")]
pub struct CommandLine {
    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute lifetime hours per activity
    Calculate {
        #[command(flatten)]
        person: PersonArgs,
        #[arg(long, value_enum, default_value_t = View::Summary)]
        view: View,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Write a CSV export
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = CSV_FILE_NAME)]
        csv: Option<PathBuf>,
        /// Write pie, bar and card SVGs (dark and light) into this directory
        #[arg(long, value_name = "DIR")]
        svg_dir: Option<PathBuf>,
    },
    /// Show which activities count at your age and how full the day is
    Budget {
        #[command(flatten)]
        person: PersonArgs,
    },
    /// List the activity categories
    Categories,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    Summary,
    Percentage,
    All,
}

#[derive(Args)]
pub struct PersonArgs {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    pub birth_date: String,
    /// Approximate birth time, HH:MM
    #[arg(long, default_value = "00:00")]
    pub birth_time: String,
    /// Evaluate at this local time instead of now, YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// JSON file of daily hours per activity
    #[arg(long, env = PROFILE_ENV)]
    pub profile: Option<PathBuf>,
    /// Override one activity, e.g. --set sleep=7.5
    #[arg(long = "set", value_name = "KEY=HOURS")]
    pub overrides: Vec<String>,
}

impl PersonArgs {
    pub fn resolve(&self) -> Result<(NaiveDateTime, NaiveDateTime, ActivityProfile)> {
        let birth = config::parse_birth(&self.birth_date, &self.birth_time)?;
        let now = match &self.at {
            Some(at) => config::parse_instant(at)?,
            None => Local::now().naive_local(),
        };
        let profile = config::load_profile(self.profile.as_deref(), &self.overrides)?;
        Ok((birth, now, profile))
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
