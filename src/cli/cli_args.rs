use crate::Resolver::fragment_resolver::SplitMode;
use crate::settings::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "HofCalc - crystallographic volume and density estimation from Hofmann atomic volumes.",
    after_help = "Run without a subcommand to start the interactive menu."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Settings file (JSON); defaults are used when it does not exist
    #[arg(short, long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate volume and density for formulas and/or compound names.
    Estimate(EstimateArgs),
    /// Print the Hofmann volume table, optionally corrected to a temperature.
    Table(TableArgs),
    /// Show example inputs and how they are evaluated.
    HelpExamples,
}

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Search terms, fragments separated by ';' (e.g. "zopiclone; 2H2O")
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Temperature in kelvin, overrides the settings file
    #[arg(short, long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Unit cell volume in Å3, adds the V_Cell / V_Hofmann ratio
    #[arg(short = 'u', long = "cell", value_name = "VOLUME")]
    pub unit_cell_volume: Option<f64>,

    /// How the input is split into fragments
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub split: Option<SplitArg>,

    /// Resolve formulas only, never query PubChem
    #[arg(long)]
    pub no_lookup: bool,

    /// Directory the JSON summary is written to
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Print the summary as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Temperature in kelvin
    #[arg(short, long, value_name = "KELVIN", default_value_t = 298.0)]
    pub temperature: f64,

    /// Write the table as JSON to this file (editable, reusable as `volume_table`)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitArg {
    /// ';' only
    Semicolon,
    /// ';', then ',', then whitespace between formulas
    Auto,
}

impl From<SplitArg> for SplitMode {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Semicolon => SplitMode::Semicolon,
            SplitArg::Auto => SplitMode::Auto,
        }
    }
}
