use clap::{Args, Parser, Subcommand, ValueEnum};
use mdsolver::core::integrator::Integrator;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mdsolver - run Lennard-Jones molecular dynamics simulations from a TOML configuration.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by the pairwise force loop.
    /// Only effective when built with the `parallel` feature.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation and write the configured trajectory and thermo output.
    Run(RunArgs),
    /// Validate a configuration and report the system it describes without running it.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the simulation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the simulation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Override the total simulated time.
    #[arg(short = 'T', long, value_name = "FLOAT")]
    pub total_time: Option<f64>,

    /// Override the integration timestep.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub timestep: Option<f64>,

    /// Override the integration scheme.
    #[arg(long, value_enum, value_name = "SCHEME")]
    pub integrator: Option<IntegratorArg>,

    /// Override the Lennard-Jones cutoff radius.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S integration.timestep=0.001
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorArg {
    EulerCromer,
    VelocityVerlet,
}

impl From<IntegratorArg> for Integrator {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::EulerCromer => Integrator::EulerCromer,
            IntegratorArg::VelocityVerlet => Integrator::VelocityVerlet,
        }
    }
}
