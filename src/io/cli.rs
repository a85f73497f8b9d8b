use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve one instance and write its solution file.
    Solve(SolveArgs),
    /// Solve every instance of one or more folders and validate the solutions.
    Batch(BatchArgs),
    /// Write a random instance.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FOLDER", default_value = "solutions")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Also write the run result as JSON.
    #[arg(long, value_name = "FILE")]
    pub summary_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    #[arg(
        long,
        value_name = "FOLDER",
        num_args = 1..,
        default_values = ["instances", "instances_exemple"]
    )]
    pub instances: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER", default_value = "solutions")]
    pub solution_folder: PathBuf,
    /// Folder holding the validator jar; solutions are not validated without it.
    #[arg(long, value_name = "FOLDER")]
    pub checker_dir: Option<PathBuf>,
    #[arg(long, value_name = "NAME", default_value = "CheckerBatchingPicking.jar")]
    pub checker_jar: String,
    #[arg(long, value_name = "CMD", default_value = "java")]
    pub java: String,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    #[arg(long, default_value_t = 10)]
    pub orders: usize,
    #[arg(long, default_value_t = 20)]
    pub products: usize,
    #[arg(long, default_value_t = 30)]
    pub locations: usize,
    #[arg(long, default_value_t = 6)]
    pub cart_limit: usize,
    /// Allow orders to share a cart.
    #[arg(long)]
    pub mixed: bool,
}
