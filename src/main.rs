use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use u_picking::batch::{run_batch, solve_instance, BatchOptions, CheckerCommand};
use u_picking::config::SolverConfig;
use u_picking::generator::{GeneratorConfig, InstanceGenerator};
use u_picking::io::cli::{BatchArgs, Cli, Command, GenerateArgs, SolveArgs};
use u_picking::io;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level).context("could not initialize logger")?;

    match args.command {
        Command::Solve(args) => main_solve(args),
        Command::Batch(args) => main_batch(args),
        Command::Generate(args) => main_generate(args),
    }
}

fn load_config(config_file: Option<&Path>) -> Result<SolverConfig> {
    let config = match config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            SolverConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)
                .with_context(|| format!("could not open {}", config_file.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    info!("Successfully parsed SolverConfig: {config:?}");
    Ok(config)
}

fn main_solve(args: SolveArgs) -> Result<()> {
    let config = load_config(args.config_file.as_deref())?;
    let solved = solve_instance(&args.input_file, &args.solution_folder, &config)
        .with_context(|| format!("could not solve {}", args.input_file.display()))?;

    if let Some(summary_file) = &args.summary_file {
        io::write_json(&solved.result, summary_file)?;
    }
    Ok(())
}

fn main_batch(args: BatchArgs) -> Result<()> {
    let config = load_config(args.config_file.as_deref())?;
    let checker = args.checker_dir.map(|dir| CheckerCommand {
        dir,
        jar: args.checker_jar,
        java: args.java,
    });
    let options = BatchOptions {
        instance_dirs: args.instances,
        solution_folder: args.solution_folder,
        checker,
        config,
    };
    let report = run_batch(&options)?;
    println!("{}", report.summary());
    if !report.failures().is_empty() {
        bail!("{} instance(s) failed", report.failures().len());
    }
    Ok(())
}

fn main_generate(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        orders: args.orders,
        products: args.products,
        locations: args.locations,
        cart_limit: args.cart_limit,
        mixed: args.mixed,
        ..GeneratorConfig::default()
    };
    let instance = InstanceGenerator::new(config, args.seed).generate();
    io::write_instance(&instance, &args.output)?;
    Ok(())
}
