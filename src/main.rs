//! kmap CLI - Boolean expressions to truth tables, K-maps and Verilog
//!
//! Commands:
//!   table    - Truth table, simplified form, minterms
//!   kmap     - Karnaugh map (1 to 4 variables)
//!   verilog  - Verilog module and testbench
//!   schema   - JSON schema of kmap.yaml
//!   check    - Show configuration and simulator availability

mod cli;

use clap::{Parser, Subcommand, ValueEnum};
use cli::Context;
use kmap_solver::config::Config;
use kmap_solver::simplify::SimplifyMode;
use kmap_solver::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "kmap", author, version, about)]
struct Cli {
    /// Config file (default: kmap.yaml or .kmap.yaml in the current directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override simplify.mode from the config
    #[arg(long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// More logging (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the truth table, simplified expression and minterms
    Table {
        expression: String,
        /// Print the JSON envelope instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the Karnaugh map and simplified expression
    Kmap {
        expression: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate a Verilog module with a self-stimulating testbench
    Verilog {
        expression: String,
        #[arg(long)]
        json: bool,
        /// Run the simulator (falls back to a truth-table waveform)
        #[arg(long)]
        simulate: bool,
        /// Write the Verilog to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the JSON schema for kmap.yaml
    Schema,
    /// Show the active configuration and whether the simulator is installed
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Canonical,
    Compat,
    Minimal,
}

impl From<ModeArg> for SimplifyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Canonical => SimplifyMode::Canonical,
            ModeArg::Compat => SimplifyMode::Compat,
            ModeArg::Minimal => SimplifyMode::Minimal,
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let ctx = load_context(args.config, args.mode)?;

    match args.command {
        Command::Table { expression, json } => cli::cmd_table(&ctx, &expression, json),
        Command::Kmap { expression, json } => cli::cmd_kmap(&ctx, &expression, json),
        Command::Verilog {
            expression,
            json,
            simulate,
            output,
        } => cli::cmd_verilog(&ctx, &expression, json, simulate, output.as_deref()),
        Command::Schema => cli::cmd_schema(),
        Command::Check => cli::cmd_check(&ctx),
    }
}

fn load_context(path: Option<PathBuf>, mode: Option<ModeArg>) -> Result<Context> {
    let (mut config, config_path) = match path {
        Some(path) => (Config::load(&path)?, Some(path)),
        None => {
            let cwd = std::env::current_dir().map_err(Error::Io)?;
            (Config::discover(&cwd)?, Config::find(&cwd))
        }
    };
    if let Some(mode) = mode {
        config.simplify.mode = mode.into();
    }
    log::debug!("simplify mode: {:?}", config.simplify.mode);
    Ok(Context {
        config,
        config_path,
    })
}
