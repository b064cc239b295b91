//! NRR CLI
//!
//! Works out how a team has to win its next match to finish in a given
//! position on net run rate.

use clap::{ArgGroup, Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use nrr_core::report::{render, render_current};
use nrr_core::{
    solve_every_rank, solve_with, PointsTable, QueryRequest, Strategy, DEFAULT_MATCH_OVERS,
};

const SAMPLE_TABLE: &str = include_str!("../data/ipl_2022.csv");

#[derive(Parser)]
#[command(name = "nrr")]
#[command(about = "Net run rate qualification ranges for a cricket points table", long_about = None)]
struct Cli {
    /// Points table CSV (defaults to the bundled IPL 2022 sample)
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current standings
    Standings,
    /// Find the results that leave a team in a given position
    #[command(group(ArgGroup::new("side").required(true).args(["bat", "bowl"])))]
    Solve {
        /// Team whose result is being solved for
        team: String,
        /// Team they beat
        opponent: String,
        /// Position to finish in (1-based)
        #[arg(short, long)]
        position: usize,
        /// The team bats first and posts --runs
        #[arg(long)]
        bat: bool,
        /// The team bowls first and concedes --runs
        #[arg(long)]
        bowl: bool,
        /// Runs scored by whichever side bats first
        #[arg(short, long, allow_negative_numbers = true)]
        runs: i64,
        /// Overs per innings
        #[arg(long, default_value_t = DEFAULT_MATCH_OVERS)]
        overs: f64,
        /// live or threshold
        #[arg(long, default_value = "live")]
        strategy: String,
        /// Solve every position instead of just --position
        #[arg(long)]
        every_rank: bool,
    },
}

fn load_table(path: Option<&PathBuf>) -> Result<PointsTable, nrr_core::TableError> {
    match path {
        Some(path) => PointsTable::read_from_file(path),
        None => PointsTable::from_csv_str(SAMPLE_TABLE),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(cli.table.as_ref())?;
    info!("points table has {} teams", table.len());

    match cli.command {
        Commands::Standings => {
            print!("{}", render_current(&table));
        }
        Commands::Solve {
            team,
            opponent,
            position,
            bat,
            bowl: _,
            runs,
            overs,
            strategy,
            every_rank,
        } => {
            let strategy: Strategy = strategy.parse()?;
            let request = QueryRequest {
                team,
                opponent,
                match_overs: overs,
                desired_rank: position,
                scenario: if bat { "bat" } else { "bowl" }.to_string(),
                runs,
            };
            let query = request.validate(&table)?;

            if every_rank {
                for (rank, solution) in solve_every_rank(&table, &query, strategy) {
                    let q = nrr_core::Query {
                        desired_rank: rank,
                        ..query
                    };
                    println!("{}", render(&table, &q, solution.as_ref()));
                }
            } else {
                let solution = solve_with(&table, &query, strategy);
                println!("{}", render(&table, &query, solution.as_ref()));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
