use std::env;
use std::error::Error;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info, warn};

use lineupsim::config::Config;
use lineupsim::pipeline::{write_outputs, Inputs, Pipeline, PROBABILITIES_FILE, RESULTS_FILE};
use lineupsim::print::{tabulate_evaluations, tabulate_payouts, tabulate_probabilities};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// player table with Name, Salary and probabilities columns
    #[clap(long, default_value = "players.csv")]
    players: PathBuf,

    /// simulation table with a player_name column followed by one column per scenario
    #[clap(long, default_value = "simulations.csv")]
    simulations: PathBuf,

    /// payout table with lineup_rank and associated_payout columns
    #[clap(long, default_value = "payouts.csv")]
    payouts: PathBuf,

    /// directory to write the probability and result tables to
    #[clap(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// number of lineups to generate; prompted for if omitted
    #[clap(short = 't', long, allow_negative_numbers = true)]
    teams: Option<i64>,

    /// JSON configuration file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// seed for lineup generation
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// rank scenarios on a single thread
    #[clap(long)]
    sequential: bool,

    /// number of top lineups to print
    #[clap(long, default_value_t = 10)]
    top: usize,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.out_dir.is_file() {
            bail!("output path {} is a file", self.out_dir.display());
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut config = match &args.config {
        Some(path) => Config::read_json_file(path)?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.sequential {
        config.parallel = false;
    }
    config.validate()?;
    debug!("config: {config:?}");

    let teams = match args.teams {
        Some(teams) => teams,
        None => prompt_teams()?,
    };
    info!("number of lineups: {teams}");
    if teams <= 0 {
        return Ok(());
    }

    let start_time = Instant::now();
    let inputs = Inputs::read(&args.players, &args.simulations, &args.payouts)?;
    info!("\n{}", Console::default().render(&tabulate_payouts(&inputs.payouts)));

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!("seed: {seed}");
    let outcome = Pipeline::new(&config).run(&inputs, usize::try_from(teams)?, &mut StdRand::seed(seed))?;

    info!(
        "\n{}",
        Console::default().render(&tabulate_probabilities(&inputs.catalog, &outcome.probabilities))
    );
    info!(
        "\n{}",
        Console::default().render(&tabulate_evaluations(&outcome.evaluations, args.top))
    );

    write_outputs(&args.out_dir, &inputs.catalog, &outcome)?;
    let elapsed = start_time.elapsed();
    info!(
        "wrote {PROBABILITIES_FILE} and {RESULTS_FILE} to {} in {}s",
        args.out_dir.display(),
        elapsed.as_millis() as f64 / 1_000.
    );
    Ok(())
}

fn prompt_teams() -> Result<i64, io::Error> {
    print!("Please enter the number of lineups to generate: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(parse_teams(&line))
}

/// Anything other than a whole number reads as zero lineups.
fn parse_teams(line: &str) -> i64 {
    let line = line.trim();
    line.parse().unwrap_or_else(|_| {
        warn!("'{line}' is not a number of lineups");
        0
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
