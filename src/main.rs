use anyhow::Context;
use clap::{Parser, Subcommand};
use smash_rank::analysis::profiles;
use smash_rank::analysis::ranker::rank_players;
use smash_rank::config::Config;
use smash_rank::data::loader::load_pool;
use smash_rank::display::output::{
    display_error, display_info, display_intents, display_rankings, display_success,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "smash-rank")]
#[command(about = "Rank tournament players by intent with explainable scoring", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank a candidate pool read from a JSON file
    Rank {
        /// JSON array of player records, or an object with a `results` array
        pool: PathBuf,

        /// Ranking intent (default: SMASH_RANK_INTENT or strongest)
        #[arg(short, long)]
        intent: Option<String>,

        /// Number of players to return; 0 is treated as 1 (default: SMASH_RANK_TOP_N or 5)
        #[arg(short, long)]
        top_n: Option<usize>,

        /// Print the ranking as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },

    /// List available ranking intents and their weights
    Intents,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_filter);

    match args.command {
        Command::Intents => {
            display_intents();
            Ok(())
        }
        Command::Rank {
            pool,
            intent,
            top_n,
            json,
            pretty,
        } => {
            let profile = match intent {
                Some(name) => profiles::lookup(&name)?,
                None => config.intent.profile(),
            };
            let top_n = top_n.unwrap_or(config.top_n);

            let pool = load_pool(&pool)
                .with_context(|| format!("loading candidate pool from {}", pool.display()))?;

            if !json {
                let scope = match (&pool.state, pool.months_back) {
                    (Some(state), Some(months)) => format!(" for {} (last {} months)", state, months),
                    (Some(state), None) => format!(" for {}", state),
                    _ => String::new(),
                };
                display_info(&format!(
                    "Ranking {} players{} by '{}'",
                    pool.records.len(),
                    scope,
                    profile.intent
                ));
            }

            info!(intent = %profile.intent, top_n, "ranking candidate pool");
            let result = rank_players(&pool.records, profile, top_n);

            if json {
                let out = if pretty {
                    result.to_json_pretty()?
                } else {
                    result.to_json()?
                };
                println!("{}", out);
            } else {
                display_success(&format!("Ranked top {}", result.top_players.len()));
                display_rankings(&result);
            }

            Ok(())
        }
    }
}
