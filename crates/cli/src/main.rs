use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Dataset, ParsePolicy};
use pipeline::{
    DemographicRatings, JoinPolicy, Kpi, KpiConfig, KpiRunner, MostRatedMovies, TopRatedMovies,
};
use report::{Table, demographics_table, most_rated_table, report_tables, top_rated_table};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

mod loader;

use loader::{DataFiles, load_dataset};

/// MovieLens KPI reports
#[derive(Parser)]
#[command(name = "movielens-kpi")]
#[command(about = "Rating reports over the MovieLens users/movies/ratings files", long_about = None)]
struct Cli {
    /// Path to MovieLens dataset directory
    #[arg(short, long, default_value = "data/ml-1m")]
    data_dir: PathBuf,

    #[arg(long, default_value = "users.dat")]
    users_file: String,

    #[arg(long, default_value = "movies.dat")]
    movies_file: String,

    #[arg(long, default_value = "ratings.dat")]
    ratings_file: String,

    /// What to do with malformed input lines
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    on_error: OnError,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnError {
    Abort,
    Skip,
}

impl From<OnError> for ParsePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => ParsePolicy::Abort,
            OnError::Skip => ParsePolicy::Skip,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all three reports
    All {
        #[command(flatten)]
        options: AllOptions,
    },

    /// Movies with the most ratings
    MostRated {
        /// Number of movies to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Movies with the highest average rating
    TopRated {
        /// Number of movies to show
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Movies need strictly more ratings than this
        #[arg(long, default_value = "40")]
        min_votes: u64,
    },

    /// Average rating by age group, occupation and genre
    Demographics {
        #[command(flatten)]
        display: DemographicsOptions,
    },
}

#[derive(Args)]
struct AllOptions {
    #[arg(long, default_value = "10")]
    most_rated_limit: usize,

    #[arg(long, default_value = "20")]
    top_rated_limit: usize,

    #[arg(long, default_value = "40")]
    min_votes: u64,

    #[command(flatten)]
    demographics: DemographicsOptions,
}

#[derive(Args)]
struct DemographicsOptions {
    /// Show a random sample of this many rows
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for --sample
    #[arg(long, requires = "sample")]
    seed: Option<u64>,

    /// Drop ratings whose user or movie is unknown
    #[arg(long)]
    inner_join: bool,
}

impl DemographicsOptions {
    fn join_policy(&self) -> JoinPolicy {
        if self.inner_join {
            JoinPolicy::Inner
        } else {
            JoinPolicy::Outer
        }
    }

    fn apply(&self, table: Table) -> Table {
        match self.sample {
            Some(n) => table.sample(n, self.seed),
            None => table,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries reports
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let files = DataFiles::in_dir(&cli.data_dir, &cli.users_file, &cli.movies_file, &cli.ratings_file);
    info!("Loading MovieLens dataset from {}", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Arc::new(load_dataset(&files, cli.on_error.into()).await?);
    let summary = dataset.summary();
    eprintln!(
        "{} Loaded {} users, {} movies, {} ratings in {:?}",
        "✓".green(),
        summary.users,
        summary.movies,
        summary.ratings,
        start.elapsed()
    );
    if summary.skipped() > 0 {
        eprintln!("{} Skipped {} malformed lines", "!".yellow(), summary.skipped());
    }

    // Dispatch to appropriate command handler
    let tables = match cli.command {
        Commands::All { options } => handle_all(dataset, options).await?,
        Commands::MostRated { limit } => {
            let config = KpiConfig::default().with_most_rated_limit(limit);
            let rows = compute(dataset, config, MostRatedMovies).await?;
            vec![most_rated_table(&rows)]
        }
        Commands::TopRated { limit, min_votes } => {
            let config = KpiConfig::default()
                .with_top_rated_limit(limit)
                .with_min_votes(min_votes);
            let rows = compute(dataset, config, TopRatedMovies).await?;
            vec![top_rated_table(&rows)]
        }
        Commands::Demographics { display } => {
            let config = KpiConfig::default().with_join_policy(display.join_policy());
            let rows = compute(dataset, config, DemographicRatings).await?;
            vec![display.apply(demographics_table(&rows))]
        }
    };

    print_tables(&tables, cli.format)
}

/// Run one report on a blocking thread
async fn compute<K>(dataset: Arc<Dataset>, config: KpiConfig, kpi: K) -> Result<Vec<K::Row>>
where
    K: Kpi + 'static,
    K::Row: 'static,
{
    let name = kpi.name();
    let rows = tokio::task::spawn_blocking(move || KpiRunner::new(config).run_kpi(&kpi, &dataset))
        .await
        .context("Report task panicked")?
        .with_context(|| format!("Failed to compute {name}"))?;
    Ok(rows)
}

/// Handle the 'all' command
async fn handle_all(dataset: Arc<Dataset>, options: AllOptions) -> Result<Vec<Table>> {
    let config = KpiConfig::default()
        .with_most_rated_limit(options.most_rated_limit)
        .with_top_rated_limit(options.top_rated_limit)
        .with_min_votes(options.min_votes)
        .with_join_policy(options.demographics.join_policy());

    let reports = tokio::task::spawn_blocking(move || KpiRunner::new(config).run(&dataset))
        .await
        .context("Report task panicked")?
        .context("Failed to compute reports")?;

    let mut tables = report_tables(&reports);
    if let Some(last) = tables.pop() {
        tables.push(options.demographics.apply(last));
    }
    Ok(tables)
}

fn print_tables(tables: &[Table], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = match tables {
                [table] => table.to_json()?,
                _ => serde_json::to_string_pretty(tables)?,
            };
            println!("{json}");
        }
        OutputFormat::Table => {
            for table in tables {
                println!("{}", table.title.bold().blue());
                if table.is_empty() {
                    println!("  (no rows)");
                } else {
                    print!("{table}");
                }
                println!();
            }
        }
    }
    Ok(())
}
