mod input;
mod interactive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{DataFiles, Dataset, UserId, DEFAULT_BOOKS_FILE, DEFAULT_RATINGS_FILE};
use input::{parse_count, parse_user_id};
use recommender::{
    summarize_user, Recommendation, Recommender, TieBreak, DEFAULT_RECOMMENDATIONS, TOP_RATED_CAP,
};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// BookRecs - top-rated books for a Book-Crossing user
#[derive(Parser)]
#[command(name = "book-recs")]
#[command(about = "Recommend a user's highest-rated books from the Book-Crossing dataset", long_about = None)]
struct Cli {
    /// Directory holding the dataset files
    #[arg(short, long, env = "BOOK_RECS_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Books file name inside the data directory
    #[arg(long, default_value = DEFAULT_BOOKS_FILE)]
    books_file: PathBuf,

    /// Ratings file name inside the data directory
    #[arg(long, default_value = DEFAULT_RATINGS_FILE)]
    ratings_file: PathBuf,

    /// Number of top-rated books considered before truncating to the count
    #[arg(long, default_value_t = TOP_RATED_CAP)]
    cap: usize,

    /// Ordering of books with equal ratings
    #[arg(long, value_enum, default_value_t = TieBreakArg::SourceOrder)]
    tie_break: TieBreakArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get book recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long, value_parser = parse_user_id)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATIONS, value_parser = parse_count)]
        count: usize,

        /// Show the ISBN and rating behind each recommendation
        #[arg(long)]
        explain: bool,

        /// Print the recommendations as JSON
        #[arg(long, conflicts_with = "explain")]
        json: bool,
    },

    /// Prompt for user IDs and print recommendations until quit (default)
    Interactive {
        /// Number of recommendations per user
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATIONS, value_parser = parse_count)]
        count: usize,
    },

    /// Show a user's rating statistics and top-rated books
    User {
        /// User ID to display
        #[arg(long, value_parser = parse_user_id)]
        user_id: UserId,
    },

    /// Show dataset sizes
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Keep ratings-file order
    SourceOrder,
    /// Ascending ISBN
    Isbn,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::SourceOrder => TieBreak::SourceOrder,
            TieBreakArg::Isbn => TieBreak::Isbn,
        }
    }
}

#[derive(Serialize)]
struct RecommendationReport<'a> {
    user_id: UserId,
    recommendations: &'a [Recommendation],
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let files = DataFiles::with_names(&cli.data_dir, &cli.books_file, &cli.ratings_file);
    let dataset = load_dataset(&files)?;

    let recommender = Recommender::new()
        .with_cap(cli.cap)
        .with_tie_break(cli.tie_break.into());

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Interactive {
        count: DEFAULT_RECOMMENDATIONS,
    }) {
        Commands::Recommend {
            user_id,
            count,
            explain,
            json,
        } => handle_recommend(&dataset, &recommender, user_id, count, explain, json)?,
        Commands::Interactive { count } => {
            let stdin = io::stdin();
            interactive::run(&dataset, &recommender, count, stdin.lock(), io::stdout())?
        }
        Commands::User { user_id } => handle_user(&dataset, &recommender, user_id)?,
        Commands::Stats => handle_stats(&dataset)?,
    }

    Ok(())
}

/// Load both tables once; a missing file gets its own message
fn load_dataset(files: &DataFiles) -> Result<Dataset> {
    let start = Instant::now();
    let dataset = Dataset::load_from_files(files).map_err(|e| {
        if e.is_missing_file() {
            anyhow::Error::new(e).context(format!(
                "CSV files not found. Make sure {} and {} exist.",
                files.books.display(),
                files.ratings.display()
            ))
        } else {
            anyhow::Error::new(e).context("An error occurred while loading data")
        }
    })?;
    info!("Loaded dataset in {:?}", start.elapsed());
    Ok(dataset)
}

/// Handle the 'recommend' command
fn handle_recommend(
    dataset: &Dataset,
    recommender: &Recommender,
    user_id: UserId,
    count: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    let recommendations =
        recommender.recommend_detailed(user_id, &dataset.ratings, &dataset.books, count);

    if json {
        println!("{}", render_json(user_id, &recommendations)?);
        return Ok(());
    }

    if explain {
        print_recommendations(user_id, &recommendations);
    } else {
        let titles: Vec<String> = recommendations.into_iter().map(|rec| rec.title).collect();
        interactive::print_titles(&mut io::stdout(), user_id, &titles)?;
    }
    Ok(())
}

/// Recommendations of one user as pretty-printed JSON
fn render_json(user_id: UserId, recommendations: &[Recommendation]) -> Result<String> {
    let report = RecommendationReport {
        user_id,
        recommendations,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize recommendations")
}

/// Handle the 'user' command
fn handle_user(dataset: &Dataset, recommender: &Recommender, user_id: UserId) -> Result<()> {
    println!("{}", format!("User ID: {}", user_id).bold().blue());

    let Some(summary) = summarize_user(user_id, &dataset.ratings) else {
        println!("No ratings found for this user.");
        return Ok(());
    };

    println!("{}Number of ratings: {}", "• ".cyan(), summary.rating_count);
    println!("{}Average rating: {:.2}", "• ".cyan(), summary.mean_rating);

    let top = recommender.recommend_detailed(
        user_id,
        &dataset.ratings,
        &dataset.books,
        recommender.cap(),
    );
    println!("Top rated books:");
    for rec in &top {
        println!("  - {} (Rating: {})", rec.title, rec.rating);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(dataset: &Dataset) -> Result<()> {
    let stats = dataset.stats();
    println!("{}", "Dataset statistics:".bold().blue());
    println!("{}Books: {}", "• ".green(), stats.books);
    println!("{}Ratings: {}", "• ".green(), stats.ratings);
    println!("{}Users with ratings: {}", "• ".green(), stats.users);
    println!(
        "{}Ratings without a matching book: {}",
        "• ".green(),
        stats.dangling_ratings
    );
    Ok(())
}

/// Helper function to format and print recommendations with their source rows
fn print_recommendations(user_id: UserId, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Top Book Recommendations for User {}:", user_id).bold().blue()
    );
    if recommendations.is_empty() {
        println!("No recommendations found for this user.");
        return;
    }
    for rec in recommendations {
        println!(
            "{}: {} [ISBN {}] - Rating: {}",
            rec.rank.to_string().green(),
            rec.title,
            rec.isbn,
            rec.rating
        );
    }
}
