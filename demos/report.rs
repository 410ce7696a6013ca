use std::path::PathBuf;
use std::process::ExitCode;

use archub_analyzer::analyze_file;
use archub_analyzer::models::{
    AnalyzeOptions, DEFAULT_BOT_HANDLE, DEFAULT_BUCKET_DAYS, DEFAULT_EXCLUDED_SUBJECT,
    DEFAULT_FILE_PATH, DEFAULT_LEADERBOARD_SIZE,
};
use archub_analyzer::report::format_leaderboard;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "archub-report",
    about = "Mission-making statistics from an ARCHUB Discord export"
)]
struct Cli {
    /// Semicolon separated export produced by DiscordChatExporter
    #[arg(default_value = DEFAULT_FILE_PATH)]
    path: PathBuf,

    /// Author handle of the reporting bot
    #[arg(long, default_value = DEFAULT_BOT_HANDLE)]
    bot: String,

    /// Mission name to leave out of every statistic
    #[arg(long, default_value = DEFAULT_EXCLUDED_SUBJECT)]
    exclude: String,

    /// Width of a chart bucket in days
    #[arg(long, default_value_t = DEFAULT_BUCKET_DAYS)]
    bucket_days: u32,

    /// Maximum number of entries per leaderboard
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    top: usize,

    /// Add empty buckets for periods without submissions
    #[arg(long)]
    fill_gaps: bool,

    /// Read ambiguous dates like 03/06/2021 as day/month
    #[arg(long)]
    days_first: bool,

    /// Log progress to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = AnalyzeOptions {
        bot_handle: cli.bot,
        excluded_subject: cli.exclude,
        bucket_days: cli.bucket_days,
        leaderboard_size: cli.top,
        fill_gaps: cli.fill_gaps,
        days_first: cli.days_first,
    };

    let analysis = match analyze_file(&cli.path, &options) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("error: {}: {e}", cli.path.display());
            return ExitCode::FAILURE;
        }
    };

    println!("Maps created per {}-day period", options.bucket_days);
    println!();
    for bucket in &analysis.buckets {
        println!("{:>4}  {}", bucket.count, bucket.label());
    }

    for board in &analysis.leaderboards {
        println!();
        print!("{}", format_leaderboard(board));
    }

    ExitCode::SUCCESS
}
