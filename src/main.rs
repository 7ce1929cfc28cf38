use clap::Parser;
use tracing_subscriber::EnvFilter;

use hn_relay::cli::{Cli, Commands};
use hn_relay::config::Config;
use hn_relay::errors::RelayResult;
use hn_relay::pacing::SystemClock;
use hn_relay::scheduler::Scheduler;
use hn_relay::services::{
    DryRunSender, FetchService, MessageSender, NotificationService, RelayService, RunSummary,
};
use hn_relay::sources::HackerNewsClient;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries command output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> RelayResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Run {
            dry_run,
            count,
            max_runs,
        } => cmd_run(&config, dry_run, count, max_runs),
        Commands::Once { dry_run, count } => cmd_once(&config, dry_run, count),
        Commands::Top { count } => cmd_top(&config, count),
    }
}

fn cmd_run(
    config: &Config,
    dry_run: bool,
    count: Option<usize>,
    max_runs: Option<u64>,
) -> RelayResult<()> {
    if dry_run {
        schedule(config, DryRunSender, count, max_runs)
    } else {
        schedule(config, NotificationService::new(config)?, count, max_runs)
    }
}

fn schedule<S: MessageSender>(
    config: &Config,
    sender: S,
    count: Option<usize>,
    max_runs: Option<u64>,
) -> RelayResult<()> {
    let api = HackerNewsClient::new(&config.hn_api_url, config.http_timeout)?;
    let relay = RelayService::new(
        api,
        sender,
        SystemClock,
        count.unwrap_or(config.story_count),
    );

    tracing::info!(
        interval_hours = config.interval.as_secs() / 3600,
        "Starting scheduler"
    );

    let scheduler = Scheduler::new(config.interval, SystemClock);
    scheduler.run(max_runs, |_| {
        relay.run_once();
    });

    Ok(())
}

fn cmd_once(config: &Config, dry_run: bool, count: Option<usize>) -> RelayResult<()> {
    let api = HackerNewsClient::new(&config.hn_api_url, config.http_timeout)?;
    let count = count.unwrap_or(config.story_count);

    let summary = if dry_run {
        RelayService::new(api, DryRunSender, SystemClock, count).run_once()
    } else {
        let sender = NotificationService::new(config)?;
        RelayService::new(api, sender, SystemClock, count).run_once()
    };

    print_summary(&summary, dry_run);
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    if dry_run {
        println!("Dry run complete. Would send {} stories.", summary.fetched);
    } else {
        println!(
            "Sent {} of {} stories ({} failed).",
            summary.sent, summary.fetched, summary.failed
        );
    }
}

fn cmd_top(config: &Config, count: Option<usize>) -> RelayResult<()> {
    let api = HackerNewsClient::new(&config.hn_api_url, config.http_timeout)?;
    let service = FetchService::new(api, SystemClock);
    let stories = service.fetch_top_stories(count.unwrap_or(config.story_count))?;

    if stories.is_empty() {
        println!("No stories fetched.");
        return Ok(());
    }

    println!("Top stories:\n");
    for (rank, story) in stories.iter().enumerate() {
        println!(
            "  {}. {} ({} points, {} comments)",
            rank + 1,
            story.title,
            story.score,
            story.descendants
        );
        println!("     {}", story.link());
        if let Some(at) = story.submitted_at() {
            println!("     by {} at {}", story.by, at.format("%Y-%m-%d %H:%M UTC"));
        }
        println!();
    }

    Ok(())
}
