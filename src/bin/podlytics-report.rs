use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use podlytics::config::Config;
use podlytics::feed::{EventFeed, HttpFeed};
use podlytics::stats::{build_report, TimeWindow};

#[derive(Parser)]
#[command(name = "podlytics-report")]
#[command(about = "Podcast download report CLI", long_about = None)]
struct Cli {
    /// Chart window: 7d, 30d, 90d or month
    #[arg(short, long, default_value = "30d")]
    window: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print scalar totals for the window
    Summary,
    /// Print per-episode downloads and unique listeners
    Episodes,
    /// Print top countries, apps and devices
    Breakdown,
    /// Print the cumulative per-episode series as JSON
    Series,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let window = cli
        .window
        .parse::<TimeWindow>()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::from_env()?;
    let feed = HttpFeed::new(&config.feed)?;

    let events = feed.fetch_events().await?;
    let titles = feed.fetch_titles().await?;
    let report = build_report(&events, &titles, window, Utc::now());

    match cli.command {
        Commands::Summary => {
            println!("Window:             {}", window);
            println!("Total downloads:    {}", report.total_downloads);
            println!("Last 7 days:        {}", report.downloads_7_days);
            println!("Last 30 days:       {}", report.downloads_30_days);
            println!("Unique listeners:   {}", report.unique_listeners);
        }
        Commands::Episodes => {
            if report.episodes.is_empty() {
                println!("No downloads in window '{}'.", window);
            } else {
                println!("{:<50} {:>10} {:>10}", "Episode", "Downloads", "Listeners");
                println!("{}", "-".repeat(72));
                for ep in &report.episodes {
                    println!(
                        "{:<50} {:>10} {:>10}",
                        ep.title, ep.downloads, ep.unique_listeners
                    );
                }
            }
        }
        Commands::Breakdown => {
            for (label, stats) in [
                ("Top countries", &report.top_countries),
                ("Top apps", &report.top_apps),
                ("Devices", &report.devices),
            ] {
                println!("{}:", label);
                if stats.is_empty() {
                    println!("  (none)");
                } else {
                    for stat in stats {
                        println!("  {:<30} {:>8} {:>7.1}%", stat.key, stat.count, stat.percentage);
                    }
                }
                println!();
            }
        }
        Commands::Series => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report.downloads_over_time)?
            );
        }
    }

    Ok(())
}
