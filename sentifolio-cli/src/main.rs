//! Sentifolio CLI — query the sentiment-portfolio API from scripts.
//!
//! Commands:
//! - `returns` — fetch portfolio vs benchmark returns and print the summary
//! - `news` — fetch news articles for a set of tickers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use sentifolio_core::filter::{Benchmark, DateRange, FilterSelection, Indicator, INDICATORS};
use sentifolio_core::series::{clean, summarize, ticker_selections};
use sentifolio_core::{ApiClient, ApiConfig, ReturnsQuery};

#[derive(Parser)]
#[command(
    name = "sentifolio",
    about = "Sentifolio CLI — Reddit-sentiment portfolio vs benchmark"
)]
struct Cli {
    /// API base URL. Defaults to the configured or local server.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch portfolio returns for a date range and print the summary.
    Returns {
        /// Start date (YYYY-MM-DD).
        #[arg(long, default_value = "2021-01-01")]
        start: String,

        /// End date (YYYY-MM-DD).
        #[arg(long, default_value = "2021-12-31")]
        end: String,

        /// Ranking indicator: engagement_ratio, total_sentiment, score, comms_num.
        #[arg(long, default_value = "engagement_ratio")]
        indicator: String,

        /// Benchmark symbol: QQQ or AAPL.
        #[arg(long, default_value = "QQQ")]
        benchmark: String,

        /// Print the raw cleaned series as JSON instead of the summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch news articles for the given tickers.
    News {
        /// Tickers to search for (e.g., GME AMC PLTR).
        #[arg(required = true)]
        tickers: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ApiConfig::default();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = ApiClient::new(&config)?;

    match cli.command {
        Commands::Returns {
            start,
            end,
            indicator,
            benchmark,
            json,
        } => cmd_returns(&client, &start, &end, &indicator, &benchmark, json),
        Commands::News { tickers } => cmd_news(&client, &tickers),
    }
}

fn cmd_returns(
    client: &ApiClient,
    start: &str,
    end: &str,
    indicator: &str,
    benchmark: &str,
    json: bool,
) -> Result<()> {
    let selection = FilterSelection {
        range: DateRange {
            start: parse_date(start)?,
            end: parse_date(end)?,
        },
        indicator: parse_indicator(indicator)?,
        benchmark: parse_benchmark(benchmark)?,
    };

    let query = ReturnsQuery::from_selection(&selection);
    let payload = client
        .portfolio_returns(&query)
        .context("fetching portfolio returns")?;

    let series = clean(&payload, selection.benchmark).context("cleaning returns payload")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    let summary = summarize(&series);
    println!(
        "Period     {} .. {}",
        selection.range.start, selection.range.end
    );
    println!("Indicator  {}", selection.indicator.label());
    println!("Benchmark  {}", selection.benchmark.label());
    println!("Periods    {}", series.len());
    println!(
        "Peak       {:+.2}% on {}",
        summary.peak_return * 100.0,
        summary.peak_label.as_deref().unwrap_or("-")
    );
    println!(
        "Outperf    {:.2}% of periods beat {}",
        summary.outperformance_pct,
        selection.benchmark.as_symbol()
    );

    let rows = ticker_selections(&payload);
    if !rows.is_empty() {
        println!();
        println!("Rebalancing dates:");
        for row in rows {
            println!("  {}  {}", row.date, row.tickers.join(", "));
        }
    }
    Ok(())
}

fn cmd_news(client: &ApiClient, tickers: &[String]) -> Result<()> {
    let response = client.news(tickers).context("fetching news")?;
    if response.status == "error" {
        bail!(
            "news endpoint error: {}",
            response.message.unwrap_or_else(|| "unknown".into())
        );
    }

    println!(
        "{} articles for {}",
        response.total_results,
        response.tickers.join(", ")
    );
    for article in response.articles {
        let date_part = article.published_at.get(..10).unwrap_or("");
        println!("  {date_part}  {}  ({})", article.title, article.source);
        if !article.url.is_empty() {
            println!("              {}", article.url);
        }
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date: {s}"))
}

fn parse_indicator(s: &str) -> Result<Indicator> {
    match INDICATORS.iter().find(|i| i.as_param() == s) {
        Some(indicator) => Ok(*indicator),
        None => bail!(
            "unknown indicator {s:?}; expected one of: {}",
            INDICATORS
                .iter()
                .map(|i| i.as_param())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn parse_benchmark(s: &str) -> Result<Benchmark> {
    match s.to_ascii_uppercase().as_str() {
        "QQQ" => Ok(Benchmark::Qqq),
        "AAPL" => Ok(Benchmark::Aapl),
        _ => bail!("unknown benchmark {s:?}; expected QQQ or AAPL"),
    }
}
