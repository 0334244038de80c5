use anyhow::Result;
use clap::Parser;
use proxy_classifier::{
    check_file, CheckerConfig, Config, ProgressEvent, ProxyChecker, WriteReport,
    DEFAULT_INPUT_FILE,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::EnvFilter;

/// Check proxies and sort them by the protocol they relay
#[derive(Parser)]
#[command(name = "proxy-classifier")]
#[command(about = "Check proxies and sort them into HTTP(S), SOCKS4, SOCKS5 and invalid lists")]
struct Cli {
    /// Input file containing one proxy (host:port) per line
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,
    /// Directory to write the per-protocol files to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Number of proxies checked concurrently
    #[arg(short = 'n', long, default_value = "55")]
    concurrency: usize,
    /// Timeout in seconds for each protocol trial (fractions allowed)
    #[arg(long, default_value = "1", value_parser = parse_timeout)]
    timeout: Duration,
    /// URL to test proxies against
    #[arg(long, default_value = "https://google.com")]
    url: String,
    /// User-Agent header sent through the proxies
    #[arg(long)]
    user_agent: Option<String>,
    /// Log every trial outcome to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut checker_config = CheckerConfig::new()
        .with_concurrency(cli.concurrency)
        .with_timeout(cli.timeout)
        .with_probe_url(cli.url);
    if let Some(user_agent) = cli.user_agent {
        checker_config = checker_config.with_user_agent(user_agent);
    }
    let config = Config::new(cli.input).with_output_dir(cli.output_dir);

    println!("[Parameters]");
    println!("File: {}", config.input_path.display());
    println!("Workers: {}", checker_config.concurrency);
    println!("Timeout: {}s", checker_config.timeout.as_secs_f64());
    println!("URL: {}", checker_config.probe_url);

    let (tx, rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(render_progress(rx));

    let checker = ProxyChecker::with_config(checker_config).with_progress(tx);
    let outcome = check_file(&config, &checker).await;
    // Closes the progress channel so the renderer can finish
    drop(checker);
    renderer.await?;

    let (_, report) = outcome?;
    print_report(&report);

    Ok(())
}

/// Parse a positive number of seconds, fractions included
fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("invalid timeout: {}", s))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got {}", s));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout {}: {}", s, e))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("proxy_classifier=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn render_progress(mut rx: UnboundedReceiver<ProgressEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            ProgressEvent::Started { total } => {
                println!("Proxies: {}", total);
                println!("\n[Progress]");
            }
            ProgressEvent::Classified(result) if result.is_valid() => {
                println!("Valid proxy: {} ({})", result.candidate, result.variant);
            }
            ProgressEvent::Classified(result) => {
                println!("Invalid proxy: {}", result.candidate);
            }
            ProgressEvent::Finished { checked } => {
                println!("Checked {} proxies", checked);
            }
        }
    }
}

fn print_report(report: &WriteReport) {
    println!("\n[Results]");
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!(
                "{} proxies ({}) saved to {}",
                outcome.variant,
                outcome.count,
                outcome.path.display()
            ),
            Some(error) => eprintln!(
                "Failed to save {} proxies to {}: {}",
                outcome.variant,
                outcome.path.display(),
                error
            ),
        }
    }
}
