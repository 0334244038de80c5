//! Proxy Classifier
//!
//! Checks a list of proxies concurrently and sorts them by the protocol
//! they relay traffic with: HTTP(S), SOCKS4, SOCKS5, or invalid.

pub mod error;
pub mod proxy;

pub use error::TrialError;
pub use proxy::*;

use std::path::PathBuf;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Default file candidates are read from
pub const DEFAULT_INPUT_FILE: &str = "CHECKING.txt";

/// Input and output locations for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// File holding one candidate proxy per line
    pub input_path: PathBuf,
    /// Directory the per-protocol files are written to
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_FILE)
    }
}

/// Classify every proxy in `config.input_path` and save the groups.
///
/// Probing settings come from `checker` alone; `Config` only names the
/// files involved.
///
/// Failing to read the input is fatal; failing to write an output file
/// is only recorded in the returned report.
pub async fn check_file(
    config: &Config,
    checker: &ProxyChecker,
) -> Result<(ResultSet, WriteReport)> {
    let candidates = ProxyParser::parse_file(&config.input_path)?;
    let set = checker.check(candidates).await;
    let report = write_result_set(&set, &config.output_dir);
    Ok((set, report))
}
