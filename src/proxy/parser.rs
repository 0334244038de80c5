//! Reading candidate lists and saving classified proxies

use crate::proxy::models::Candidate;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Reads and writes line-delimited proxy lists
pub struct ProxyParser;

impl ProxyParser {
    /// Parse candidates from a string, one per line.
    ///
    /// Lines are trimmed but otherwise kept as-is: blank lines become
    /// empty candidates that will fail every trial.
    pub fn parse_string(content: &str) -> Vec<Candidate> {
        content
            .lines()
            .map(|line| Candidate::new(line.trim()))
            .collect()
    }

    /// Parse candidates from a file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read proxies from {}", path.display()))?;
        Ok(Self::parse_string(&content))
    }

    /// Save candidates to a file, newline separated, replacing its contents
    pub fn save_to_file<P: AsRef<Path>>(candidates: &[Candidate], path: P) -> Result<()> {
        let path = path.as_ref();
        let content = candidates
            .iter()
            .map(Candidate::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
