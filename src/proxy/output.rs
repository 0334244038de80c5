//! Writing a result set to one file per protocol variant

use crate::proxy::models::{ProtocolVariant, ResultSet};
use crate::proxy::parser::ProxyParser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Outcome of writing one variant's file
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub variant: ProtocolVariant,
    pub path: PathBuf,
    /// Number of proxies in the group
    pub count: usize,
    /// Error message if the file could not be written
    pub error: Option<String>,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-file outcomes of [`write_result_set`], in variant order
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    pub outcomes: Vec<WriteOutcome>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(WriteOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Write every group of `set` into `dir`, one file per variant.
///
/// A failed file is logged and recorded in the report; the remaining
/// files are still written.
pub fn write_result_set<P: AsRef<Path>>(set: &ResultSet, dir: P) -> WriteReport {
    let dir = dir.as_ref();
    if let Err(e) = fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "failed to create output directory");
    }

    let outcomes = set
        .iter()
        .map(|(variant, candidates)| {
            let path = dir.join(variant.filename());
            let error = ProxyParser::save_to_file(candidates, &path)
                .err()
                .map(|e| format!("{:#}", e));
            if let Some(ref error) = error {
                warn!(%variant, path = %path.display(), %error, "failed to save proxies");
            }
            WriteOutcome {
                variant,
                path,
                count: candidates.len(),
                error,
            }
        })
        .collect();

    WriteReport { outcomes }
}
