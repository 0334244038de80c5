//! Proxy module for classifying proxies by protocol
//!
//! This module provides functionality for:
//! - Reading candidate proxies from line-delimited files
//! - Probing each candidate as HTTP(S), SOCKS4 and SOCKS5 with bounded concurrency
//! - Grouping the results and saving one file per protocol

pub mod aggregator;
pub mod checker;
pub mod models;
pub mod output;
pub mod parser;
pub mod progress;
pub mod trial;

pub use aggregator::ResultAggregator;
pub use checker::{CheckerConfig, ProxyChecker};
pub use models::{Candidate, ClassificationResult, ProtocolVariant, ResultSet, VariantInfo};
pub use output::{write_result_set, WriteOutcome, WriteReport};
pub use parser::ProxyParser;
pub use progress::ProgressEvent;
pub use trial::{HttpProbeTrial, ProbeTrial};
