//! Proxy checker: per-candidate classification and the bounded scheduler

use crate::proxy::aggregator::ResultAggregator;
use crate::proxy::models::{Candidate, ClassificationResult, ProtocolVariant, ResultSet};
use crate::proxy::progress::{ProgressEvent, ProgressSink};
use crate::proxy::trial::{HttpProbeTrial, ProbeTrial, DEFAULT_USER_AGENT};
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

/// Default timeout for each trial in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Default number of candidates classified concurrently
const DEFAULT_CONCURRENCY: usize = 50;

/// Default URL every trial is routed to
const DEFAULT_PROBE_URL: &str = "https://google.com";

/// Configuration for proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for each trial
    pub timeout: Duration,
    /// Number of candidates classified at once
    pub concurrency: usize,
    /// URL to route trials to
    pub probe_url: String,
    /// User-Agent header sent with each trial
    pub user_agent: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            probe_url: DEFAULT_PROBE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_probe_url(mut self, url: String) -> Self {
        self.probe_url = url;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Classifies candidate proxies by the protocol they relay traffic with
#[derive(Clone)]
pub struct ProxyChecker {
    config: CheckerConfig,
    trial: Arc<dyn ProbeTrial>,
    progress: ProgressSink,
}

impl ProxyChecker {
    /// Create a new proxy checker with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    /// Create a new proxy checker backed by real HTTP trials
    pub fn with_config(config: CheckerConfig) -> Self {
        let trial = Arc::new(HttpProbeTrial::new(config.user_agent.clone()));
        Self::with_trial(config, trial)
    }

    /// Create a proxy checker running trials through `trial`
    pub fn with_trial(config: CheckerConfig, trial: Arc<dyn ProbeTrial>) -> Self {
        Self {
            config,
            trial,
            progress: ProgressSink::disabled(),
        }
    }

    /// Report progress events to `tx`
    pub fn with_progress(mut self, tx: UnboundedSender<ProgressEvent>) -> Self {
        self.progress = ProgressSink::new(tx);
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Classify one candidate.
    ///
    /// Variants are tried in declaration order and the first that relays
    /// the probe wins; later variants are not tried. Falls back to
    /// `Invalid` when every trial fails.
    pub async fn classify(&self, candidate: Candidate) -> ClassificationResult {
        let mut result = ClassificationResult::invalid(candidate);

        for variant in ProtocolVariant::probed() {
            let relayed = self
                .trial
                .attempt(
                    &result.candidate,
                    variant.sub_protocols(),
                    &self.config.probe_url,
                    self.config.timeout,
                )
                .await;
            if relayed {
                result.variant = variant;
                break;
            }
        }

        self.progress.emit(ProgressEvent::Classified(result.clone()));
        result
    }

    /// Classify every candidate with at most `concurrency_limit` in flight.
    ///
    /// Results come back in completion order, exactly one per candidate.
    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
    ) -> Vec<ClassificationResult> {
        let total = candidates.len();
        info!(total, concurrency = concurrency_limit, "classification started");
        self.progress.emit(ProgressEvent::Started { total });

        let results: Vec<_> = self
            .results_stream(candidates, concurrency_limit)
            .collect()
            .await;

        info!(checked = results.len(), "classification finished");
        self.progress.emit(ProgressEvent::Finished {
            checked: results.len(),
        });
        results
    }

    /// Like [`run`](Self::run), but hands results over as they complete.
    ///
    /// Emits the same progress events as `run`. The receiver yields `None`
    /// once every candidate has been classified.
    pub fn run_stream(
        &self,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
    ) -> UnboundedReceiver<ClassificationResult> {
        let (tx, rx) = mpsc::unbounded_channel();
        let checker = self.clone();

        tokio::spawn(async move {
            let total = candidates.len();
            info!(total, concurrency = concurrency_limit, "classification started");
            checker.progress.emit(ProgressEvent::Started { total });

            let mut checked = 0;
            let mut results = Box::pin(checker.results_stream(candidates, concurrency_limit));
            while let Some(result) = results.next().await {
                checked += 1;
                // Keep classifying if the receiver is gone so progress stays complete
                let _ = tx.send(result);
            }

            info!(checked, "classification finished");
            checker.progress.emit(ProgressEvent::Finished { checked });
        });

        rx
    }

    /// Classify candidates with the configured concurrency and group them
    pub async fn check(&self, candidates: Vec<Candidate>) -> ResultSet {
        let results = self.run(candidates, self.config.concurrency).await;
        ResultAggregator::aggregate(results)
    }

    fn results_stream(
        &self,
        candidates: Vec<Candidate>,
        concurrency_limit: usize,
    ) -> impl Stream<Item = ClassificationResult> + '_ {
        stream::iter(candidates)
            .map(move |candidate| self.classify(candidate))
            .buffer_unordered(concurrency_limit.max(1))
    }
}

impl Default for ProxyChecker {
    fn default() -> Self {
        Self::new()
    }
}
