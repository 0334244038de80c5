//! Single connectivity trial through a candidate proxy

use crate::error::TrialError;
use crate::proxy::models::Candidate;
use async_trait::async_trait;
use reqwest::{Client, Proxy as ReqwestProxy};
use std::time::Duration;
use tracing::debug;

/// Browser user agent sent with every trial request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:69.0) Gecko/20100101 Firefox/69.0";

/// One connectivity attempt: does `target_url` answer when routed through
/// `candidate` using `sub_protocols` as the proxy scheme(s), within `timeout`.
#[async_trait]
pub trait ProbeTrial: Send + Sync {
    async fn attempt(
        &self,
        candidate: &Candidate,
        sub_protocols: &[&str],
        target_url: &str,
        timeout: Duration,
    ) -> bool;
}

/// Trial backed by a reqwest client.
///
/// Any completed response counts as success, whatever its status code.
#[derive(Debug, Clone)]
pub struct HttpProbeTrial {
    user_agent: String,
}

impl HttpProbeTrial {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// Build a client routing both plain and TLS targets through the candidate.
    ///
    /// A single sub-protocol fills both slots; with two, the first is used
    /// for `http` targets and the second for `https` targets.
    fn create_client(
        &self,
        candidate: &Candidate,
        sub_protocols: &[&str],
        timeout: Duration,
    ) -> Result<Client, TrialError> {
        let (insecure, secure) = match sub_protocols {
            [] => return Err(TrialError::NoSubProtocol),
            [only] => (*only, *only),
            [first, second, ..] => (*first, *second),
        };

        let http_proxy =
            ReqwestProxy::http(&candidate.url(insecure)).map_err(TrialError::Client)?;
        let https_proxy =
            ReqwestProxy::https(&candidate.url(secure)).map_err(TrialError::Client)?;

        Client::builder()
            .proxy(http_proxy)
            .proxy(https_proxy)
            .user_agent(self.user_agent.as_str())
            .timeout(timeout)
            .build()
            .map_err(TrialError::Client)
    }

    async fn try_attempt(
        &self,
        candidate: &Candidate,
        sub_protocols: &[&str],
        target_url: &str,
        timeout: Duration,
    ) -> Result<(), TrialError> {
        let client = self.create_client(candidate, sub_protocols, timeout)?;

        match tokio::time::timeout(timeout, client.get(target_url).send()).await {
            Ok(Ok(_response)) => Ok(()),
            Ok(Err(e)) if e.is_timeout() => Err(TrialError::Timeout(timeout)),
            Ok(Err(e)) => Err(TrialError::Request(e)),
            Err(_) => Err(TrialError::Timeout(timeout)),
        }
    }
}

impl Default for HttpProbeTrial {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl ProbeTrial for HttpProbeTrial {
    async fn attempt(
        &self,
        candidate: &Candidate,
        sub_protocols: &[&str],
        target_url: &str,
        timeout: Duration,
    ) -> bool {
        match self
            .try_attempt(candidate, sub_protocols, target_url, timeout)
            .await
        {
            Ok(()) => {
                debug!(%candidate, ?sub_protocols, "trial succeeded");
                true
            }
            Err(e) => {
                debug!(%candidate, ?sub_protocols, error = %e, "trial failed");
                false
            }
        }
    }
}
