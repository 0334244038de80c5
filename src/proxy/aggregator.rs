//! Grouping of classification results by protocol variant

use crate::proxy::models::{ClassificationResult, ResultSet};

/// Builds a [`ResultSet`] from classification results
pub struct ResultAggregator;

impl ResultAggregator {
    /// Group `results` by variant, keeping the order they arrive in.
    pub fn aggregate<I>(results: I) -> ResultSet
    where
        I: IntoIterator<Item = ClassificationResult>,
    {
        let mut set = ResultSet::new();
        for result in results {
            set.push(result);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::models::{Candidate, ProtocolVariant};

    fn result(candidate: &str, variant: ProtocolVariant) -> ClassificationResult {
        ClassificationResult::new(candidate.into(), variant)
    }

    #[test]
    fn test_aggregate_mixed_results() {
        let set = ResultAggregator::aggregate(vec![
            result("1.2.3.4:8080", ProtocolVariant::HttpHttps),
            result("9.9.9.9:1080", ProtocolVariant::Socks5),
        ]);

        assert_eq!(set.get(ProtocolVariant::HttpHttps), &[Candidate::from("1.2.3.4:8080")]);
        assert!(set.get(ProtocolVariant::Socks4).is_empty());
        assert_eq!(set.get(ProtocolVariant::Socks5), &[Candidate::from("9.9.9.9:1080")]);
        assert!(set.get(ProtocolVariant::Invalid).is_empty());
    }

    #[test]
    fn test_aggregate_keeps_arrival_order() {
        let set = ResultAggregator::aggregate(vec![
            result("c:3", ProtocolVariant::Invalid),
            result("a:1", ProtocolVariant::Invalid),
            result("b:2", ProtocolVariant::Socks4),
            result("d:4", ProtocolVariant::Invalid),
        ]);

        let invalid: Vec<_> = set
            .get(ProtocolVariant::Invalid)
            .iter()
            .map(Candidate::as_str)
            .collect();
        assert_eq!(invalid, vec!["c:3", "a:1", "d:4"]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let results = vec![
            result("a:1", ProtocolVariant::Socks5),
            result("b:2", ProtocolVariant::HttpHttps),
            result("c:3", ProtocolVariant::Socks5),
        ];

        let first = ResultAggregator::aggregate(results.clone());
        let second = ResultAggregator::aggregate(results);
        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregate_empty() {
        let set = ResultAggregator::aggregate(Vec::new());
        assert!(set.is_empty());
        assert!(set.iter().all(|(_, group)| group.is_empty()));
        assert_eq!(set.iter().count(), 4);
    }

    #[test]
    fn test_aggregate_duplicates_are_kept() {
        let set = ResultAggregator::aggregate(vec![
            result("a:1", ProtocolVariant::Invalid),
            result("a:1", ProtocolVariant::Invalid),
        ]);
        assert_eq!(set.get(ProtocolVariant::Invalid).len(), 2);
    }
}
