//! Proxy classification data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol variant a candidate proxy can be classified under.
///
/// Declaration order is probing priority: a candidate is tried as
/// `HttpHttps` first, then `Socks4`, then `Socks5`. `Invalid` is the
/// fallback and is never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVariant {
    HttpHttps,
    Socks4,
    Socks5,
    Invalid,
}

/// Metadata attached to a protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    /// Human readable name
    pub name: &'static str,
    /// Output file the variant's proxies are saved to
    pub filename: &'static str,
    /// Proxy URL schemes bound for a trial, in `[insecure, secure]` order
    pub sub_protocols: &'static [&'static str],
}

/// Indexed by `ProtocolVariant as usize`.
static VARIANT_TABLE: [VariantInfo; 4] = [
    VariantInfo {
        name: "HTTP(S)",
        filename: "http(s).txt",
        sub_protocols: &["http", "https"],
    },
    VariantInfo {
        name: "SOCKS4",
        filename: "socks4.txt",
        sub_protocols: &["socks4"],
    },
    VariantInfo {
        name: "SOCKS5",
        filename: "socks5.txt",
        sub_protocols: &["socks5"],
    },
    VariantInfo {
        name: "INVALID",
        filename: "invalid.txt",
        sub_protocols: &[],
    },
];

impl ProtocolVariant {
    /// All variants in declaration order
    pub const ALL: [ProtocolVariant; 4] = [
        ProtocolVariant::HttpHttps,
        ProtocolVariant::Socks4,
        ProtocolVariant::Socks5,
        ProtocolVariant::Invalid,
    ];

    /// Variants that are actively probed, in priority order
    pub fn probed() -> impl Iterator<Item = ProtocolVariant> {
        Self::ALL.into_iter().filter(|v| !v.is_invalid())
    }

    pub fn info(self) -> &'static VariantInfo {
        &VARIANT_TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn filename(self) -> &'static str {
        self.info().filename
    }

    pub fn sub_protocols(self) -> &'static [&'static str] {
        self.info().sub_protocols
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, ProtocolVariant::Invalid)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A proxy endpoint as read from input, usually `host:port`.
///
/// The value is opaque: it is never validated, only handed to the
/// HTTP client as the authority part of a proxy URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Proxy URL for this endpoint under the given scheme
    pub fn url(&self, scheme: &str) -> String {
        format!("{}://{}", scheme, self.0)
    }
}

impl From<&str> for Candidate {
    fn from(endpoint: &str) -> Self {
        Self::new(endpoint)
    }
}

impl From<String> for Candidate {
    fn from(endpoint: String) -> Self {
        Self(endpoint)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of classifying one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub candidate: Candidate,
    pub variant: ProtocolVariant,
}

impl ClassificationResult {
    pub fn new(candidate: Candidate, variant: ProtocolVariant) -> Self {
        Self { candidate, variant }
    }

    pub fn invalid(candidate: Candidate) -> Self {
        Self::new(candidate, ProtocolVariant::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        !self.variant.is_invalid()
    }
}

/// Candidates grouped by protocol variant.
///
/// Always holds a group for every variant, possibly empty. Within a
/// group candidates keep the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    groups: [Vec<Candidate>; 4],
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ClassificationResult) {
        self.groups[result.variant.index()].push(result.candidate);
    }

    /// Candidates classified under `variant`
    pub fn get(&self, variant: ProtocolVariant) -> &[Candidate] {
        &self.groups[variant.index()]
    }

    /// Groups in variant declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ProtocolVariant, &[Candidate])> {
        ProtocolVariant::ALL
            .into_iter()
            .map(move |variant| (variant, self.get(variant)))
    }

    /// Total number of candidates across all groups
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_order() {
        let probed: Vec<_> = ProtocolVariant::probed().collect();
        assert_eq!(
            probed,
            vec![
                ProtocolVariant::HttpHttps,
                ProtocolVariant::Socks4,
                ProtocolVariant::Socks5
            ]
        );
        assert_eq!(ProtocolVariant::ALL[3], ProtocolVariant::Invalid);
    }

    #[test]
    fn test_variant_metadata() {
        assert_eq!(ProtocolVariant::HttpHttps.name(), "HTTP(S)");
        assert_eq!(ProtocolVariant::HttpHttps.filename(), "http(s).txt");
        assert_eq!(ProtocolVariant::HttpHttps.sub_protocols(), &["http", "https"]);
        assert_eq!(ProtocolVariant::Socks4.filename(), "socks4.txt");
        assert_eq!(ProtocolVariant::Socks4.sub_protocols(), &["socks4"]);
        assert_eq!(ProtocolVariant::Socks5.filename(), "socks5.txt");
        assert_eq!(ProtocolVariant::Socks5.sub_protocols(), &["socks5"]);
        assert_eq!(ProtocolVariant::Invalid.filename(), "invalid.txt");
        assert!(ProtocolVariant::Invalid.sub_protocols().is_empty());
        assert_eq!(ProtocolVariant::Socks5.to_string(), "SOCKS5");
    }

    #[test]
    fn test_candidate_url() {
        let candidate = Candidate::from("127.0.0.1:1080");
        assert_eq!(candidate.url("socks5"), "socks5://127.0.0.1:1080");
        assert_eq!(candidate.to_string(), "127.0.0.1:1080");
    }

    #[test]
    fn test_classification_result() {
        let result = ClassificationResult::new("1.1.1.1:80".into(), ProtocolVariant::Socks4);
        assert!(result.is_valid());

        let result = ClassificationResult::invalid("1.1.1.1:80".into());
        assert!(!result.is_valid());
        assert_eq!(result.variant, ProtocolVariant::Invalid);
    }

    #[test]
    fn test_result_set_groups() {
        let mut set = ResultSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 4);

        set.push(ClassificationResult::new("a:1".into(), ProtocolVariant::Socks5));
        set.push(ClassificationResult::invalid("b:2".into()));
        set.push(ClassificationResult::new("c:3".into(), ProtocolVariant::Socks5));

        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get(ProtocolVariant::Socks5),
            &[Candidate::from("a:1"), Candidate::from("c:3")]
        );
        assert_eq!(set.get(ProtocolVariant::Invalid), &[Candidate::from("b:2")]);
        assert!(set.get(ProtocolVariant::HttpHttps).is_empty());
    }

    #[test]
    fn test_result_set_serializes_as_plain_strings() {
        let mut set = ResultSet::new();
        set.push(ClassificationResult::new("1.2.3.4:8080".into(), ProtocolVariant::HttpHttps));
        set.push(ClassificationResult::invalid("5.6.7.8:3128".into()));

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "groups": [["1.2.3.4:8080"], [], [], ["5.6.7.8:3128"]]
            })
        );

        let back: ResultSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_classification_result_json() {
        let result = ClassificationResult::new("9.9.9.9:1080".into(), ProtocolVariant::Socks5);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"candidate":"9.9.9.9:1080","variant":"Socks5"}"#);
        assert_eq!(serde_json::from_str::<ClassificationResult>(&json).unwrap(), result);
    }
}
