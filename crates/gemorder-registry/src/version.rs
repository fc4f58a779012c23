//! RubyGems version parsing, comparison, and requirement matching.
//!
//! Gem versions are dotted sequences of segments where:
//! - Numeric segments compare as numbers
//! - Alphabetic segments mark prereleases and sort before the release
//!   (`1.0.beta` < `1.0`)
//! - Trailing zero segments are insignificant (`1.0` == `1.0.0`)
//!
//! Requirements support the RubyGems operators `=`, `!=`, `>`, `<`,
//! `>=`, `<=`, and the pessimistic operator `~>`.

use std::cmp::Ordering;
use std::fmt;

use gemorder_util::errors::GemorderError;

/// A parsed gem version with comparable segments.
#[derive(Debug, Clone)]
pub struct GemVersion {
    pub original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Text(String),
}

impl GemVersion {
    pub fn parse(version: &str) -> Self {
        Self {
            original: version.trim().to_string(),
            segments: parse_segments(version.trim()),
        }
    }

    /// Whether any alphabetic segment marks this as a prerelease.
    pub fn is_prerelease(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Text(_)))
    }

    /// The next version excluded by the pessimistic operator.
    ///
    /// Drops the last numeric segment and increments the one before it:
    /// `1.2.3` bumps to `1.3`, `1.2` bumps to `2`. Prerelease tails are
    /// ignored, so `5.2.4.a` bumps to `5.3`.
    pub fn bump(&self) -> GemVersion {
        let mut numbers: Vec<u64> = self
            .segments
            .iter()
            .map_while(|s| match s {
                Segment::Numeric(n) => Some(*n),
                Segment::Text(_) => None,
            })
            .collect();
        if numbers.is_empty() {
            numbers.push(0);
        }
        if numbers.len() > 1 {
            numbers.pop();
        }
        if let Some(last) = numbers.last_mut() {
            *last += 1;
        }
        let text = numbers
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        GemVersion::parse(&text)
    }
}

impl fmt::Display for GemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for GemVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GemVersion {}

impl Ord for GemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let ord = compare_segments(self.segments.get(i), other.segments.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        // A textual tail marks a prerelease, which sorts before the release
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
    }
}

/// Split on `.` and `-`, and at letter/digit boundaries within a token,
/// so `1.0.beta2` yields `[1, 0, "beta", 2]`.
fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        let boundary = ch == '.'
            || ch == '-'
            || (ch.is_ascii_digit() && current.chars().next_back().is_some_and(|p| p.is_ascii_alphabetic()))
            || (ch.is_ascii_alphabetic() && current.chars().next_back().is_some_and(|p| p.is_ascii_digit()));
        if boundary {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
        }
        if ch != '.' && ch != '-' {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    match token.parse::<u64>() {
        Ok(n) => Segment::Numeric(n),
        Err(_) => Segment::Text(token.to_lowercase()),
    }
}

/// Comparison operator of a version requirement.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    /// The pessimistic operator `~>`.
    Pessimistic,
}

/// A single version-comparison constraint, e.g. `>= 1.2` or `~> 2.0`.
#[derive(Debug, Clone)]
pub struct Requirement {
    pub op: Op,
    pub version: GemVersion,
}

impl Requirement {
    /// Parse a single constraint. A bare version means exact equality.
    pub fn parse(requirement: &str) -> Result<Self, GemorderError> {
        let text = requirement.trim();
        let (op, rest) = if let Some(rest) = text.strip_prefix(">=") {
            (Op::Ge, rest)
        } else if let Some(rest) = text.strip_prefix("<=") {
            (Op::Le, rest)
        } else if let Some(rest) = text.strip_prefix("!=") {
            (Op::Ne, rest)
        } else if let Some(rest) = text.strip_prefix("~>") {
            (Op::Pessimistic, rest)
        } else if let Some(rest) = text.strip_prefix('=') {
            (Op::Eq, rest)
        } else if let Some(rest) = text.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = text.strip_prefix('<') {
            (Op::Lt, rest)
        } else {
            (Op::Eq, text)
        };

        let rest = rest.trim();
        if rest.is_empty() || !rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(GemorderError::InvalidRequirement {
                requirement: requirement.to_string(),
            });
        }

        Ok(Self {
            op,
            version: GemVersion::parse(rest),
        })
    }

    /// Check whether a concrete version satisfies this constraint.
    pub fn satisfied_by(&self, version: &GemVersion) -> bool {
        match self.op {
            Op::Eq => version == &self.version,
            Op::Ne => version != &self.version,
            Op::Gt => version > &self.version,
            Op::Lt => version < &self.version,
            Op::Ge => version >= &self.version,
            Op::Le => version <= &self.version,
            Op::Pessimistic => version >= &self.version && version < &self.version.bump(),
        }
    }
}

/// Flatten requirement inputs into the canonical comma-free list form.
///
/// Each element may itself be a combined comma-separated string; spaces
/// are stripped and duplicates dropped while preserving first-seen order.
pub fn normalize_requirements<S: AsRef<str>>(requirements: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for requirement in requirements {
        let compact = requirement.as_ref().replace(' ', "");
        for part in compact.split(',') {
            if !part.is_empty() && !normalized.iter().any(|r| r == part) {
                normalized.push(part.to_string());
            }
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        assert!(GemVersion::parse("1.0") < GemVersion::parse("2.0"));
        assert!(GemVersion::parse("1.0.1") < GemVersion::parse("1.1.0"));
        assert!(GemVersion::parse("0.9.9") < GemVersion::parse("0.10.0"));
    }

    #[test]
    fn trailing_zeros_equal() {
        assert_eq!(GemVersion::parse("1.0"), GemVersion::parse("1.0.0"));
        assert_eq!(GemVersion::parse("2"), GemVersion::parse("2.0.0.0"));
    }

    #[test]
    fn prerelease_before_release() {
        assert!(GemVersion::parse("1.0.beta") < GemVersion::parse("1.0"));
        assert!(GemVersion::parse("1.0.a1") < GemVersion::parse("1.0"));
        assert!(GemVersion::parse("1.0.beta1") < GemVersion::parse("1.0.beta2"));
        assert!(GemVersion::parse("1.0.beta2").is_prerelease());
        assert!(!GemVersion::parse("1.0.2").is_prerelease());
    }

    #[test]
    fn letter_digit_boundary_splits() {
        // 1.0.beta2 and 1.0.beta10 must compare numerically on the tail
        assert!(GemVersion::parse("1.0.beta2") < GemVersion::parse("1.0.beta10"));
    }

    #[test]
    fn bump_drops_last_segment() {
        assert_eq!(GemVersion::parse("1.2.3").bump(), GemVersion::parse("1.3"));
        assert_eq!(GemVersion::parse("1.2").bump(), GemVersion::parse("2"));
        assert_eq!(GemVersion::parse("1").bump(), GemVersion::parse("2"));
        assert_eq!(GemVersion::parse("5.2.4.a").bump(), GemVersion::parse("5.3"));
    }

    #[test]
    fn requirement_operators() {
        let v = GemVersion::parse("1.5");
        assert!(Requirement::parse(">= 1.0").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("<=1.5").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("> 1.4").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("<2.0").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("!= 1.4").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("= 1.5").unwrap().satisfied_by(&v));
        assert!(Requirement::parse("1.5").unwrap().satisfied_by(&v));
        assert!(!Requirement::parse("> 1.5").unwrap().satisfied_by(&v));
        assert!(!Requirement::parse("1.4").unwrap().satisfied_by(&v));
    }

    #[test]
    fn pessimistic_operator() {
        let req = Requirement::parse("~> 1.2").unwrap();
        assert!(req.satisfied_by(&GemVersion::parse("1.2")));
        assert!(req.satisfied_by(&GemVersion::parse("1.9.9")));
        assert!(!req.satisfied_by(&GemVersion::parse("2.0")));
        assert!(!req.satisfied_by(&GemVersion::parse("1.1")));

        let req = Requirement::parse("~> 1.2.3").unwrap();
        assert!(req.satisfied_by(&GemVersion::parse("1.2.3")));
        assert!(req.satisfied_by(&GemVersion::parse("1.2.9")));
        assert!(!req.satisfied_by(&GemVersion::parse("1.3.0")));
    }

    #[test]
    fn invalid_requirements_rejected() {
        assert!(Requirement::parse("").is_err());
        assert!(Requirement::parse(">=").is_err());
        assert!(Requirement::parse("~> banana").is_err());
    }

    #[test]
    fn normalize_splits_and_dedups() {
        let reqs = vec![">= 1.0, < 2.0".to_string(), ">=1.0".to_string()];
        assert_eq!(normalize_requirements(&reqs), vec![">=1.0", "<2.0"]);
    }

    #[test]
    fn normalize_drops_empty_parts() {
        let reqs = vec![", >= 1.0,".to_string()];
        assert_eq!(normalize_requirements(&reqs), vec![">=1.0"]);
        assert!(normalize_requirements::<String>(&[]).is_empty());
    }

    #[test]
    fn display_preserves_original() {
        assert_eq!(GemVersion::parse("1.8.0").to_string(), "1.8.0");
    }
}
