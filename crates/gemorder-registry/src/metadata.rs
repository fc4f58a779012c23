//! Parsing of `gem dependency` output into per-version release records.
//!
//! The output is a sequence of per-version blocks:
//!
//! ```text
//! Gem rails-7.0.4
//!   actioncable (= 7.0.4)
//!   rake (>= 12.2, development)
//!
//! Gem rails-7.0.8
//!   ...
//! ```
//!
//! A block opens with a `Gem <name>-<version>` header. Blocks for the
//! requested gem are emitted first and contiguously, so a header for any
//! other gem terminates the scan. The parser is a small line-oriented
//! state machine so it can be tested without the `gem` tool.

use std::collections::BTreeMap;

use crate::version::normalize_requirements;

/// One concrete version of a gem together with its declared dependencies,
/// each mapped to the list of version requirement strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemRelease {
    pub version: String,
    pub deps: BTreeMap<String, Vec<String>>,
}

enum ParserState {
    /// Waiting for the first header of the requested gem.
    Searching,
    /// Collecting dependency lines for a known version.
    InBlock(GemRelease),
}

/// Parse the full text output of `gem dependency <gem_name>`.
///
/// Returns one [`GemRelease`] per block found for `gem_name`, in output
/// order. When `runtime_deps_only` is set, dependency lines whose version
/// spec carries the `development` marker are skipped; otherwise the line
/// is kept but the marker itself is stripped from the requirement list.
pub fn parse_dependency_output(
    gem_name: &str,
    output: &str,
    runtime_deps_only: bool,
) -> Vec<GemRelease> {
    let mut releases = Vec::new();
    let mut state = ParserState::Searching;

    for line in output.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("Gem ") {
            match parse_header(gem_name, rest) {
                Some(version) => {
                    if let ParserState::InBlock(release) = state {
                        releases.push(release);
                    }
                    state = ParserState::InBlock(GemRelease {
                        version: version.to_string(),
                        deps: BTreeMap::new(),
                    });
                    continue;
                }
                // The requested gem's blocks come first; a header for any
                // other gem means we have seen everything relevant.
                None => break,
            }
        }

        let release = match state {
            ParserState::Searching => continue,
            ParserState::InBlock(ref mut release) => release,
        };

        if let Some((dep_name, spec)) = parse_dep_line(line) {
            if runtime_deps_only && spec.contains("development") {
                continue;
            }
            // The marker classifies the dependency; it is not a version
            // requirement and must never reach the requirement parser.
            let requirements: Vec<String> = normalize_requirements(&[spec])
                .into_iter()
                .filter(|requirement| requirement.as_str() != "development")
                .collect();
            release.deps.insert(dep_name.to_string(), requirements);
        }
    }

    if let ParserState::InBlock(release) = state {
        releases.push(release);
    }

    releases
}

/// Match `<name>-<version>` against the requested gem name. The version
/// must start with a digit so hyphenated gem names do not split early.
fn parse_header<'a>(gem_name: &str, rest: &'a str) -> Option<&'a str> {
    let version = rest.strip_prefix(gem_name)?.strip_prefix('-')?;
    if version.starts_with(|c: char| c.is_ascii_digit()) {
        Some(version)
    } else {
        None
    }
}

/// Match a dependency line of the form `<name> (<version specs>)`.
fn parse_dep_line(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_suffix(')')?;
    let (name, spec) = inner.rsplit_once('(')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, spec.trim()))
}
