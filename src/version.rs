// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version specifiers and resolved versions for Deno releases
//!
//! This module parses caller-supplied specifiers (exact versions, node-style
//! ranges and the rolling `nightly` alias) and provides the resolved version
//! type consumed by the rest of the pipeline.

use std::fmt;

use semver::{Version, VersionReq};

use crate::error::{Result, SetupError};

/// Specifier that always selects the latest rolling build
pub const NIGHTLY: &str = "nightly";

/// A fully resolved version: a concrete release or the rolling build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    Release(Version),
    Nightly,
}

impl ResolvedVersion {
    /// Version string used in cache keys and logs (no tag prefix)
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn is_nightly(&self) -> bool {
        matches!(self, Self::Nightly)
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release(v) => write!(f, "{v}"),
            Self::Nightly => f.write_str(NIGHTLY),
        }
    }
}

/// Strip a leading tag marker (`v` or `=`) and surrounding whitespace
///
/// # Examples
/// ```
/// use setup_deno::version::strip_tag_prefix;
/// assert_eq!(strip_tag_prefix("v1.2.3"), "1.2.3");
/// assert_eq!(strip_tag_prefix("=1.2.3"), "1.2.3");
/// assert_eq!(strip_tag_prefix("1.2.3"), "1.2.3");
/// ```
#[must_use]
pub fn strip_tag_prefix(version: &str) -> &str {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed)
}

/// Parse a fully-qualified version, tolerating a leading tag marker
///
/// Returns `None` for partial versions such as "1.2" or for ranges.
///
/// # Examples
/// ```
/// use setup_deno::version::parse_exact;
/// assert_eq!(parse_exact("v0.38.0").map(|v| v.to_string()), Some("0.38.0".to_string()));
/// assert!(parse_exact("1.2").is_none());
/// assert!(parse_exact("1.x").is_none());
/// ```
#[must_use]
pub fn parse_exact(specifier: &str) -> Option<Version> {
    Version::parse(strip_tag_prefix(specifier)).ok()
}

/// A node-style version range evaluated with `semver`
///
/// Alternatives separated by `||` match if any of them matches. Inside an
/// alternative, comparators separated by whitespace or commas must all match.
/// Bare partial versions ("1", "1.2") mean "any version with that prefix",
/// unlike Cargo where they imply a caret.
#[derive(Debug, Clone)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range expression
    ///
    /// # Errors
    /// Returns `InvalidSpecifier` if any alternative is not a valid range
    pub fn parse(specifier: &str) -> Result<Self> {
        let invalid = |reason: String| SetupError::InvalidSpecifier {
            specifier: specifier.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for alternative in specifier.split("||") {
            let translated = translate_alternative(alternative)
                .ok_or_else(|| invalid("empty range alternative".to_string()))?;
            let req = VersionReq::parse(&translated).map_err(|e| invalid(e.to_string()))?;
            alternatives.push(req);
        }

        Ok(Self { alternatives })
    }

    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

/// Rewrite one node-style alternative into the comma-separated syntax of `semver`
fn translate_alternative(alternative: &str) -> Option<String> {
    let tokens: Vec<&str> = alternative
        .split([' ', '\t', ','])
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return None;
    }

    // Hyphen range: "1.2.3 - 2.0.0" is inclusive on both ends
    if let [low, "-", high] = tokens.as_slice() {
        return Some(format!(
            ">={}, <={}",
            strip_tag_prefix(low),
            strip_tag_prefix(high)
        ));
    }

    // An operator may be written apart from its version (">= 1.0.0")
    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in tokens {
        if token.chars().all(is_operator_char) {
            pending_op = Some(token);
            continue;
        }
        let comparator = match pending_op.take() {
            Some(op) => translate_comparator(&format!("{op}{token}")),
            None => translate_comparator(token),
        };
        comparators.push(comparator);
    }
    if let Some(op) = pending_op {
        comparators.push(op.to_string());
    }
    Some(comparators.join(", "))
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '^' | '~')
}

fn translate_comparator(token: &str) -> String {
    let op_len = token
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(op_len);
    let version = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);

    if !op.is_empty() {
        return format!("{op}{version}");
    }

    // Without an operator semver would read "1.2" and "1.2.3" as caret requirements
    let has_wildcard = version
        .split(['.', '-', '+'])
        .any(|part| matches!(part, "x" | "X" | "*"));
    if has_wildcard {
        version.to_string()
    } else {
        format!("={version}")
    }
}

/// What a caller-supplied specifier asks for
#[derive(Debug, Clone)]
pub enum VersionSpecifier {
    /// The rolling build alias
    Nightly,
    /// A fully-qualified version
    Exact(Version),
    /// A partial version or range expression to match against the catalog
    Range(VersionRange),
}

impl VersionSpecifier {
    /// Classify a raw specifier
    ///
    /// # Errors
    /// Returns `InvalidSpecifier` for empty input or an unparseable range
    pub fn parse(specifier: &str) -> Result<Self> {
        let trimmed = specifier.trim();
        if trimmed.is_empty() {
            return Err(SetupError::InvalidSpecifier {
                specifier: specifier.to_string(),
                reason: "version must not be empty".to_string(),
            });
        }

        if trimmed == NIGHTLY {
            return Ok(Self::Nightly);
        }

        if let Some(version) = parse_exact(trimmed) {
            return Ok(Self::Exact(version));
        }

        VersionRange::parse(trimmed).map(Self::Range)
    }
}
