use regex::Regex;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Tag pattern
// ---------------------------------------------------------------------------

static VERSION_TAG_RE: OnceLock<Regex> = OnceLock::new();

fn version_tag_re() -> &'static Regex {
    VERSION_TAG_RE.get_or_init(|| {
        Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)(?:[-+][0-9A-Za-z.+\-]*)?$").unwrap()
    })
}

/// Whether `tag` looks like `v1.2.3` / `1.2.3`, with an optional
/// pre-release or build suffix.
pub fn is_version_tag(tag: &str) -> bool {
    version_tag_re().is_match(tag)
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Parse the numeric core of a version tag. Returns `None` when the tag
    /// does not match the pattern or a component overflows.
    pub fn parse(tag: &str) -> Option<Version> {
        let caps = version_tag_re().captures(tag)?;
        Some(Version {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Rank for a tag already known to match the pattern. Tags that match but
/// still fail to parse sort as `0.0.0`.
fn rank(tag: &str) -> Version {
    Version::parse(tag).unwrap_or_else(|| {
        tracing::debug!(tag, "version tag failed to parse, ranking as 0.0.0");
        Version::ZERO
    })
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Version-like tags from `tags`, newest first. Other tags are dropped.
/// Tags with equal versions keep their input order.
pub fn sort_versions<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut versions: Vec<&str> = tags
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| is_version_tag(t))
        .collect();
    versions.sort_by_cached_key(|t| Reverse(rank(t)));
    versions.into_iter().map(str::to_string).collect()
}

/// The newest version-like tag, if any.
pub fn latest_version<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    sort_versions(tags).into_iter().next()
}
