//! Dot-notation member paths
//!
//! A member path addresses a node in either the live namespace graph
//! (e.g. "tabs.onUpdated.addListener") or the support descriptor
//! (e.g. "declarativeContent.onPageChanged.__compat").

use std::fmt;

/// Ordered sequence of dotted segments.
///
/// Empty segments are dropped while parsing, so "tabs..query" and "tabs.query"
/// address the same member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MemberPath {
    segments: Vec<String>,
}

impl MemberPath {
    /// Parse a dotted path; a leading "$." (JSONPath style) is ignored.
    pub fn parse(path: &str) -> Self {
        let normalized = path.trim().trim_start_matches("$.");
        Self {
            segments: normalized
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, i.e. the member name itself.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// New path with `head` inserted as the first segment.
    pub fn prefixed(&self, head: &str) -> Self {
        let mut path = MemberPath::parse(head);
        path.segments.extend(self.segments.iter().cloned());
        path
    }

    /// Every strict prefix followed by the full path, shortest first.
    ///
    /// "a.b.c" yields "a", "a.b", "a.b.c".
    pub fn prefixes(&self) -> impl Iterator<Item = MemberPath> + '_ {
        (1..=self.segments.len()).map(move |n| MemberPath {
            segments: self.segments[..n].to_vec(),
        })
    }

    /// True when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &MemberPath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for MemberPath {
    fn from(path: &str) -> Self {
        MemberPath::parse(path)
    }
}
