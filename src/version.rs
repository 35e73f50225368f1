//! Dotted version comparison.
//!
//! Runtime versions ("54.0", "115.0.2", "120.0.6099.109") are compared against
//! the minimum versions recorded in a support descriptor ("56", "57.0a1").

use std::cmp::Ordering;

/// Compares dotted version identifiers segment by segment.
///
/// - Each segment splits into a leading run of digits and a trailing tag.
/// - Digits compare numerically (arbitrary length, leading zeros ignored).
/// - Tags compare lexically once the digits are equal; an untagged segment
///   sorts after a tagged one, so "57.0a1" < "57.0".
/// - A segment without leading digits is malformed and sorts before every
///   well-formed segment.
/// - Missing trailing segments count as "0", so "56" == "56.0".
pub struct VersionComparator;

impl VersionComparator {
    pub fn compare(a: &str, b: &str) -> Ordering {
        let left = Self::segments(a);
        let right = Self::segments(b);
        let len = left.len().max(right.len());

        for i in 0..len {
            let l = left.get(i).copied().unwrap_or(Segment::ZERO);
            let r = right.get(i).copied().unwrap_or(Segment::ZERO);
            match l.cmp(&r) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// `-1`, `0` or `1`.
    pub fn compare_signum(a: &str, b: &str) -> i8 {
        Self::compare(a, b) as i8
    }

    /// True when `actual` is at least `minimum`.
    pub fn satisfies(actual: &str, minimum: &str) -> bool {
        Self::compare(actual, minimum) != Ordering::Less
    }

    fn segments(version: &str) -> Vec<Segment<'_>> {
        version
            .trim()
            .split('.')
            .filter(|s| !s.is_empty())
            .map(Segment::parse)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Numeric { digits: &'a str, tag: &'a str },
    Malformed(&'a str),
}

impl<'a> Segment<'a> {
    const ZERO: Segment<'static> = Segment::Numeric { digits: "0", tag: "" };

    fn parse(raw: &'a str) -> Self {
        let split = raw
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(raw.len());
        if split == 0 {
            return Segment::Malformed(raw);
        }
        let digits = raw[..split].trim_start_matches('0');
        Segment::Numeric {
            digits: if digits.is_empty() { "0" } else { digits },
            tag: &raw[split..],
        }
    }
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Malformed(a), Segment::Malformed(b)) => a.cmp(b),
            (Segment::Malformed(_), Segment::Numeric { .. }) => Ordering::Less,
            (Segment::Numeric { .. }, Segment::Malformed(_)) => Ordering::Greater,
            (
                Segment::Numeric { digits: da, tag: ta },
                Segment::Numeric { digits: db, tag: tb },
            ) => da
                .len()
                .cmp(&db.len())
                .then_with(|| da.cmp(db))
                .then_with(|| match (ta.is_empty(), tb.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => ta.cmp(tb),
                }),
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
