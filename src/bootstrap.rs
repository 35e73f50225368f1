//! Optional runtime detection from a user-agent string.
//!
//! The core never detects its runtime; hosts that have no better source of
//! truth can derive a [`RuntimeIdentity`] here and attach their namespace
//! with [`RuntimeIdentity::with_namespace`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::runtime::RuntimeIdentity;

struct Signature {
    name: &'static str,
    title: &'static str,
    promises_native: bool,
    pattern: Regex,
}

// Order matters: Edge and Opera user agents also carry a Chrome token.
static SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    [
        ("firefox", "Firefox", true, r"Firefox/(\d[\w.]*)"),
        ("edge", "Edge", false, r"Edg(?:e|A|iOS)?/(\d[\w.]*)"),
        ("opera", "Opera", false, r"OPR/(\d[\w.]*)"),
        ("chrome", "Chrome", false, r"Chrom(?:e|ium)/(\d[\w.]*)"),
        ("safari", "Safari", false, r"Version/(\d[\w.]*).*Safari/"),
    ]
    .into_iter()
    .filter_map(|(name, title, promises_native, pattern)| {
        Regex::new(pattern).ok().map(|pattern| Signature {
            name,
            title,
            promises_native,
            pattern,
        })
    })
    .collect()
});

/// Identify the runtime a user agent belongs to. No namespace is attached.
pub fn detect_runtime(user_agent: &str) -> Option<RuntimeIdentity> {
    SIGNATURES.iter().find_map(|sig| {
        let version = sig.pattern.captures(user_agent)?.get(1)?.as_str();
        Some(
            RuntimeIdentity::builder(sig.name)
                .title(sig.title)
                .version(version)
                .promises_native(sig.promises_native)
                .build(),
        )
    })
}
