//! Path pattern matching.
//!
//! # Responsibilities
//! - Join the API prefix and a route pattern
//! - Compile the result into a fully anchored regex
//! - Extract capture groups from a matching path
//!
//! # Design Decisions
//! - The whole pattern is wrapped in `^(?:...)$` so alternations cannot
//!   escape the anchors; capture group numbering is unchanged
//! - Path matching is case-sensitive
//! - Unmatched optional groups capture as empty strings

use regex::Regex;

use crate::routing::params::PathParams;

/// A compiled, anchored route path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `prefix + pattern`. A single trailing slash on the prefix is
    /// dropped so `"/v1/"` and `"/v1"` behave the same.
    pub fn compile(prefix: &str, pattern: &str) -> Result<Self, regex::Error> {
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
        let source = format!("{}{}", prefix, pattern);
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    /// The uncompiled pattern, prefix included.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Returns the capture groups if `path` matches the whole pattern.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let values = caps
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_owned()).unwrap_or_default())
            .collect();
        Some(PathParams::new(values))
    }
}
