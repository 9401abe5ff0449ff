//! Dotted numeric version parsing and comparison.

use std::cmp::Ordering;
use std::fmt;

/// One numeric component of a version, of any length.
///
/// Stored as its decimal digits without leading zeros, so numbers beyond
/// `u64` compare by digit count first and then by text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionComponent(String);

impl VersionComponent {
    fn parse(part: &str) -> Option<Self> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = part.trim_start_matches('0');
        Some(Self(if digits.is_empty() { "0" } else { digits }.to_string()))
    }

    /// Returns the canonical decimal digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value when it fits in a `u64`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for VersionComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for VersionComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version parsed from a dot-separated string such as `"4.2.0"`.
///
/// Ordering is lexicographic over the components, so a shorter version that
/// agrees on the shared prefix is the smaller one: `1.2 < 1.2.1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple(Vec<VersionComponent>);

impl VersionTuple {
    /// Parses a dotted version string.
    ///
    /// Surrounding whitespace is ignored. Every component must be a
    /// non-empty run of ASCII digits; anything else yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use extdoctor_core::VersionTuple;
    ///
    /// let v = VersionTuple::parse("4.2.0").unwrap();
    /// assert_eq!(v.to_string(), "4.2.0");
    ///
    /// assert!(VersionTuple::parse("").is_none());
    /// assert!(VersionTuple::parse("4.x").is_none());
    /// assert!(VersionTuple::parse("4.2.").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        value
            .split('.')
            .map(VersionComponent::parse)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Returns the components.
    #[must_use]
    pub fn components(&self) -> &[VersionComponent] {
        &self.0
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

/// Parses a dotted version string. See [`VersionTuple::parse`].
#[must_use]
pub fn parse_version(value: &str) -> Option<VersionTuple> {
    VersionTuple::parse(value)
}

/// Compares two versions lexicographically.
#[must_use]
pub fn compare(a: &VersionTuple, b: &VersionTuple) -> Ordering {
    a.cmp(b)
}
