//! Dotted numeric version comparison.
//!
//! Versions are sequences of non-negative integers separated by `.`. Missing
//! trailing components count as zero, so `1.0` and `1.0.0` are equal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid component '{component}' in version '{version}'")]
    InvalidComponent { version: String, component: String },
}

#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let components = s
            .split('.')
            .map(|component| {
                // `u64::from_str` accepts a leading `+`, which is not a digit
                if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(s, component));
                }
                component.parse::<u64>().map_err(|_| invalid(s, component))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }
}

fn invalid(version: &str, component: &str) -> VersionError {
    VersionError::InvalidComponent {
        version: version.to_string(),
        component: component.to_string(),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Compare two version strings.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    Ok(a.parse::<Version>()?.cmp(&b.parse::<Version>()?))
}

/// Whether `installed` is strictly older than `latest`.
pub fn is_out_of_date(installed: &str, latest: &str) -> Result<bool, VersionError> {
    Ok(compare(installed, latest)? == Ordering::Less)
}
