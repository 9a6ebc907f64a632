//! Distribution version type.
//!
//! Provides a Version type for three-part numeric distribution versions
//! (`0.0.4`) with optional prerelease and build components. Versions are
//! serialized as their string form, so manifests read `version = "0.0.4"`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Distribution version (major.minor.patch-prerelease+build)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Version parsing and validation errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Get the precedence for comparison (ignores build metadata)
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => {
                match (&self.prerelease, &other.prerelease) {
                    (None, None) => Ordering::Equal,
                    (Some(_), None) => Ordering::Less, // prerelease < release
                    (None, Some(_)) => Ordering::Greater,
                    (Some(a), Some(b)) => a.cmp(b), // lexical comparison
                }
            },
            other => other,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        // Split on '+' for build metadata
        let (version_part, build) = match input.split_once('+') {
            Some((v, b)) => (v, Some(b.to_string())),
            None => (input, None),
        };

        // Split on '-' for prerelease
        let (core_part, prerelease) = match version_part.split_once('-') {
            Some((c, p)) => (c, Some(p.to_string())),
            None => (version_part, None),
        };

        // Parse major.minor.patch
        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let major = parts[0].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[0].to_string(),
        })?;
        let minor = parts[1].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[1].to_string(),
        })?;
        let patch = parts[2].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[2].to_string(),
        })?;

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("0.0.4").unwrap();
        assert_eq!(v.major, 0);
        assert_eq!(v.minor, 0);
        assert_eq!(v.patch, 4);
        assert_eq!(v.prerelease, None);
        assert_eq!(v.build, None);
    }

    #[test]
    fn test_version_with_prerelease() {
        let v = Version::from_str("1.2.3-alpha.1").unwrap();
        assert_eq!(v.prerelease, Some("alpha.1".to_string()));
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_version_with_build() {
        let v = Version::from_str("1.2.3+build.1").unwrap();
        assert_eq!(v.build, Some("build.1".to_string()));
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(Version::from_str("1.2").is_err());
        assert!(Version::from_str("1.2.3.4").is_err());
        assert!(Version::from_str("a.b.c").is_err());
        assert!(Version::from_str("").is_err());
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");

        let v = Version {
            major: 1,
            minor: 2,
            patch: 3,
            prerelease: Some("alpha".to_string()),
            build: Some("build".to_string()),
        };
        assert_eq!(v.to_string(), "1.2.3-alpha+build");
    }

    #[test]
    fn test_version_comparison() {
        let v1 = Version::new(1, 0, 0);
        let v2 = Version::new(2, 0, 0);
        let v3 = Version::new(1, 1, 0);

        assert!(v1 < v2);
        assert!(v1 < v3);
        assert!(v3 < v2);

        // prerelease sorts below its release
        let pre = Version::from_str("1.0.0-rc.1").unwrap();
        assert!(pre < v1);
    }

    #[test]
    fn test_serde_string_form() {
        let v = Version::new(0, 0, 4);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"0.0.4\"");

        let parsed: Version = serde_json::from_str("\"1.2.3-beta\"").unwrap();
        assert_eq!(parsed.prerelease, Some("beta".to_string()));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn version_round_trip(
            major in 0u64..1000,
            minor in 0u64..1000,
            patch in 0u64..1000,
            prerelease in prop::option::of("[a-zA-Z0-9.]+"),
            build in prop::option::of("[a-zA-Z0-9.]+")
        ) {
            let original = Version {
                major,
                minor,
                patch,
                prerelease: prerelease.clone(),
                build: build.clone(),
            };

            let serialized = original.to_string();
            let parsed = Version::from_str(&serialized).unwrap();

            prop_assert_eq!(parsed, original);
        }
    }

    proptest! {
        #[test]
        fn version_comparison_transitivity(
            a_major in 0u64..100,
            a_minor in 0u64..100,
            a_patch in 0u64..100,
            b_major in 0u64..100,
            b_minor in 0u64..100,
            b_patch in 0u64..100,
            c_major in 0u64..100,
            c_minor in 0u64..100,
            c_patch in 0u64..100,
        ) {
            let a = Version::new(a_major, a_minor, a_patch);
            let b = Version::new(b_major, b_minor, b_patch);
            let c = Version::new(c_major, c_minor, c_patch);

            if a < b && b < c {
                prop_assert!(a < c);
            }

            if a > b && b > c {
                prop_assert!(a > c);
            }
        }
    }
}
