//! Dependency requirement specifiers.
//!
//! A requirement names a distribution the package needs at runtime, with an
//! optional version constraint and optional extras: `pymongo`,
//! `pymongo>=3.11.0`, `pymongo[srv]~=3.11`. Requirements are serialized as
//! their string form.

use super::version::Version;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Runtime dependency specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub constraint: Option<Constraint>,
}

/// Version constraint attached to a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
}

/// Comparison operator for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Exact,      // ==3.11.0
    Greater,    // >3.11.0
    GreaterEq,  // >=3.11.0
    Less,       // <4.0.0
    LessEq,     // <=3.11.0
    Compatible, // ~=3.11
}

/// Requirement parsing errors
#[derive(Error, Debug)]
pub enum RequirementError {
    #[error("Invalid requirement: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid distribution name: {name}")]
    InvalidName { name: String },

    #[error("Invalid extra name: {extra}")]
    InvalidExtra { extra: String },

    #[error("Invalid constraint version: {version}")]
    InvalidVersion { version: String },

    #[error("Compatible-release constraint needs at least two version components: {input}")]
    CompatibleNeedsMinor { input: String },
}

impl Requirement {
    /// Create an unconstrained requirement
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extras: Vec::new(),
            constraint: None,
        }
    }

    /// Check if a distribution name is valid (index naming rules)
    pub fn is_valid_name(name: &str) -> bool {
        if name.is_empty() || name.len() > 214 {
            return false;
        }

        let first = name.chars().next().unwrap_or(' ');
        let last = name.chars().last().unwrap_or(' ');
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }

    /// Check if an installed version would satisfy this requirement
    pub fn matches(&self, version: &Version) -> bool {
        match &self.constraint {
            Some(constraint) => constraint.matches(version),
            None => true,
        }
    }
}

impl Constraint {
    /// Convert to a full version (filling missing parts with 0)
    fn floor_version(&self) -> Version {
        Version::new(self.major, self.minor.unwrap_or(0), self.patch.unwrap_or(0))
    }

    /// Check if a version matches this constraint
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            ConstraintOp::Exact => {
                version.major == self.major
                    && self.minor.map_or(true, |m| version.minor == m)
                    && self.patch.map_or(true, |p| version.patch == p)
            },
            ConstraintOp::Greater => version > &self.floor_version(),
            ConstraintOp::GreaterEq => version >= &self.floor_version(),
            ConstraintOp::Less => version < &self.floor_version(),
            ConstraintOp::LessEq => version <= &self.floor_version(),
            ConstraintOp::Compatible => self.matches_compatible(version),
        }
    }

    /// Compatible release: ~=X.Y allows >=X.Y <X+1.0, ~=X.Y.Z allows >=X.Y.Z <X.Y+1
    fn matches_compatible(&self, version: &Version) -> bool {
        if version < &self.floor_version() {
            return false;
        }

        match self.patch {
            Some(_) => {
                version.major == self.major && Some(version.minor) == self.minor
            },
            None => version.major == self.major,
        }
    }
}

impl ConstraintOp {
    fn as_str(&self) -> &'static str {
        match self {
            ConstraintOp::Exact => "==",
            ConstraintOp::Greater => ">",
            ConstraintOp::GreaterEq => ">=",
            ConstraintOp::Less => "<",
            ConstraintOp::LessEq => "<=",
            ConstraintOp::Compatible => "~=",
        }
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(RequirementError::InvalidFormat {
                input: input.to_string(),
            });
        }

        // Split off the constraint at the first operator character
        let op_start = input.find(|c| matches!(c, '=' | '>' | '<' | '~'));
        let (name_part, constraint) = match op_start {
            Some(idx) => {
                let (name, op_str) = input.split_at(idx);
                (name.trim(), Some(parse_constraint(op_str.trim(), input)?))
            },
            None => (input, None),
        };

        // Split off extras: name[extra1,extra2]
        let (name, extras) = match name_part.split_once('[') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(']').ok_or_else(|| {
                    RequirementError::InvalidFormat {
                        input: input.to_string(),
                    }
                })?;
                let extras: Vec<String> = inner
                    .split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect();

                for extra in &extras {
                    if !Requirement::is_valid_name(extra) {
                        return Err(RequirementError::InvalidExtra {
                            extra: extra.clone(),
                        });
                    }
                }

                (name.trim(), extras)
            },
            None => (name_part, Vec::new()),
        };

        if !Requirement::is_valid_name(name) {
            return Err(RequirementError::InvalidName {
                name: name.to_string(),
            });
        }

        Ok(Requirement {
            name: name.to_string(),
            extras,
            constraint,
        })
    }
}

/// Parse an operator-prefixed constraint (`>=3.11.0`)
fn parse_constraint(s: &str, full_input: &str) -> Result<Constraint, RequirementError> {
    let (op, version_str) = if let Some(stripped) = s.strip_prefix("==") {
        (ConstraintOp::Exact, stripped)
    } else if let Some(stripped) = s.strip_prefix("~=") {
        (ConstraintOp::Compatible, stripped)
    } else if let Some(stripped) = s.strip_prefix(">=") {
        (ConstraintOp::GreaterEq, stripped)
    } else if let Some(stripped) = s.strip_prefix("<=") {
        (ConstraintOp::LessEq, stripped)
    } else if let Some(stripped) = s.strip_prefix(">") {
        (ConstraintOp::Greater, stripped)
    } else if let Some(stripped) = s.strip_prefix("<") {
        (ConstraintOp::Less, stripped)
    } else {
        return Err(RequirementError::InvalidFormat {
            input: full_input.to_string(),
        });
    };

    let version_str = version_str.trim();
    let parts: Vec<&str> = version_str.split('.').collect();
    if parts.is_empty() || parts.len() > 3 || version_str.is_empty() {
        return Err(RequirementError::InvalidVersion {
            version: version_str.to_string(),
        });
    }

    let parse_component = |c: &str| -> Result<u64, RequirementError> {
        c.parse().map_err(|_| RequirementError::InvalidVersion {
            version: version_str.to_string(),
        })
    };

    let major = parse_component(parts[0])?;
    let minor = parts.get(1).map(|c| parse_component(c)).transpose()?;
    let patch = parts.get(2).map(|c| parse_component(c)).transpose()?;

    if op == ConstraintOp::Compatible && minor.is_none() {
        return Err(RequirementError::CompatibleNeedsMinor {
            input: full_input.to_string(),
        });
    }

    Ok(Constraint {
        op,
        major,
        minor,
        patch,
    })
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }

        if let Some(ref constraint) = self.constraint {
            write!(f, "{}", constraint)?;
        }

        Ok(())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.major)?;

        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }

        Ok(())
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        let req: Requirement = "pymongo".parse().unwrap();
        assert_eq!(req.name, "pymongo");
        assert!(req.extras.is_empty());
        assert!(req.constraint.is_none());
        assert!(req.matches(&Version::new(3, 11, 0)));
    }

    #[test]
    fn test_constrained_requirement() {
        let req: Requirement = "pymongo>=3.11.0".parse().unwrap();
        assert_eq!(req.name, "pymongo");

        let constraint = req.constraint.as_ref().unwrap();
        assert_eq!(constraint.op, ConstraintOp::GreaterEq);
        assert_eq!(constraint.major, 3);
        assert_eq!(constraint.minor, Some(11));
        assert_eq!(constraint.patch, Some(0));

        assert!(req.matches(&Version::new(3, 11, 0)));
        assert!(req.matches(&Version::new(4, 0, 0)));
        assert!(!req.matches(&Version::new(3, 10, 9)));
    }

    #[test]
    fn test_extras() {
        let req: Requirement = "pymongo[srv,tls]>=3.6".parse().unwrap();
        assert_eq!(req.extras, vec!["srv".to_string(), "tls".to_string()]);
        assert_eq!(req.to_string(), "pymongo[srv,tls]>=3.6");
    }

    #[test]
    fn test_compatible_release() {
        let req: Requirement = "pymongo~=3.11".parse().unwrap();
        assert!(req.matches(&Version::new(3, 11, 0)));
        assert!(req.matches(&Version::new(3, 12, 4)));
        assert!(!req.matches(&Version::new(4, 0, 0)));
        assert!(!req.matches(&Version::new(3, 10, 0)));

        let req: Requirement = "pymongo~=3.11.2".parse().unwrap();
        assert!(req.matches(&Version::new(3, 11, 2)));
        assert!(req.matches(&Version::new(3, 11, 9)));
        assert!(!req.matches(&Version::new(3, 12, 0)));

        // ~= needs at least major.minor
        assert!("pymongo~=3".parse::<Requirement>().is_err());
    }

    #[test]
    fn test_exact_partial() {
        let req: Requirement = "pymongo==3.11".parse().unwrap();
        assert!(req.matches(&Version::new(3, 11, 0)));
        assert!(req.matches(&Version::new(3, 11, 7)));
        assert!(!req.matches(&Version::new(3, 12, 0)));
    }

    #[test]
    fn test_valid_names() {
        assert!(Requirement::is_valid_name("pymongo"));
        assert!(Requirement::is_valid_name("thot-data"));
        assert!(Requirement::is_valid_name("zope.interface"));
        assert!(Requirement::is_valid_name("a"));

        assert!(!Requirement::is_valid_name(""));
        assert!(!Requirement::is_valid_name("-leading"));
        assert!(!Requirement::is_valid_name("trailing-"));
        assert!(!Requirement::is_valid_name("has space"));
    }

    #[test]
    fn test_invalid_requirements() {
        assert!("".parse::<Requirement>().is_err());
        assert!(">=1.0".parse::<Requirement>().is_err());
        assert!("pkg>=".parse::<Requirement>().is_err());
        assert!("pkg>=a.b".parse::<Requirement>().is_err());
        assert!("pkg[unclosed>=1.0".parse::<Requirement>().is_err());
        assert!("pkg>=1.2.3.4".parse::<Requirement>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["pymongo", "pymongo>=3.11.0", "pymongo[srv]~=3.11", "a==1"] {
            let req: Requirement = input.parse().unwrap();
            assert_eq!(req.to_string(), input);
        }
    }
}
