//! Package targets given on the command line.
//!
//! A target is a single "/"-delimited argument of the form
//! `user/repo[/distro[/version]]`.

use crate::error::{PackagecloudError, PackagecloudResult};
use std::fmt;

/// Repository plus optional distro and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTarget {
    /// Repository as `user/repo`
    pub repo: String,
    pub distro: Option<String>,
    pub version: Option<String>,
}

impl PackageTarget {
    /// Parse `user/repo[/distro[/version]]`
    ///
    /// The string is split into at most four segments, so anything after the
    /// third separator belongs to the version.
    pub fn parse(target: &str) -> PackagecloudResult<Self> {
        let segments: Vec<&str> = target.splitn(4, '/').collect();
        if segments.len() < 2 {
            return Err(PackagecloudError::InvalidTarget {
                target: target.to_string(),
                reason: "expected at least user/repo".to_string(),
            });
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PackagecloudError::InvalidTarget {
                target: target.to_string(),
                reason: "empty path segment".to_string(),
            });
        }

        Ok(Self {
            repo: format!("{}/{}", segments[0], segments[1]),
            distro: segments.get(2).map(|s| s.to_string()),
            version: segments.get(3).map(|s| s.to_string()),
        })
    }

    /// Parse a target that must name both distro and version
    pub fn parse_full(target: &str) -> PackagecloudResult<(String, String, String)> {
        let parsed = Self::parse(target)?;
        match (parsed.distro, parsed.version) {
            (Some(distro), Some(version)) => Ok((parsed.repo, distro, version)),
            _ => Err(PackagecloudError::InvalidTarget {
                target: target.to_string(),
                reason: "expected user/repo/distro/version".to_string(),
            }),
        }
    }

    /// Number of segments the target was given with
    pub fn segments(&self) -> usize {
        2 + self.distro.is_some() as usize + self.version.is_some() as usize
    }
}

impl fmt::Display for PackageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repo)?;
        if let Some(distro) = &self.distro {
            write!(f, "/{}", distro)?;
        }
        if let Some(version) = &self.version {
            write!(f, "/{}", version)?;
        }
        Ok(())
    }
}
