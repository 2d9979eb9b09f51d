//! Distribution catalog types.
//!
//! The catalog maps a distribution name and version to the numeric
//! `distro_version_id` the upload endpoint requires.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packaging ecosystem the catalog groups distributions by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Deb,
    Rpm,
    Py,
    Jar,
    Node,
    Alpine,
    Anyfile,
    Helm,
    Dsc,
}

impl Ecosystem {
    /// Every ecosystem, in catalog order
    pub const ALL: [Ecosystem; 9] = [
        Ecosystem::Deb,
        Ecosystem::Rpm,
        Ecosystem::Py,
        Ecosystem::Jar,
        Ecosystem::Node,
        Ecosystem::Alpine,
        Ecosystem::Anyfile,
        Ecosystem::Helm,
        Ecosystem::Dsc,
    ];

    /// Key used for this ecosystem in `distributions.json`
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Deb => "deb",
            Ecosystem::Rpm => "rpm",
            Ecosystem::Py => "py",
            Ecosystem::Jar => "jar",
            Ecosystem::Node => "node",
            Ecosystem::Alpine => "alpine",
            Ecosystem::Anyfile => "anyfile",
            Ecosystem::Helm => "helm",
            Ecosystem::Dsc => "dsc",
        }
    }

    /// Ecosystem for an uploadable package file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "deb" => Some(Ecosystem::Deb),
            "dsc" => Some(Ecosystem::Dsc),
            "rpm" => Some(Ecosystem::Rpm),
            "apk" => Some(Ecosystem::Alpine),
            "whl" => Some(Ecosystem::Py),
            _ => None,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deb" | "debian" => Ok(Ecosystem::Deb),
            "rpm" => Ok(Ecosystem::Rpm),
            "py" | "python" => Ok(Ecosystem::Py),
            "jar" | "java" => Ok(Ecosystem::Jar),
            "node" => Ok(Ecosystem::Node),
            "alpine" => Ok(Ecosystem::Alpine),
            "anyfile" => Ok(Ecosystem::Anyfile),
            "helm" => Ok(Ecosystem::Helm),
            "dsc" => Ok(Ecosystem::Dsc),
            other => Err(format!("not supported type: {}", other)),
        }
    }
}

/// One version of a distribution, e.g. debian/stretch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistroVersion {
    pub id: u64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub index_name: String,
    #[serde(default)]
    pub version_number: Option<String>,
}

/// A distribution and its known versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub display_name: String,
    pub index_name: String,
    #[serde(default)]
    pub versions: Vec<DistroVersion>,
}

/// The full catalog as returned by `GET /api/v1/distributions.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributions {
    #[serde(default)]
    pub deb: Vec<Distribution>,
    #[serde(default)]
    pub rpm: Vec<Distribution>,
    #[serde(default)]
    pub py: Vec<Distribution>,
    #[serde(default)]
    pub jar: Vec<Distribution>,
    #[serde(default)]
    pub node: Vec<Distribution>,
    #[serde(default)]
    pub alpine: Vec<Distribution>,
    #[serde(default)]
    pub anyfile: Vec<Distribution>,
    #[serde(default)]
    pub helm: Vec<Distribution>,
    #[serde(default)]
    pub dsc: Vec<Distribution>,
}

impl Distributions {
    /// Distribution list for one ecosystem
    pub fn for_ecosystem(&self, ecosystem: Ecosystem) -> &[Distribution] {
        match ecosystem {
            Ecosystem::Deb => &self.deb,
            Ecosystem::Rpm => &self.rpm,
            Ecosystem::Py => &self.py,
            Ecosystem::Jar => &self.jar,
            Ecosystem::Node => &self.node,
            Ecosystem::Alpine => &self.alpine,
            Ecosystem::Anyfile => &self.anyfile,
            Ecosystem::Helm => &self.helm,
            Ecosystem::Dsc => &self.dsc,
        }
    }

    /// Look up the distro version id within one ecosystem
    pub fn distro_version_id(&self, ecosystem: Ecosystem, distro: &str, version: &str) -> Option<u64> {
        find_distro_version_id(self.for_ecosystem(ecosystem), distro, version)
    }

    /// Find a distribution by index name within one ecosystem
    pub fn find(&self, ecosystem: Ecosystem, distro: &str) -> Option<&Distribution> {
        self.for_ecosystem(ecosystem)
            .iter()
            .find(|d| d.index_name == distro)
    }
}

/// Exact, case-sensitive match on the distro index name, then on the version
/// index name.
pub fn find_distro_version_id(distributions: &[Distribution], distro: &str, version: &str) -> Option<u64> {
    distributions
        .iter()
        .filter(|d| d.index_name == distro)
        .flat_map(|d| d.versions.iter())
        .find(|v| v.index_name == version)
        .map(|v| v.id)
}
