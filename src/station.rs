use crate::network::error::NetworkError;
use serde::Deserialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    name: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    municipality: String,
    #[serde(default)]
    township: String,
    #[serde(default)]
    line: String,
}

impl Station {
    pub const SUPER_SOURCE: &'static str = "Super-Source";
    pub const SUPER_SINK: &'static str = "Super-Sink";

    pub fn new(name: impl Into<String>, district: impl Into<String>, municipality: impl Into<String>, township: impl Into<String>, line: impl Into<String>) -> Self {
        Self { name: name.into(), district: district.into(), municipality: municipality.into(), township: township.into(), line: line.into() }
    }

    /// A terminal with no location, used for the vertices added by network reduction.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(name, "", "", "", "")
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn district(&self) -> &str {
        &self.district
    }

    #[inline]
    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    #[inline]
    pub fn township(&self) -> &str {
        &self.township
    }

    #[inline]
    pub fn line(&self) -> &str {
        &self.line
    }

    #[inline]
    pub fn is_super_source(&self) -> bool {
        self.name == Self::SUPER_SOURCE
    }

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.name == Self::SUPER_SOURCE || self.name == Self::SUPER_SINK
    }
}

// stations are keyed by name only
impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceClass {
    Standard,
    Alfa,
    // arcs wired to super terminals, never loaded
    #[serde(skip_deserializing)]
    Virtual,
}

impl FromStr for ServiceClass {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "STANDARD" => Ok(ServiceClass::Standard),
            "ALFA" => Ok(ServiceClass::Alfa),
            other => Err(NetworkError::UnknownService(other.to_string())),
        }
    }
}

/// Per-segment cost of each service class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tariff {
    pub standard: u32,
    pub alfa: u32,
}

impl Default for Tariff {
    fn default() -> Self {
        Self { standard: 2, alfa: 4 }
    }
}

impl Tariff {
    pub fn unit_cost(&self, service: ServiceClass) -> u32 {
        match service {
            ServiceClass::Standard => self.standard,
            ServiceClass::Alfa => self.alfa,
            ServiceClass::Virtual => 0,
        }
    }
}
