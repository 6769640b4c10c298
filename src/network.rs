pub mod error;
pub mod outage;
pub mod reduction;

use crate::network::error::NetworkError;
use crate::station::{ServiceClass, Station, Tariff};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type Capacity = i64;

/// One undirected rail segment as delivered by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Segment {
    pub source: String,
    pub dest: String,
    pub capacity: Capacity,
    pub service: ServiceClass,
}

impl Segment {
    pub fn new(source: impl Into<String>, dest: impl Into<String>, capacity: Capacity, service: ServiceClass) -> Self {
        Self { source: source.into(), dest: dest.into(), capacity, service }
    }

    pub fn parse(source: impl Into<String>, dest: impl Into<String>, capacity: Capacity, service: &str) -> Result<Self, NetworkError> {
        Ok(Self::new(source, dest, capacity, service.parse()?))
    }
}

/// How stations are grouped for aggregate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    District,
    Municipality,
}

impl Grouping {
    pub fn key<'a>(&self, station: &'a Station) -> &'a str {
        match self {
            Grouping::District => station.district(),
            Grouping::Municipality => station.municipality(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RailNetwork {
    stations: HashMap<String, Station>,
    segments: Vec<Segment>,
    lines: BTreeSet<String>,
    tariff: Tariff,
}

impl RailNetwork {
    pub fn new<S, E>(stations: S, segments: E) -> Result<Self, NetworkError>
    where
        S: IntoIterator<Item = Station>,
        E: IntoIterator<Item = Segment>,
    {
        let mut catalogue = HashMap::new();
        let mut lines = BTreeSet::new();
        for station in stations {
            if station.is_reserved() {
                return Err(NetworkError::ReservedName(station.name().to_string()));
            }
            if catalogue.contains_key(station.name()) {
                return Err(NetworkError::DuplicateStation(station.name().to_string()));
            }
            lines.insert(station.line().to_string());
            catalogue.insert(station.name().to_string(), station);
        }

        let segments = segments.into_iter().collect::<Vec<_>>();
        for segment in &segments {
            for name in [&segment.source, &segment.dest] {
                if !catalogue.contains_key(name) {
                    return Err(NetworkError::UnknownStation { from: segment.source.clone(), to: segment.dest.clone(), station: name.clone() });
                }
            }
            if segment.capacity < 0 {
                return Err(NetworkError::NegativeCapacity { from: segment.source.clone(), to: segment.dest.clone(), capacity: segment.capacity });
            }
            if segment.service == ServiceClass::Virtual {
                return Err(NetworkError::UnpricedService { from: segment.source.clone(), to: segment.dest.clone() });
            }
        }

        log::debug!("rail network with {} stations, {} segments, {} lines", catalogue.len(), segments.len(), lines.len());
        Ok(Self { stations: catalogue, segments, lines, tariff: Tariff::default() })
    }

    pub fn with_tariff(mut self, tariff: Tariff) -> Self {
        self.tariff = tariff;
        self
    }

    #[inline]
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    pub fn is_station(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }

    pub fn is_line(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Station names of every group, ordered by group name.
    pub fn groups(&self, grouping: Grouping) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for station in self.stations.values() {
            groups.entry(grouping.key(station)).or_default().insert(station.name());
        }
        groups
    }
}
