use crate::network::{RailNetwork, Segment};
use std::collections::HashSet;

/// Parts of the network taken out of service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outage {
    /// Every segment touching a station of one of these lines.
    Lines(HashSet<String>),
    /// Segments given as (source, dest) in the direction they were loaded.
    Segments(Vec<(String, String)>),
    /// Every segment touching one of these stations.
    Stations(HashSet<String>),
}

impl Outage {
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Outage::Lines(lines.into_iter().map(Into::into).collect())
    }

    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Outage::Segments(segments.into_iter().map(|(a, b)| (a.into(), b.into())).collect())
    }

    pub fn stations<I, S>(stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Outage::Stations(stations.into_iter().map(Into::into).collect())
    }

    pub(crate) fn excludes(&self, network: &RailNetwork, segment: &Segment) -> bool {
        match self {
            Outage::Lines(lines) => {
                let on_failed_line = |name: &str| network.station(name).is_some_and(|s| lines.contains(s.line()));
                on_failed_line(&segment.source) || on_failed_line(&segment.dest)
            }
            Outage::Segments(segments) => segments.iter().any(|(a, b)| *a == segment.source && *b == segment.dest),
            Outage::Stations(stations) => stations.contains(&segment.source) || stations.contains(&segment.dest),
        }
    }
}
